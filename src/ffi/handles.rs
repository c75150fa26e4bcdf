//! Owned Win32 handles for one sampling pass
//!
//! A process handle keeps the kernel process object alive even after the
//! process exits, so its PID cannot be handed to a new process while we
//! hold it. The sampler relies on that: the handle opened for the first CPU
//! time reading is the one read again after the wait, so both readings
//! always describe the same process.

use windows::Win32::Foundation::{CloseHandle, HANDLE};
use windows::Win32::System::Diagnostics::ToolHelp::{
    CreateToolhelp32Snapshot, TH32CS_SNAPPROCESS,
};
use windows::Win32::System::Threading::{OpenProcess, PROCESS_ACCESS_RIGHTS};

/// A HANDLE closed exactly once, on drop
struct OwnedHandle(HANDLE);

impl Drop for OwnedHandle {
    fn drop(&mut self) {
        // SAFETY: the handle came from a successful Win32 call and is owned
        // by this value alone, so it is still open here.
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

/// An open process, pinned for as long as this value lives.
pub struct ProcessHandle(OwnedHandle);

impl ProcessHandle {
    /// Fails for processes we lack rights to and for ones already gone.
    pub fn open(pid: u32, access: PROCESS_ACCESS_RIGHTS) -> windows::core::Result<Self> {
        // SAFETY: plain call; failure comes back as an error, not a null handle.
        let handle = unsafe { OpenProcess(access, false, pid)? };
        Ok(Self(OwnedHandle(handle)))
    }

    /// Borrowed raw handle, valid while `self` is alive.
    pub fn as_raw(&self) -> HANDLE {
        self.0 .0
    }
}

/// ToolHelp32 process list, frozen at creation.
pub struct SnapshotHandle(OwnedHandle);

impl SnapshotHandle {
    pub fn create_process_snapshot() -> windows::core::Result<Self> {
        // SAFETY: plain call; the pid argument is ignored for process snapshots.
        let handle = unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0)? };
        Ok(Self(OwnedHandle(handle)))
    }

    pub fn as_raw(&self) -> HANDLE {
        self.0 .0
    }
}
