//! Process source using raw Win32 APIs
//!
//! Processes are enumerated with the ToolHelp32 API and opened with
//! `PROCESS_QUERY_LIMITED_INFORMATION`. The handles stay open across the
//! measurement wait, so the second reading always refers to the same process
//! even if its PID is recycled in between.

use std::collections::HashMap;
use std::mem;
use std::time::Duration;

use windows::Win32::Foundation::FILETIME;
use windows::Win32::System::Diagnostics::ToolHelp::{
    Process32FirstW, Process32NextW, PROCESSENTRY32W,
};
use windows::Win32::System::ProcessStatus::{GetProcessMemoryInfo, PROCESS_MEMORY_COUNTERS};
use windows::Win32::System::SystemInformation::{GlobalMemoryStatusEx, MEMORYSTATUSEX};
use windows::Win32::System::Threading::{GetProcessTimes, PROCESS_QUERY_LIMITED_INFORMATION};

use crate::ffi::{ProcessHandle, SnapshotHandle};

use super::{CpuReading, LateReading, ProcessSource, SampleError, SampleResult};

/// CPU times of one process, in 100-nanosecond units
struct ProcessTimes {
    busy: u64,
    exited: bool,
}

pub struct Win32Source {
    /// Handles opened by `open_all`, closed on `release`
    open: HashMap<u32, ProcessHandle>,
}

impl Win32Source {
    pub fn new() -> Self {
        Self {
            open: HashMap::new(),
        }
    }
}

impl Default for Win32Source {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessSource for Win32Source {
    fn open_all(&mut self) -> SampleResult<Vec<CpuReading>> {
        let mut readings = Vec::new();

        for (pid, name) in enumerate_processes()? {
            // System Idle Process and anything we lack rights for
            let Ok(handle) = ProcessHandle::open(pid, PROCESS_QUERY_LIMITED_INFORMATION) else {
                continue;
            };
            let Some(times) = process_times(&handle) else {
                continue;
            };
            if times.exited {
                continue;
            }

            readings.push(CpuReading {
                pid,
                name,
                cpu_time: filetime_units_to_duration(times.busy),
            });
            self.open.insert(pid, handle);
        }

        if readings.is_empty() {
            return Err(SampleError::EmptySnapshot);
        }

        Ok(readings)
    }

    fn reread(&mut self, pid: u32) -> Option<LateReading> {
        let handle = self.open.get(&pid)?;
        let times = process_times(handle)?;
        if times.exited {
            return None;
        }

        Some(LateReading {
            cpu_time: filetime_units_to_duration(times.busy),
            resident_bytes: working_set(handle)?,
        })
    }

    fn release(&mut self) {
        // Dropping the handles closes them
        self.open.clear();
    }

    fn total_memory_bytes(&mut self) -> Option<u64> {
        let mut status = MEMORYSTATUSEX {
            dwLength: mem::size_of::<MEMORYSTATUSEX>() as u32,
            ..Default::default()
        };

        // SAFETY: GlobalMemoryStatusEx is safe to call with a properly initialized struct.
        unsafe { GlobalMemoryStatusEx(&mut status) }.ok()?;

        Some(status.ullTotalPhys).filter(|total| *total > 0)
    }
}

/// Lists `(pid, executable name)` of every process in a ToolHelp32 snapshot.
fn enumerate_processes() -> windows::core::Result<Vec<(u32, String)>> {
    let snapshot = SnapshotHandle::create_process_snapshot()?;
    let mut processes = Vec::new();

    // dwSize must be set before the first call
    let mut entry = PROCESSENTRY32W {
        dwSize: mem::size_of::<PROCESSENTRY32W>() as u32,
        ..Default::default()
    };

    // SAFETY: We have a valid snapshot handle and properly initialized entry.
    let mut success = unsafe { Process32FirstW(snapshot.as_raw(), &mut entry) };

    while success.is_ok() {
        processes.push((entry.th32ProcessID, wide_to_string(&entry.szExeFile)));

        // SAFETY: Same as above - valid handles and initialized struct.
        success = unsafe { Process32NextW(snapshot.as_raw(), &mut entry) };
    }

    Ok(processes)
}

/// Converts a null-terminated wide string (u16 slice) to a Rust String
fn wide_to_string(wide: &[u16]) -> String {
    let len = wide.iter().position(|&c| c == 0).unwrap_or(wide.len());
    String::from_utf16_lossy(&wide[..len])
}

/// Converts a FILETIME to a u64 (100-nanosecond intervals)
fn filetime_to_u64(ft: &FILETIME) -> u64 {
    ((ft.dwHighDateTime as u64) << 32) | (ft.dwLowDateTime as u64)
}

fn filetime_units_to_duration(units: u64) -> Duration {
    Duration::from_nanos(units.saturating_mul(100))
}

fn process_times(handle: &ProcessHandle) -> Option<ProcessTimes> {
    let mut creation_time = FILETIME::default();
    let mut exit_time = FILETIME::default();
    let mut kernel_time = FILETIME::default();
    let mut user_time = FILETIME::default();

    // SAFETY: GetProcessTimes is safe with a valid handle and pointers.
    unsafe {
        GetProcessTimes(
            handle.as_raw(),
            &mut creation_time,
            &mut exit_time,
            &mut kernel_time,
            &mut user_time,
        )
    }
    .ok()?;

    Some(ProcessTimes {
        busy: filetime_to_u64(&kernel_time) + filetime_to_u64(&user_time),
        // exit time stays zero while the process is running
        exited: filetime_to_u64(&exit_time) != 0,
    })
}

fn working_set(handle: &ProcessHandle) -> Option<u64> {
    let mut counters = PROCESS_MEMORY_COUNTERS {
        cb: mem::size_of::<PROCESS_MEMORY_COUNTERS>() as u32,
        ..Default::default()
    };

    // SAFETY: GetProcessMemoryInfo is safe with a valid handle and initialized struct.
    unsafe {
        GetProcessMemoryInfo(
            handle.as_raw(),
            &mut counters,
            mem::size_of::<PROCESS_MEMORY_COUNTERS>() as u32,
        )
    }
    .ok()?;

    Some(counters.WorkingSetSize as u64)
}
