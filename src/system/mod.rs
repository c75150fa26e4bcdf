//! System information module - process enumeration, CPU time and memory
//!
//! The monitor only talks to the host through `ProcessSource`. On Windows
//! that is backed by raw Win32 calls; everywhere else by `sysinfo`.

pub mod clock;
pub mod error;
pub mod memory;
pub mod sampler;

#[cfg(not(windows))]
mod portable;
#[cfg(windows)]
mod win32;

use std::time::Duration;

pub use clock::{Clock, SystemClock};
pub use error::{SampleError, SampleResult};
pub use sampler::{ProcessSample, Sampler};

/// First reading of a process, taken before the measurement wait
#[derive(Debug, Clone, PartialEq)]
pub struct CpuReading {
    /// Process ID
    pub pid: u32,
    /// Executable name
    pub name: String,
    /// CPU time consumed since the process started (user + kernel)
    pub cpu_time: Duration,
}

/// Second reading of a process, taken after the measurement wait
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LateReading {
    /// CPU time consumed since the process started (user + kernel)
    pub cpu_time: Duration,
    /// Resident set / working set size in bytes
    pub resident_bytes: u64,
}

/// Host facility that lists processes and reports their CPU time and memory.
///
/// One sample is `open_all`, a wait, `refresh`, any number of `reread`
/// calls, then `release`. Implementations may hold per-process resources
/// between `open_all` and `release`.
pub trait ProcessSource {
    /// Enumerates every accessible live process and records its CPU time.
    ///
    /// Processes that cannot be opened are left out.
    fn open_all(&mut self) -> SampleResult<Vec<CpuReading>>;

    /// Brings the source up to date after the wait.
    fn refresh(&mut self) {}

    /// Reads a process opened by `open_all` again.
    ///
    /// Returns `None` if it exited, was replaced or can no longer be read.
    fn reread(&mut self, pid: u32) -> Option<LateReading>;

    /// Releases everything acquired by `open_all`.
    fn release(&mut self);

    /// Total physical memory of the machine, in bytes.
    fn total_memory_bytes(&mut self) -> Option<u64>;
}

/// Creates the process source for the current platform.
#[cfg(windows)]
pub fn host_source() -> impl ProcessSource {
    win32::Win32Source::new()
}

/// Creates the process source for the current platform.
#[cfg(not(windows))]
pub fn host_source() -> impl ProcessSource {
    portable::SysinfoSource::new()
}

/// Number of logical processors, never less than one.
pub fn logical_cpu_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
