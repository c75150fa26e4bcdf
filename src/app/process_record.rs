//! Process record data structure

use crate::system::memory::bytes_to_mb;
use crate::system::{ProcessSample, Sampler};

/// One row of the table, derived from a finished sample
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRecord {
    /// Process ID
    pub pid: u32,
    /// Executable name
    pub name: String,
    /// CPU usage over the last interval, percent of all cores (0-100)
    pub cpu_percent: f64,
    /// Resident memory in megabytes
    pub memory_mb: f64,
}

impl ProcessRecord {
    pub fn from_sample(sample: &ProcessSample, sampler: &Sampler) -> Self {
        Self {
            pid: sample.pid,
            name: sample.name.clone(),
            cpu_percent: sampler.usage(sample),
            memory_mb: bytes_to_mb(sample.resident_bytes),
        }
    }
}
