//! Process source for non-Windows hosts, backed by `sysinfo`

use std::collections::HashMap;
use std::time::Duration;

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

use super::{CpuReading, LateReading, ProcessSource, SampleError, SampleResult};

/// Only CPU time and memory are needed from each process
fn refresh_kind() -> ProcessRefreshKind {
    ProcessRefreshKind::nothing().with_cpu().with_memory()
}

pub struct SysinfoSource {
    system: System,
    /// Start time of every process opened this sample, to detect pid reuse
    opened: HashMap<Pid, u64>,
}

impl SysinfoSource {
    pub fn new() -> Self {
        Self {
            system: System::new(),
            opened: HashMap::new(),
        }
    }
}

impl Default for SysinfoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessSource for SysinfoSource {
    fn open_all(&mut self) -> SampleResult<Vec<CpuReading>> {
        self.system
            .refresh_processes_specifics(ProcessesToUpdate::All, true, refresh_kind());

        let mut readings: Vec<CpuReading> = self
            .system
            .processes()
            .iter()
            // Linux lists threads as tasks of their process; skip them
            .filter(|(_, process)| process.thread_kind().is_none())
            .map(|(pid, process)| {
                self.opened.insert(*pid, process.start_time());
                CpuReading {
                    pid: pid.as_u32(),
                    name: process.name().to_string_lossy().into_owned(),
                    cpu_time: Duration::from_millis(process.accumulated_cpu_time()),
                }
            })
            .collect();

        if readings.is_empty() {
            return Err(SampleError::EmptySnapshot);
        }

        readings.sort_by_key(|reading| reading.pid);
        Ok(readings)
    }

    fn refresh(&mut self) {
        let pids: Vec<Pid> = self.opened.keys().copied().collect();
        self.system
            .refresh_processes_specifics(ProcessesToUpdate::Some(&pids), true, refresh_kind());
    }

    fn reread(&mut self, pid: u32) -> Option<LateReading> {
        let pid = Pid::from_u32(pid);
        let started = self.opened.get(&pid)?;
        let process = self.system.process(pid)?;

        if process.start_time() != *started {
            return None;
        }

        Some(LateReading {
            cpu_time: Duration::from_millis(process.accumulated_cpu_time()),
            resident_bytes: process.memory(),
        })
    }

    fn release(&mut self) {
        self.opened.clear();
    }

    fn total_memory_bytes(&mut self) -> Option<u64> {
        self.system.refresh_memory();
        Some(self.system.total_memory()).filter(|total| *total > 0)
    }
}
