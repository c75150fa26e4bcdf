//! Two-snapshot CPU usage estimation
//!
//! CPU usage is derived from how much CPU time a process accumulated over
//! one fixed interval, normalized by the number of logical processors so the
//! result is a share of the whole machine (0-100%).

use std::time::Duration;

use super::{Clock, CpuReading, ProcessSource};

/// Both readings of a process that survived the whole interval
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessSample {
    pub pid: u32,
    pub name: String,
    /// CPU time at the first snapshot
    pub cpu_time_before: Duration,
    /// CPU time at the second snapshot
    pub cpu_time_after: Duration,
    /// Resident memory read after the wait
    pub resident_bytes: u64,
}

/// Computes CPU usage over `interval` as a percentage of all cores.
///
/// A negative delta (clock anomaly, pid reuse slipping through) counts as
/// zero, and the result is clamped to 0-100.
#[must_use]
pub fn cpu_percent(before: Duration, after: Duration, interval: Duration, cores: usize) -> f64 {
    let capacity = interval.as_secs_f64() * cores.max(1) as f64;
    if capacity <= 0.0 {
        return 0.0;
    }

    let delta = (after.as_secs_f64() - before.as_secs_f64()).max(0.0);
    let usage = 100.0 * delta / capacity;
    if usage.is_nan() {
        0.0
    } else {
        usage.clamp(0.0, 100.0)
    }
}

/// Keeps the source's per-process resources alive for one sample and
/// releases them when dropped, whichever way the sample ends.
struct OpenPass<'a, S: ProcessSource + ?Sized> {
    source: &'a mut S,
}

impl<S: ProcessSource + ?Sized> Drop for OpenPass<'_, S> {
    fn drop(&mut self) {
        self.source.release();
    }
}

/// Takes the two snapshots of one cycle
#[derive(Debug, Clone, Copy)]
pub struct Sampler {
    interval: Duration,
    cores: usize,
}

impl Sampler {
    pub fn new(interval: Duration, cores: usize) -> Self {
        Self {
            interval,
            cores: cores.max(1),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn cores(&self) -> usize {
        self.cores
    }

    /// CPU usage of a finished sample under this sampler's interval and core count.
    pub fn usage(&self, sample: &ProcessSample) -> f64 {
        cpu_percent(
            sample.cpu_time_before,
            sample.cpu_time_after,
            self.interval,
            self.cores,
        )
    }

    /// Samples every process over one interval.
    ///
    /// Records CPU time for all live processes, waits one interval, then
    /// reads CPU time and memory again for the ones still alive. Processes
    /// missing from either snapshot are left out. If the first snapshot
    /// cannot be taken at all the result is empty.
    pub fn sample<S, C>(&self, source: &mut S, clock: &mut C) -> Vec<ProcessSample>
    where
        S: ProcessSource + ?Sized,
        C: Clock + ?Sized,
    {
        let pass = OpenPass { source };

        let first = match pass.source.open_all() {
            Ok(readings) => readings,
            Err(err) => {
                log::warn!("skipping cycle: {err}");
                return Vec::new();
            }
        };

        clock.sleep(self.interval);
        pass.source.refresh();

        let samples: Vec<ProcessSample> = first
            .into_iter()
            .filter_map(|CpuReading { pid, name, cpu_time }| {
                let late = pass.source.reread(pid)?;
                Some(ProcessSample {
                    pid,
                    name,
                    cpu_time_before: cpu_time,
                    cpu_time_after: late.cpu_time,
                    resident_bytes: late.resident_bytes,
                })
            })
            .collect();

        log::debug!("sampled {} processes", samples.len());
        samples
    }
}
