//! Application state shared by one run of the monitor

use crate::config::Palette;
use crate::system::memory::memory_percent;
use crate::system::Sampler;

use super::SortState;

/// Everything resolved at startup plus the one piece of mutable state.
///
/// Only `sort` changes after startup, and only through the input controller.
#[derive(Debug, Clone)]
pub struct App {
    /// Current sort column and direction
    pub sort: SortState,
    /// Colour rules for the CPU and memory columns
    pub palette: Palette,
    /// Total physical memory in megabytes, always positive
    pub total_memory_mb: f64,
    /// Snapshot interval and core count
    pub sampler: Sampler,
}

impl App {
    pub fn new(sort: SortState, palette: Palette, total_memory_mb: f64, sampler: Sampler) -> Self {
        Self {
            sort,
            palette,
            total_memory_mb,
            sampler,
        }
    }

    /// Memory figure used for threshold lookup
    pub fn memory_percent(&self, memory_mb: f64) -> f64 {
        memory_percent(memory_mb, self.total_memory_mb)
    }
}
