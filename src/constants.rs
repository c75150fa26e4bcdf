//! Centralized constants for the application
//!
//! This module contains all magic numbers and configuration constants
//! used throughout the application, making them easy to find and modify.

// ============================================================================
// Application Info
// ============================================================================

/// Application name displayed in header
pub const DISPLAY_NAME: &str = "Process Monitor";

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// Name of the configuration file looked up in the user config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Line printed below the table after the user quits
pub const EXIT_NOTICE: &str = "Process monitor closed.";

// ============================================================================
// Timing
// ============================================================================

/// Interval between the two CPU-time snapshots of one cycle (milliseconds)
pub const SAMPLE_INTERVAL_MS: u64 = 1000;

/// Pause after a cycle failed before sampling again (milliseconds)
pub const ERROR_PAUSE_MS: u64 = 2000;

// ============================================================================
// Memory
// ============================================================================

/// Bytes in a megabyte
pub const BYTES_PER_MB: f64 = 1_048_576.0;

/// Total memory assumed when the host refuses to report it (megabytes)
pub const FALLBACK_TOTAL_MEMORY_MB: f64 = 16_384.0;

// ============================================================================
// Table layout
// ============================================================================

/// Width of the PID column
pub const PID_COL_WIDTH: usize = 8;

/// Maximum width of the process name column; longer names are cut
pub const NAME_COL_WIDTH: usize = 28;

/// Width of the CPU% column (value plus the percent sign)
pub const CPU_COL_WIDTH: usize = 8;

/// Width of the memory column (value plus the unit)
pub const MEM_COL_WIDTH: usize = 12;

// ============================================================================
// Default colour bands (percent thresholds, highest first)
// ============================================================================

/// Critical band
pub const BAND_CRITICAL: f64 = 95.0;

/// Severe band
pub const BAND_SEVERE: f64 = 85.0;

/// High band
pub const BAND_HIGH: f64 = 75.0;

/// Elevated band
pub const BAND_ELEVATED: f64 = 60.0;

/// Moderate band
pub const BAND_MODERATE: f64 = 49.0;
