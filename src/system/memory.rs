//! Memory unit conversions and total-capacity resolution

use crate::constants::{BYTES_PER_MB, FALLBACK_TOTAL_MEMORY_MB};

use super::ProcessSource;

/// Converts bytes to megabytes
#[must_use]
pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

/// Resolves the machine's total memory in megabytes, once, at startup.
///
/// Falls back to `FALLBACK_TOTAL_MEMORY_MB` when the source cannot report
/// it, so memory colouring always has a positive divisor.
pub fn resolve_total_memory_mb<S: ProcessSource + ?Sized>(source: &mut S) -> f64 {
    match source.total_memory_bytes().map(bytes_to_mb) {
        Some(total) if total > 0.0 => total,
        _ => {
            log::warn!(
                "total memory unavailable, assuming {} MB",
                FALLBACK_TOTAL_MEMORY_MB
            );
            FALLBACK_TOTAL_MEMORY_MB
        }
    }
}

/// Share of total memory used by `memory_mb`, in percent.
#[must_use]
pub fn memory_percent(memory_mb: f64, total_mb: f64) -> f64 {
    if total_mb <= 0.0 {
        return 0.0;
    }
    100.0 * memory_mb / total_mb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::sampler::tests::FakeSource;

    #[test]
    fn test_bytes_to_mb() {
        assert_eq!(bytes_to_mb(0), 0.0);
        assert_eq!(bytes_to_mb(1_572_864), 1.5);
    }

    #[test]
    fn test_total_memory_reported() {
        let mut source = FakeSource {
            total_memory: Some(8 * 1024 * 1_048_576),
            ..Default::default()
        };
        assert_eq!(resolve_total_memory_mb(&mut source), 8192.0);
    }

    #[test]
    fn test_total_memory_fallback() {
        let mut source = FakeSource::default();
        assert_eq!(resolve_total_memory_mb(&mut source), FALLBACK_TOTAL_MEMORY_MB);

        source.total_memory = Some(0);
        assert_eq!(resolve_total_memory_mb(&mut source), FALLBACK_TOTAL_MEMORY_MB);
    }

    #[test]
    fn test_memory_percent() {
        assert_eq!(memory_percent(512.0, 2048.0), 25.0);
        assert_eq!(memory_percent(512.0, 0.0), 0.0);
    }
}
