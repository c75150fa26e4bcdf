//! Sorting options for the process list

use std::cmp::Ordering;

use super::ProcessRecord;

/// Column the table is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortField {
    #[default]
    Cpu,
    #[value(alias = "mem")]
    Memory,
}

impl SortField {
    /// Get display name for the sort column
    pub fn name(&self) -> &'static str {
        match self {
            SortField::Cpu => "CPU%",
            SortField::Memory => "Memory",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

/// Current ordering of the table.
///
/// Written only by the input controller, read once per cycle by `rank`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    fn compare(&self, a: &ProcessRecord, b: &ProcessRecord) -> Ordering {
        let ordering = match self.field {
            SortField::Cpu => a.cpu_percent.total_cmp(&b.cpu_percent),
            SortField::Memory => a.memory_mb.total_cmp(&b.memory_mb),
        };
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Orders records by the current sort state.
///
/// The sort is stable: records with equal keys keep their enumeration order,
/// in both directions.
#[must_use]
pub fn rank(mut records: Vec<ProcessRecord>, sort: SortState) -> Vec<ProcessRecord> {
    records.sort_by(|a, b| sort.compare(a, b));
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, cpu: f64, mem: f64) -> ProcessRecord {
        ProcessRecord {
            pid: 0,
            name: name.to_string(),
            cpu_percent: cpu,
            memory_mb: mem,
        }
    }

    fn names(records: &[ProcessRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_memory_descending_is_stable() {
        let records = vec![
            record("A", 0.0, 10.0),
            record("B", 0.0, 30.0),
            record("C", 0.0, 30.0),
        ];
        let sort = SortState::new(SortField::Memory, SortDirection::Descending);

        let ranked = rank(records, sort);
        assert_eq!(names(&ranked), vec!["B", "C", "A"]);

        // re-sorting keeps B before C
        let ranked = rank(ranked, sort);
        assert_eq!(names(&ranked), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_ascending_keeps_tie_order() {
        let records = vec![
            record("X", 5.0, 0.0),
            record("Y", 1.0, 0.0),
            record("Z", 5.0, 0.0),
        ];
        let ranked = rank(records, SortState::new(SortField::Cpu, SortDirection::Ascending));
        assert_eq!(names(&ranked), vec!["Y", "X", "Z"]);
    }

    #[test]
    fn test_cpu_descending_default() {
        let records = vec![
            record("low", 1.0, 900.0),
            record("high", 80.0, 1.0),
            record("mid", 20.0, 50.0),
        ];
        let ranked = rank(records, SortState::default());
        assert_eq!(names(&ranked), vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_field_names() {
        assert_eq!(SortField::Cpu.name(), "CPU%");
        assert_eq!(SortField::Memory.name(), "Memory");
    }
}
