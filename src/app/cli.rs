//! Command-line argument parsing

use std::path::PathBuf;

use clap::Parser;

use super::{SortDirection, SortField, SortState};

/// A live process monitor: CPU and memory per process, colour-coded by
/// configurable thresholds, refreshed in place once a second.
///
/// Controls: Q quit, C sort by CPU, M sort by memory, D descending, A ascending.
#[derive(Debug, Parser)]
#[command(name = "process_monitor_cli", version, about)]
pub struct Args {
    /// Colour configuration file (TOML). Defaults to the user config directory.
    #[arg(short = 'C', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Initial sort column
    #[arg(short = 's', long = "sort", value_enum, default_value_t = SortField::Cpu)]
    pub sort: SortField,

    /// Sort in ascending order (default is descending)
    #[arg(short = 'a', long = "ascending")]
    pub ascending: bool,

    /// Write a debug log to this file
    #[arg(long = "log", value_name = "PATH")]
    pub log: Option<PathBuf>,
}

impl Args {
    /// Sort state the monitor starts with
    pub fn initial_sort(&self) -> SortState {
        let direction = if self.ascending {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        };
        SortState::new(self.sort, direction)
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["process_monitor_cli"]).unwrap();
        assert_eq!(args.initial_sort(), SortState::default());
        assert!(args.config.is_none());
        assert!(args.log.is_none());
    }

    #[test]
    fn test_sort_options() {
        let args =
            Args::try_parse_from(["process_monitor_cli", "--sort", "memory", "-a"]).unwrap();
        assert_eq!(
            args.initial_sort(),
            SortState::new(SortField::Memory, SortDirection::Ascending)
        );

        let args = Args::try_parse_from(["process_monitor_cli", "-s", "mem"]).unwrap();
        assert_eq!(args.sort, SortField::Memory);

        assert!(Args::try_parse_from(["process_monitor_cli", "--sort", "name"]).is_err());
    }

    #[test]
    fn test_config_path() {
        let args = Args::try_parse_from(["process_monitor_cli", "-C", "colours.toml"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("colours.toml")));
    }
}
