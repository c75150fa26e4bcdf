//! Application state and logic

mod cli;
mod input;
mod monitor;
mod process_record;
mod sort;
mod state;

pub use cli::Args;
pub use input::{poll_and_apply, KeyAction, KeySource, TerminalKeys};
pub use monitor::Monitor;
pub use process_record::ProcessRecord;
pub use sort::{rank, SortDirection, SortField, SortState};
pub use state::App;
