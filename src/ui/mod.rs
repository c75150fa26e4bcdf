//! User interface rendering
//!
//! - `components` - Static header and column headers, written once
//! - `render` - In-place table region
//! - `process_list` - One process row
//! - `utils` - Shared utilities

mod components;
mod process_list;
mod render;
mod utils;

pub use components::render_header;
pub use render::{Region, TableRenderer};
