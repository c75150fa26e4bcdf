//! Static header: title, command help, startup diagnostic and column headers
//!
//! Written once before the loop starts; the table region begins on the line
//! after it.

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};

use crate::constants::{CPU_COL_WIDTH, DISPLAY_NAME, MEM_COL_WIDTH, NAME_COL_WIDTH, PID_COL_WIDTH};

use super::utils::truncate_string;

/// Help line listing every command
pub const COMMANDS_HELP: &str =
    " Q: Quit | C: Sort by CPU | M: Sort by memory | D: Descending | A: Ascending";

/// Formats the fixed columns of a row; used for both the header and the table.
pub fn format_columns(pid: &str, name: &str, cpu: &str, memory: &str) -> String {
    format!(
        " {:>pid_w$}  {:<name_w$}  {:>cpu_w$}  {:>mem_w$}",
        pid,
        name,
        cpu,
        memory,
        pid_w = PID_COL_WIDTH,
        name_w = NAME_COL_WIDTH,
        cpu_w = CPU_COL_WIDTH,
        mem_w = MEM_COL_WIDTH,
    )
}

/// Writes the static header at the current cursor position.
///
/// `diagnostic` is the configuration problem reported at startup, if any.
pub fn render_header<W: Write>(
    out: &mut W,
    width: usize,
    diagnostic: Option<&str>,
) -> io::Result<()> {
    let title = format!(" {}", DISPLAY_NAME);
    queue!(
        out,
        SetBackgroundColor(Color::DarkBlue),
        SetForegroundColor(Color::White),
        Print(format!("{:width$}", title, width = width)),
        ResetColor,
        Print("\r\n"),
        SetForegroundColor(Color::DarkGrey),
        Print(truncate_string(COMMANDS_HELP, width)),
        ResetColor,
        Print("\r\n"),
    )?;

    if let Some(message) = diagnostic {
        queue!(
            out,
            SetForegroundColor(Color::Yellow),
            Print(truncate_string(&format!(" {}", message), width)),
            ResetColor,
            Print("\r\n"),
        )?;
    }

    render_column_headers(out, width)?;
    out.flush()
}

/// Renders column headers
fn render_column_headers<W: Write>(out: &mut W, width: usize) -> io::Result<()> {
    let header = format_columns("PID", "Name", "CPU%", "Memory");
    queue!(
        out,
        SetBackgroundColor(Color::DarkGrey),
        SetForegroundColor(Color::White),
        Print(format!("{:width$}", truncate_string(&header, width), width = width)),
        ResetColor,
        Print("\r\n")
    )
}
