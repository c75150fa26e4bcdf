//! Process row rendering

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};

use crate::app::{App, ProcessRecord};
use crate::config::ColorPair;
use crate::constants::{CPU_COL_WIDTH, MEM_COL_WIDTH, NAME_COL_WIDTH, PID_COL_WIDTH};

use super::utils::{blank, truncate_string};

/// Characters taken by the pid and name columns, including gutters
const IDENTITY_WIDTH: usize = 1 + PID_COL_WIDTH + 2 + NAME_COL_WIDTH + 2;

/// Total characters taken by a populated row before padding
pub const ROW_WIDTH: usize = IDENTITY_WIDTH + CPU_COL_WIDTH + 2 + MEM_COL_WIDTH;

/// Writes one process row at line `y`.
///
/// The pid and name use default colours; the CPU and memory cells are
/// coloured by their threshold bands. The remainder of the line, up to
/// `width`, is blanked so a previously longer line leaves nothing behind.
pub fn render_process_row<W: Write>(
    out: &mut W,
    y: u16,
    record: &ProcessRecord,
    app: &App,
    width: usize,
) -> io::Result<()> {
    let cpu_colors = app.palette.cpu_colors(record.cpu_percent);
    let mem_colors = app
        .palette
        .memory_colors(app.memory_percent(record.memory_mb));

    let identity = format!(
        " {:>pid_w$}  {:<name_w$}  ",
        record.pid,
        truncate_string(&record.name, NAME_COL_WIDTH),
        pid_w = PID_COL_WIDTH,
        name_w = NAME_COL_WIDTH,
    );
    let cpu = format!("{:>w$.1}%", record.cpu_percent, w = CPU_COL_WIDTH - 1);
    let memory = format!("{:>w$.1} MB", record.memory_mb, w = MEM_COL_WIDTH - 3);

    queue!(out, MoveTo(0, y), ResetColor, Print(identity))?;
    render_cell(out, &cpu, cpu_colors)?;
    queue!(out, Print("  "))?;
    render_cell(out, &memory, mem_colors)?;
    queue!(out, Print(blank(width.saturating_sub(ROW_WIDTH))))
}

/// Writes a blank line at `y` in default colours.
pub fn render_blank_row<W: Write>(out: &mut W, y: u16, width: usize) -> io::Result<()> {
    queue!(out, MoveTo(0, y), ResetColor, Print(blank(width)))
}

fn render_cell<W: Write>(out: &mut W, text: &str, colors: ColorPair) -> io::Result<()> {
    queue!(
        out,
        SetBackgroundColor(colors.background),
        SetForegroundColor(colors.foreground),
        Print(text),
        ResetColor,
    )
}
