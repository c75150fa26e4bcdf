//! Terminal rendering logic for the table region
//!
//! The region below the static header is redrawn in place every cycle. The
//! screen is never cleared: rows are overwritten, and rows that held data in
//! the previous frame but not in this one are blanked.

use std::io::{self, Write};

use crossterm::{
    cursor::{MoveTo, Show},
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};

use crate::app::{App, ProcessRecord};
use crate::constants::EXIT_NOTICE;

use super::process_list::{render_blank_row, render_process_row};
use super::utils::truncate_string;

/// The fixed part of the terminal the table is drawn into.
///
/// Captured once at startup; terminal resizes are not tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// First terminal line of the region
    pub top: u16,
    /// Number of lines available for rows
    pub height: u16,
    /// Terminal width in columns
    pub width: u16,
}

impl Region {
    /// Region from `top` to the line before the last one of a terminal of
    /// `rows` lines. The last line is kept for the exit notice.
    /// A header taller than the terminal still leaves the last line usable.
    pub fn below_header(top: u16, columns: u16, rows: u16) -> Self {
        let top = top.min(rows.saturating_sub(1));
        Self {
            top,
            height: rows.saturating_sub(top).saturating_sub(1).max(1),
            width: columns,
        }
    }

    fn line(&self, row: usize) -> u16 {
        self.top.saturating_add(row as u16)
    }
}

/// Draws ranked records into a `Region`, remembering what is on screen
#[derive(Debug)]
pub struct TableRenderer {
    region: Region,
    /// Rows currently showing something; everything below is blank
    painted: usize,
}

impl TableRenderer {
    /// The region's current contents are unknown, so the first frame
    /// blanks all of it.
    pub fn new(region: Region) -> Self {
        Self {
            region,
            painted: usize::from(region.height),
        }
    }

    /// Renders up to `region.height` records in the given order.
    pub fn render<W: Write>(
        &mut self,
        out: &mut W,
        records: &[ProcessRecord],
        app: &App,
    ) -> io::Result<()> {
        let width = usize::from(self.region.width);
        let capacity = usize::from(self.region.height);

        for (row, record) in records.iter().take(capacity).enumerate() {
            render_process_row(out, self.region.line(row), record, app, width)?;
        }

        let shown = records.len().min(capacity);
        self.blank_rows(out, shown)?;
        out.flush()
    }

    /// Shows a cycle failure in the first row of the region.
    pub fn render_error<W: Write>(&mut self, out: &mut W, message: &str) -> io::Result<()> {
        let width = usize::from(self.region.width);
        let text = truncate_string(&format!(" Error: {}", message), width);

        queue!(
            out,
            MoveTo(0, self.region.top),
            SetForegroundColor(Color::Yellow),
            Print(format!("{:width$}", text, width = width)),
            ResetColor,
        )?;

        self.blank_rows(out, 1)?;
        out.flush()
    }

    /// Restores default colours and leaves a closing notice below the region.
    pub fn finish<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let below = self.region.line(usize::from(self.region.height));
        queue!(
            out,
            ResetColor,
            MoveTo(0, below),
            Print(EXIT_NOTICE),
            Print("\r\n"),
            Show,
        )?;
        out.flush()
    }

    /// Blanks every painted row from `shown` on, then records `shown` as painted.
    fn blank_rows<W: Write>(&mut self, out: &mut W, shown: usize) -> io::Result<()> {
        let width = usize::from(self.region.width);
        let stale = self.painted.min(usize::from(self.region.height));

        for row in shown..stale {
            render_blank_row(out, self.region.line(row), width)?;
        }

        self.painted = shown;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossterm::style::SetBackgroundColor;
    use crossterm::Command;

    use super::*;
    use crate::app::SortState;
    use crate::config::Palette;
    use crate::system::Sampler;

    const WIDTH: u16 = 80;

    fn app() -> App {
        App::new(
            SortState::default(),
            Palette::default(),
            1024.0,
            Sampler::new(Duration::from_millis(1000), 4),
        )
    }

    fn records(count: usize) -> Vec<ProcessRecord> {
        (0..count)
            .map(|i| ProcessRecord {
                pid: 100 + i as u32,
                name: format!("proc-{i}"),
                cpu_percent: (i * 10) as f64,
                memory_mb: (i * 100) as f64,
            })
            .collect()
    }

    fn draw(renderer: &mut TableRenderer, rows: &[ProcessRecord]) -> String {
        let mut out = Vec::new();
        renderer.render(&mut out, rows, &app()).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn blank_line() -> String {
        " ".repeat(usize::from(WIDTH))
    }

    fn ansi(command: impl Command) -> String {
        let mut out = Vec::new();
        queue!(out, command).unwrap();
        String::from_utf8(out).unwrap()
    }

    /// Cursor position escape for zero-based terminal line `y`
    fn move_to(y: u16) -> String {
        format!("\x1b[{};1H", y + 1)
    }

    #[test]
    fn test_region_below_header() {
        let region = Region::below_header(4, 80, 24);
        assert_eq!(region, Region { top: 4, height: 19, width: 80 });

        let tiny = Region::below_header(4, 80, 3);
        assert_eq!(tiny, Region { top: 2, height: 1, width: 80 });

        let exact = Region::below_header(24, 80, 24);
        assert_eq!(exact.top, 23);
    }

    #[test]
    fn test_first_frame_blanks_whole_region() {
        let mut renderer = TableRenderer::new(Region { top: 3, height: 10, width: WIDTH });
        let text = draw(&mut renderer, &records(4));

        assert_eq!(text.matches(&blank_line()).count(), 6);
        for i in 0..4 {
            assert!(text.contains(&format!("proc-{i}")));
        }
    }

    #[test]
    fn test_stale_rows_blanked_exactly() {
        let mut renderer = TableRenderer::new(Region { top: 3, height: 20, width: WIDTH });
        draw(&mut renderer, &records(10));

        let text = draw(&mut renderer, &records(7));

        assert_eq!(text.matches(&blank_line()).count(), 3);
        for line in [10, 11, 12] {
            assert!(text.contains(&move_to(line)), "line {line} not rewritten");
        }
        assert!(!text.contains(&move_to(13)));
    }

    #[test]
    fn test_rerender_is_identical() {
        let mut renderer = TableRenderer::new(Region { top: 2, height: 8, width: WIDTH });
        let rows = records(5);

        let first = draw(&mut renderer, &rows);
        let second = draw(&mut renderer, &rows);
        let third = draw(&mut renderer, &rows);

        assert_eq!(second, third);
        assert!(first.starts_with(&second));
        assert!(!second.contains(&blank_line()));
    }

    #[test]
    fn test_rows_clipped_to_region() {
        let mut renderer = TableRenderer::new(Region { top: 0, height: 3, width: WIDTH });
        let text = draw(&mut renderer, &records(6));

        assert!(text.contains("proc-2"));
        assert!(!text.contains("proc-3"));
        assert!(!text.contains(&move_to(3)));
    }

    #[test]
    fn test_long_names_truncated() {
        let mut renderer = TableRenderer::new(Region { top: 0, height: 1, width: WIDTH });
        let mut rows = records(1);
        rows[0].name = "a-really-long-process-name-that-keeps-going.exe".to_string();

        let text = draw(&mut renderer, &rows);

        assert!(text.contains("a-really-long-process-nam..."));
        assert!(!text.contains("keeps-going"));
    }

    #[test]
    fn test_cells_coloured_by_band() {
        let mut renderer = TableRenderer::new(Region { top: 0, height: 1, width: WIDTH });
        let rows = vec![ProcessRecord {
            pid: 1,
            name: "hot".to_string(),
            cpu_percent: 97.0,
            memory_mb: 10.0,
        }];

        let text = draw(&mut renderer, &rows);

        // red background on the CPU cell, default pair (black / cyan) on memory
        assert!(text.contains(&ansi(SetBackgroundColor(Color::Red))));
        assert!(text.contains(&ansi(SetForegroundColor(Color::Cyan))));
        assert!(text.contains("97.0%"));
        assert!(text.contains("10.0 MB"));
    }

    #[test]
    fn test_memory_cell_coloured_by_share_of_total() {
        let mut renderer = TableRenderer::new(Region { top: 0, height: 1, width: WIDTH });
        // 600 of 1024 MB is about 58.6%, inside the 49% band
        let rows = vec![ProcessRecord {
            pid: 1,
            name: "big".to_string(),
            cpu_percent: 0.0,
            memory_mb: 600.0,
        }];

        let text = draw(&mut renderer, &rows);

        assert!(text.contains(&ansi(SetBackgroundColor(Color::DarkGreen))));
        assert!(!text.contains(&ansi(SetBackgroundColor(Color::Red))));
        assert!(text.contains("600.0 MB"));
    }

    #[test]
    fn test_error_then_recovery() {
        let mut renderer = TableRenderer::new(Region { top: 1, height: 5, width: WIDTH });
        draw(&mut renderer, &records(4));

        let mut out = Vec::new();
        renderer.render_error(&mut out, "boom").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Error: boom"));
        assert_eq!(text.matches(&blank_line()).count(), 3);

        let text = draw(&mut renderer, &records(2));
        assert!(text.contains("proc-1"));
        assert!(!text.contains(&blank_line()));
    }

    #[test]
    fn test_finish_writes_notice_below_region() {
        let mut renderer = TableRenderer::new(Region { top: 2, height: 5, width: WIDTH });
        let mut out = Vec::new();
        renderer.finish(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains(&move_to(7)));
        assert!(text.contains(EXIT_NOTICE));
    }
}
