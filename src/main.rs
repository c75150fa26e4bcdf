//! Process Monitor
//!
//! A terminal process monitor that lists running processes with their CPU
//! and memory usage, colour-coded by configurable thresholds. The table is
//! redrawn in place roughly once a second.
//!
//! Controls:
//! - Q: Quit (Ctrl+C also quits)
//! - C: Sort by CPU
//! - M: Sort by memory
//! - D: Descending order
//! - A: Ascending order

mod app;
mod config;
mod constants;
#[cfg(windows)]
mod ffi;
mod logging;
mod system;
mod ui;

use std::io::{self, Write};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor::{self, Hide, MoveTo, Show},
    execute,
    terminal::{self, Clear, ClearType, DisableLineWrap, EnableLineWrap},
};

use app::{App, Args, Monitor, TerminalKeys};
use constants::SAMPLE_INTERVAL_MS;
use system::{logical_cpu_count, memory::resolve_total_memory_mb, Sampler, SystemClock};
use ui::{render_header, Region, TableRenderer};

/// Raw mode and a hidden cursor for as long as it lives.
struct TerminalGuard;

impl TerminalGuard {
    fn enter<W: Write>(out: &mut W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = TerminalGuard;
        execute!(out, DisableLineWrap, Hide)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, EnableLineWrap);
        let _ = terminal::disable_raw_mode();
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log {
        logging::init_logger(log::LevelFilter::Debug, path)
            .with_context(|| format!("could not open log file {}", path.display()))?;
    }

    let config = config::load(args.config.as_deref());

    let mut source = system::host_source();
    let total_memory_mb = resolve_total_memory_mb(&mut source);
    let sampler = Sampler::new(
        Duration::from_millis(SAMPLE_INTERVAL_MS),
        logical_cpu_count(),
    );
    log::info!(
        "starting: {:?} interval, {} logical cpus, {:.0} MB physical memory",
        sampler.interval(),
        sampler.cores(),
        total_memory_mb
    );

    let app = App::new(args.initial_sort(), config.palette, total_memory_mb, sampler);

    let mut stdout = io::stdout();
    let _guard = TerminalGuard::enter(&mut stdout).context("could not set up the terminal")?;

    execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
    let (columns, rows) = terminal::size()?;
    render_header(&mut stdout, usize::from(columns), config.diagnostic.as_deref())?;

    let (_, top) = cursor::position()?;
    let region = Region::below_header(top, columns, rows);
    log::debug!("table region: {region:?}");

    let mut monitor = Monitor::new(
        app,
        source,
        TerminalKeys,
        SystemClock,
        stdout,
        TableRenderer::new(region),
    );
    monitor.run();

    log::info!("process monitor closed");
    Ok(())
}
