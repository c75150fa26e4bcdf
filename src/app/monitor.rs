//! The sample -> rank -> render -> poll loop
//!
//! One cycle walks `Sampling -> Ranking -> Rendering -> PollingInput` and
//! then starts over, until the user quits. Rendering and input failures are
//! shown in the table region, followed by a pause, and never end the loop.

use std::io::{self, Write};
use std::time::Duration;

use thiserror::Error;

use crate::constants::ERROR_PAUSE_MS;
use crate::system::{Clock, ProcessSource};
use crate::ui::TableRenderer;

use super::{poll_and_apply, rank, App, KeyAction, KeySource, ProcessRecord};

/// A failure that aborted the current cycle
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("failed to draw the process table: {0}")]
    Render(#[source] io::Error),

    #[error("failed to read keyboard input: {0}")]
    Input(#[source] io::Error),
}

/// Where the loop is within a cycle
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Sampling,
    Ranking(Vec<ProcessRecord>),
    Rendering(Vec<ProcessRecord>),
    PollingInput,
    Terminated,
}

/// Loop driver owning the state and every collaborator of a run
pub struct Monitor<S, K, C, W> {
    pub app: App,
    source: S,
    keys: K,
    clock: C,
    out: W,
    renderer: TableRenderer,
    phase: Phase,
}

impl<S, K, C, W> Monitor<S, K, C, W>
where
    S: ProcessSource,
    K: KeySource,
    C: Clock,
    W: Write,
{
    pub fn new(app: App, source: S, keys: K, clock: C, out: W, renderer: TableRenderer) -> Self {
        Self {
            app,
            source,
            keys,
            clock,
            out,
            renderer,
            phase: Phase::Sampling,
        }
    }

    #[cfg(test)]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Runs cycles until the user quits.
    pub fn run(&mut self) {
        while self.phase != Phase::Terminated {
            self.step();
        }
    }

    /// Advances the loop by one phase.
    pub fn step(&mut self) {
        let phase = std::mem::replace(&mut self.phase, Phase::Terminated);

        self.phase = match phase {
            Phase::Sampling => Phase::Ranking(self.sample()),
            Phase::Ranking(records) => Phase::Rendering(rank(records, self.app.sort)),
            Phase::Rendering(records) => {
                match self.renderer.render(&mut self.out, &records, &self.app) {
                    Ok(()) => Phase::PollingInput,
                    Err(err) => self.recover(CycleError::Render(err)),
                }
            }
            Phase::PollingInput => match poll_and_apply(&mut self.keys, &mut self.app.sort) {
                Ok(KeyAction::Continue) => Phase::Sampling,
                Ok(KeyAction::Exit) => self.terminate(),
                Err(err) => self.recover(CycleError::Input(err)),
            },
            Phase::Terminated => Phase::Terminated,
        };
    }

    /// Consumes the monitor, handing back its output sink.
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    fn sample(&mut self) -> Vec<ProcessRecord> {
        let sampler = self.app.sampler;
        sampler
            .sample(&mut self.source, &mut self.clock)
            .iter()
            .map(|sample| ProcessRecord::from_sample(sample, &sampler))
            .collect()
    }

    fn recover(&mut self, err: CycleError) -> Phase {
        log::error!("{err}");

        if let Err(draw_err) = self.renderer.render_error(&mut self.out, &err.to_string()) {
            log::error!("could not report cycle failure: {draw_err}");
        }

        self.clock.sleep(Duration::from_millis(ERROR_PAUSE_MS));
        Phase::Sampling
    }

    fn terminate(&mut self) -> Phase {
        log::info!("quit requested");

        if let Err(err) = self.renderer.finish(&mut self.out) {
            log::error!("could not restore terminal colours: {err}");
        }

        Phase::Terminated
    }
}
