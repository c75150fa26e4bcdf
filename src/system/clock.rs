//! Time source for the monitor's intentional waits

use std::thread;
use std::time::Duration;

/// Something that can block the loop for a while.
///
/// The sampler's measurement interval and the pause after a failed cycle
/// both go through this, so tests can run the loop without real sleeps.
pub trait Clock {
    fn sleep(&mut self, duration: Duration);
}

/// Wall-clock implementation backed by `thread::sleep`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}
