//! Fixed-interval tick scheduling
//!
//! The host reports elapsed wall time; the clock answers how many fixed ticks
//! are due. Nothing runs on its own thread.

use std::time::Duration;

/// Accumulator-driven fixed-interval scheduler
#[derive(Debug, Clone)]
pub struct TickClock {
    interval: Duration,
    max_catch_up: u32,
    accumulator: Duration,
    running: bool,
}

impl TickClock {
    pub fn new(interval: Duration, max_catch_up: u32) -> Self {
        Self {
            interval,
            max_catch_up: max_catch_up.max(1),
            accumulator: Duration::ZERO,
            running: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop ticking and forget any partially accumulated time
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = Duration::ZERO;
    }

    /// Add elapsed time and return the number of ticks now due
    pub fn due_ticks(&mut self, elapsed: Duration) -> u32 {
        if !self.running || self.interval.is_zero() {
            return 0;
        }

        self.accumulator += elapsed;
        let mut ticks = 0;
        while self.accumulator >= self.interval && ticks < self.max_catch_up {
            self.accumulator -= self.interval;
            ticks += 1;
        }

        // Host stalled: drop the backlog instead of spiralling
        if self.accumulator >= self.interval {
            log::debug!(
                "Dropping {:?} of tick backlog after {} catch-up ticks",
                self.accumulator,
                ticks
            );
            self.accumulator = Duration::ZERO;
        }

        ticks
    }
}
