//! Fixed-rate tick limiter.

use std::time::{Duration, Instant};

pub struct TickLimiter {
    period: Duration,
    tick_start: Instant,
    last_delta: Duration,
}

impl TickLimiter {
    pub fn new(fps: u32) -> Self {
        Self {
            period: Self::period_for(fps),
            tick_start: Instant::now(),
            last_delta: Duration::ZERO,
        }
    }

    pub fn period_for(fps: u32) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(fps.max(1)))
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Wall-clock length of the previous tick, sleep included.
    pub fn delta(&self) -> Duration {
        self.last_delta
    }

    /// Sleep out whatever is left of the current tick and start the next one.
    pub fn wait(&mut self) {
        let elapsed = self.tick_start.elapsed();
        if elapsed < self.period {
            std::thread::sleep(self.period - elapsed);
        }
        let now = Instant::now();
        self.last_delta = now - self.tick_start;
        self.tick_start = now;
    }
}
