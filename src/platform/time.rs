//! Fixed-rate tick pacing

use std::thread;
use std::time::{Duration, Instant};

/// Paces the loop and performs blocking holds
pub trait Clock {
    /// Block until the next tick boundary
    fn wait_for_next_tick(&mut self);

    /// Block for `duration`; nothing is processed meanwhile
    fn hold(&mut self, duration: Duration);
}

/// Wall-clock pacing at a fixed tick rate
#[derive(Debug)]
pub struct TickClock {
    period: Duration,
    next: Instant,
}

impl TickClock {
    pub fn new(tick_rate: u32) -> Self {
        let period = Duration::from_secs(1) / tick_rate.max(1);
        Self {
            period,
            next: Instant::now() + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Clock for TickClock {
    fn wait_for_next_tick(&mut self) {
        let now = Instant::now();
        if self.next > now {
            thread::sleep(self.next - now);
            self.next += self.period;
        } else {
            // Fell behind: don't try to catch up with a burst of ticks
            self.next = now + self.period;
        }
    }

    fn hold(&mut self, duration: Duration) {
        thread::sleep(duration);
        self.next = Instant::now() + self.period;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_from_rate() {
        assert_eq!(TickClock::new(50).period(), Duration::from_millis(20));
        assert_eq!(TickClock::new(0).period(), Duration::from_secs(1));
    }

    #[test]
    fn test_waits_roughly_one_period() {
        let mut clock = TickClock::new(100);
        let start = Instant::now();
        for _ in 0..3 {
            clock.wait_for_next_tick();
        }
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
