//! Monotonic benchmark clock.
//!
//! Wraps `std::time::Instant` behind a single nanosecond counter anchored at
//! first use, so measurement code only ever deals in `u64` nanoseconds.

use std::sync::OnceLock;
use std::time::Instant;

static EPOCH: OnceLock<Instant> = OnceLock::new();

/// Current monotonic time in nanoseconds since the process anchor.
///
/// Never returns 0; a zero end time is the clock's not-yet-recorded
/// sentinel.
#[inline]
pub fn now() -> u64 {
    EPOCH.get_or_init(Instant::now).elapsed().as_nanos() as u64 + 1
}

/// Records the start and end instants of one measurement section.
#[derive(Debug, Clone, Copy, Default)]
pub struct BenchmarkClock {
    start: u64,
    end: u64,
}

impl BenchmarkClock {
    /// Fresh clock with no recorded instants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the start of a measurement section, discarding any previously
    /// recorded end.
    #[inline]
    pub fn record_start(&mut self) {
        self.end = 0;
        self.start = now();
    }

    /// Mark the end of the current measurement section.
    #[inline]
    pub fn record_end(&mut self) {
        self.end = now();
    }

    /// Whether an end instant has been recorded since the last start.
    #[inline]
    pub fn end_recorded(&self) -> bool {
        self.end != 0
    }

    /// Elapsed nanoseconds between the recorded start and end.
    #[inline]
    pub fn elapsed(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_now_is_monotonic() {
        let a = now();
        let b = now();
        assert!(b >= a);
        assert!(a > 0);
    }

    #[test]
    fn test_clock_elapsed() {
        let mut clock = BenchmarkClock::new();
        clock.record_start();
        std::thread::sleep(Duration::from_millis(5));
        clock.record_end();

        assert!(clock.end_recorded());
        assert!(clock.elapsed() >= 1_000_000);
    }

    #[test]
    fn test_record_start_clears_end() {
        let mut clock = BenchmarkClock::new();
        clock.record_start();
        clock.record_end();
        assert!(clock.end_recorded());

        clock.record_start();
        assert!(!clock.end_recorded());
    }
}
