//! Monotonic time source
//!
//! Step pacing only ever compares two readings of the same clock, so the
//! epoch does not matter. The clock must never go backwards.

/// Monotonic microsecond clock
pub trait MonotonicClock {
    /// Current reading in microseconds
    fn now_micros(&self) -> u64;
}

impl<F> MonotonicClock for F
where
    F: Fn() -> u64,
{
    fn now_micros(&self) -> u64 {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    fn elapsed<C: MonotonicClock>(clock: &C, since: u64) -> u64 {
        clock.now_micros() - since
    }

    #[test]
    fn test_closure_clock() {
        let ticks = Cell::new(100u64);
        let clock = || ticks.get();

        assert_eq!(clock.now_micros(), 100);
        ticks.set(350);
        assert_eq!(elapsed(&clock, 100), 250);
    }
}
