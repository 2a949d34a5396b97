//! Pacing gates
//!
//! A gate is what the stepper does while the next step is not yet
//! permitted. The decision itself is always made by comparing clock
//! readings, so swapping the gate changes CPU usage but not step timing.
//!
//! - [`SpinGate`]: polls the clock in a tight loop. Suited to bare control
//!   loops with nothing else to run.
//! - [`DelayGate`]: sleeps for the remaining interval through an
//!   `embedded_hal::delay::DelayNs` provider, then re-checks the clock.

use embedded_hal::delay::DelayNs;

/// Wait strategy used between steps
pub trait PacingGate {
    /// Called when `remaining_us` microseconds are left before the next step
    ///
    /// Implementations may return early; the caller re-reads the clock and
    /// calls again if the delay has not elapsed.
    fn wait(&mut self, remaining_us: u32);
}

/// Busy-wait gate
#[derive(Debug, Clone, Copy, Default)]
pub struct SpinGate;

impl PacingGate for SpinGate {
    fn wait(&mut self, _remaining_us: u32) {
        core::hint::spin_loop();
    }
}

/// Sleeping gate backed by a blocking delay provider
#[derive(Debug)]
pub struct DelayGate<D> {
    delay: D,
}

impl<D: DelayNs> DelayGate<D> {
    /// Create a gate that sleeps with `delay`
    pub fn new(delay: D) -> Self {
        Self { delay }
    }

    /// Give back the delay provider
    pub fn into_inner(self) -> D {
        self.delay
    }
}

impl<D: DelayNs> PacingGate for DelayGate<D> {
    fn wait(&mut self, remaining_us: u32) {
        self.delay.delay_us(remaining_us);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MockDelay {
        total_ns: u64,
        calls: u32,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += ns as u64;
            self.calls += 1;
        }
    }

    #[test]
    fn test_delay_gate_sleeps_remaining_interval() {
        let mut gate = DelayGate::new(MockDelay::default());

        gate.wait(1500);
        gate.wait(250);

        let delay = gate.into_inner();
        assert_eq!(delay.total_ns, 1_750_000);
        assert_eq!(delay.calls, 2);
    }

    #[test]
    fn test_spin_gate_returns() {
        let mut gate = SpinGate;
        gate.wait(u32::MAX);
    }
}
