//! Embassy time driver as the step pacing clock

use cadence_core::traits::MonotonicClock;
use embassy_time::Instant;

/// Monotonic clock backed by the RP2040 timer
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl MonotonicClock for EmbassyClock {
    fn now_micros(&self) -> u64 {
        Instant::now().as_micros()
    }
}
