//! Phase-sequenced stepper driver
//!
//! Drives unipolar, bipolar or five-phase motors directly from GPIO by
//! writing one commutation table row per step. Steps are paced against a
//! monotonic clock so that two consecutive steps are never closer than the
//! delay derived from the configured speed.
//!
//! # Usage
//!
//! ```ignore
//! let coils = Coils::four(in1, in2, in3, in4);
//! let mut stepper = PhaseStepper::new(coils, 200, clock, SpinGate)?;
//! stepper.set_speed(60)?;   // 5000 µs between steps
//! stepper.move_steps(200)?; // one revolution forward
//! stepper.move_steps(-50)?; // a quarter back
//! ```

use embedded_hal::digital::OutputPin;

use cadence_core::motion::{step_delay_micros, StepCounter};
use cadence_core::sequence::WireCount;
use cadence_core::traits::{Direction, MonotonicClock, StepperDriver, StepperError};

use super::coils::Coils;
use crate::pacing::PacingGate;

/// Stepper driven by a commutation table
///
/// Motion calls block the caller until every step has been written.
pub struct PhaseStepper<P, C, G> {
    coils: Coils<P>,
    clock: C,
    gate: G,
    counter: StepCounter,
    /// Direction of the last non-zero move (`None` before the first one)
    direction: Option<Direction>,
    /// Configured speed, kept so the delay can follow revolution changes
    rpm: Option<u32>,
    step_delay_us: u32,
    /// Clock reading at the most recent step
    last_step_us: u64,
}

impl<P, C, G> PhaseStepper<P, C, G>
where
    P: OutputPin,
    C: MonotonicClock,
    G: PacingGate,
{
    /// Create a stepper from a pin set
    ///
    /// The step index starts at zero and no speed is set, so steps run
    /// unpaced until [`set_speed`](Self::set_speed) is called. Pins are
    /// not driven until the first step.
    pub fn new(
        coils: Coils<P>,
        steps_per_revolution: u32,
        clock: C,
        gate: G,
    ) -> Result<Self, StepperError> {
        let counter = StepCounter::new(steps_per_revolution)?;
        let last_step_us = clock.now_micros();
        Ok(Self {
            coils,
            clock,
            gate,
            counter,
            direction: None,
            rpm: None,
            step_delay_us: 0,
            last_step_us,
        })
    }

    /// Create a stepper from a wire count and a pin sequence
    ///
    /// # Errors
    /// - `InvalidWiring` if the number of pins differs from `wiring`
    /// - `InvalidStepsPerRevolution` if `steps_per_revolution` is zero
    pub fn configure<I>(
        wiring: WireCount,
        pins: I,
        steps_per_revolution: u32,
        clock: C,
        gate: G,
    ) -> Result<Self, StepperError>
    where
        I: IntoIterator<Item = P>,
    {
        let coils = Coils::from_pins(wiring, pins)?;
        Self::new(coils, steps_per_revolution, clock, gate)
    }

    /// Wiring in use
    pub fn wire_count(&self) -> WireCount {
        self.coils.wiring()
    }

    /// Steps in one revolution
    pub fn steps_per_revolution(&self) -> u32 {
        self.counter.steps_per_revolution()
    }

    /// Change the motor's steps per revolution
    ///
    /// The step index is reduced into the new range and, if a speed was
    /// set, the step delay is recomputed for it.
    pub fn set_steps_per_revolution(&mut self, steps_per_revolution: u32) -> Result<(), StepperError> {
        let delay = match self.rpm {
            Some(rpm) => Some(step_delay_micros(steps_per_revolution, rpm)?),
            None => None,
        };
        self.counter.set_steps_per_revolution(steps_per_revolution)?;
        if let Some(delay) = delay {
            self.step_delay_us = delay;
        }
        Ok(())
    }

    /// Minimum microseconds between two steps
    pub fn step_delay_micros(&self) -> u32 {
        self.step_delay_us
    }

    /// Write the table row for `step_index` to the pins
    pub fn apply_phase(&mut self, step_index: u32) -> Result<(), StepperError> {
        self.coils.apply_phase(step_index)
    }

    /// Drive every coil low, releasing holding torque
    pub fn de_energize(&mut self) -> Result<(), StepperError> {
        self.coils.de_energize()
    }

    /// Take exactly one step, waiting on the gate until it is permitted
    ///
    /// Returns the new step index.
    pub fn step_once(&mut self, direction: Direction) -> Result<u32, StepperError> {
        self.direction = Some(direction);
        loop {
            let now = self.clock.now_micros();
            match self.remaining_delay(now) {
                Some(remaining) => self.gate.wait(remaining),
                None => return self.take_step(now, direction),
            }
        }
    }

    /// Async variant of [`move_steps`](StepperDriver::move_steps)
    ///
    /// Instead of the gate, waits by awaiting `delay`, so other tasks can
    /// run between steps. The clock still decides when a step is permitted.
    pub async fn move_steps_async<D>(&mut self, steps: i32, delay: &mut D) -> Result<(), StepperError>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        let Some(direction) = Direction::from_steps(steps) else {
            return Ok(());
        };
        self.direction = Some(direction);

        let mut steps_left = steps.unsigned_abs();
        while steps_left > 0 {
            let now = self.clock.now_micros();
            match self.remaining_delay(now) {
                Some(remaining) => delay.delay_us(remaining).await,
                None => {
                    self.take_step(now, direction)?;
                    steps_left -= 1;
                }
            }
        }
        Ok(())
    }

    /// Give back the pins, clock and gate
    pub fn release(self) -> (Coils<P>, C, G) {
        (self.coils, self.clock, self.gate)
    }

    /// Microseconds until the next step is permitted, `None` if it is now
    fn remaining_delay(&self, now: u64) -> Option<u32> {
        let elapsed = now.saturating_sub(self.last_step_us);
        let delay = self.step_delay_us as u64;
        if elapsed >= delay {
            None
        } else {
            Some((delay - elapsed) as u32)
        }
    }

    fn take_step(&mut self, now: u64, direction: Direction) -> Result<u32, StepperError> {
        self.last_step_us = now;
        let index = self.counter.advance(direction);
        self.coils.apply_phase(index)?;
        Ok(index)
    }
}

impl<P, C, G> StepperDriver for PhaseStepper<P, C, G>
where
    P: OutputPin,
    C: MonotonicClock,
    G: PacingGate,
{
    fn set_speed(&mut self, rpm: u32) -> Result<(), StepperError> {
        self.step_delay_us = step_delay_micros(self.counter.steps_per_revolution(), rpm)?;
        self.rpm = Some(rpm);
        Ok(())
    }

    fn speed_rpm(&self) -> Option<u32> {
        self.rpm
    }

    fn move_steps(&mut self, steps: i32) -> Result<(), StepperError> {
        let Some(direction) = Direction::from_steps(steps) else {
            return Ok(());
        };

        let mut steps_left = steps.unsigned_abs();
        while steps_left > 0 {
            self.step_once(direction)?;
            steps_left -= 1;
        }
        Ok(())
    }

    fn step_index(&self) -> u32 {
        self.counter.index()
    }

    fn direction(&self) -> Option<Direction> {
        self.direction
    }
}
