//! Coil pin sets
//!
//! Each variant owns exactly as many pins as its wiring uses, so a
//! stepper can never address a pin slot its wiring does not have.

use embedded_hal::digital::{OutputPin, PinState};
use heapless::Vec;

use cadence_core::config::MAX_WIRES;
use cadence_core::sequence::WireCount;
use cadence_core::traits::StepperError;

/// Output pins for one motor, tagged by wiring
#[derive(Debug)]
pub enum Coils<P> {
    /// Two control wires (C0, C1)
    Two([P; 2]),
    /// Four control wires (C0..C3)
    Four([P; 4]),
    /// Five control wires (C0..C4)
    Five([P; 5]),
}

impl<P> Coils<P> {
    /// Two-wire set
    pub fn two(c0: P, c1: P) -> Self {
        Coils::Two([c0, c1])
    }

    /// Four-wire set
    pub fn four(c0: P, c1: P, c2: P, c3: P) -> Self {
        Coils::Four([c0, c1, c2, c3])
    }

    /// Five-wire set
    pub fn five(c0: P, c1: P, c2: P, c3: P, c4: P) -> Self {
        Coils::Five([c0, c1, c2, c3, c4])
    }

    /// Build a pin set from a wire count and a pin sequence
    ///
    /// # Errors
    /// `InvalidWiring` if the sequence is shorter or longer than the
    /// wire count. No pin is written either way.
    pub fn from_pins<I>(wiring: WireCount, pins: I) -> Result<Self, StepperError>
    where
        I: IntoIterator<Item = P>,
    {
        let mut pins = pins.into_iter();
        let coils = match wiring {
            WireCount::Two => match (pins.next(), pins.next()) {
                (Some(c0), Some(c1)) => Coils::two(c0, c1),
                _ => return Err(StepperError::InvalidWiring),
            },
            WireCount::Four => match (pins.next(), pins.next(), pins.next(), pins.next()) {
                (Some(c0), Some(c1), Some(c2), Some(c3)) => Coils::four(c0, c1, c2, c3),
                _ => return Err(StepperError::InvalidWiring),
            },
            WireCount::Five => match (
                pins.next(),
                pins.next(),
                pins.next(),
                pins.next(),
                pins.next(),
            ) {
                (Some(c0), Some(c1), Some(c2), Some(c3), Some(c4)) => {
                    Coils::five(c0, c1, c2, c3, c4)
                }
                _ => return Err(StepperError::InvalidWiring),
            },
        };

        if pins.next().is_some() {
            return Err(StepperError::InvalidWiring);
        }
        Ok(coils)
    }

    /// Wiring of this pin set
    pub fn wiring(&self) -> WireCount {
        match self {
            Coils::Two(_) => WireCount::Two,
            Coils::Four(_) => WireCount::Four,
            Coils::Five(_) => WireCount::Five,
        }
    }

    /// Pins in column order
    pub fn pins(&self) -> &[P] {
        match self {
            Coils::Two(pins) => pins,
            Coils::Four(pins) => pins,
            Coils::Five(pins) => pins,
        }
    }

    fn pins_mut(&mut self) -> &mut [P] {
        match self {
            Coils::Two(pins) => pins,
            Coils::Four(pins) => pins,
            Coils::Five(pins) => pins,
        }
    }

    /// Take the pins back, in column order
    pub fn into_pins(self) -> Vec<P, MAX_WIRES> {
        match self {
            Coils::Two(pins) => pins.into_iter().collect(),
            Coils::Four(pins) => pins.into_iter().collect(),
            Coils::Five(pins) => pins.into_iter().collect(),
        }
    }
}

impl<P: OutputPin> Coils<P> {
    /// Drive the table row for `step_index`
    pub fn apply_phase(&mut self, step_index: u32) -> Result<(), StepperError> {
        let pattern = self.wiring().pattern(step_index);
        self.write(pattern.iter().copied())
    }

    /// Drive every coil low
    pub fn de_energize(&mut self) -> Result<(), StepperError> {
        let wires = self.wiring().pins();
        self.write(core::iter::repeat(false).take(wires))
    }

    fn write(&mut self, levels: impl Iterator<Item = bool>) -> Result<(), StepperError> {
        for (pin, high) in self.pins_mut().iter_mut().zip(levels) {
            pin.set_state(PinState::from(high))
                .map_err(|_| StepperError::PinWrite)?;
        }
        Ok(())
    }
}
