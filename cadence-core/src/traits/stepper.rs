//! Stepper motor driver trait
//!
//! This trait abstracts over table-sequenced stepper drivers so that
//! application code (sweeps, demos, host tests) does not depend on the
//! concrete pin and clock types.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::sequence::SEQUENCER_VERSION;

/// Motor rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Step index increases
    Forward,
    /// Step index decreases
    Reverse,
}

impl Direction {
    /// Direction implied by a signed step count
    ///
    /// Returns `None` for zero, which must leave the current direction alone.
    pub fn from_steps(steps: i32) -> Option<Self> {
        match steps {
            s if s > 0 => Some(Direction::Forward),
            s if s < 0 => Some(Direction::Reverse),
            _ => None,
        }
    }

    /// Get the opposite direction
    pub fn opposite(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }
}

/// Errors that can occur with stepper operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepperError {
    /// Pin count does not match the wire count
    InvalidWiring,
    /// Speed must be a positive RPM
    InvalidSpeed,
    /// Steps per revolution must be positive
    InvalidStepsPerRevolution,
    /// The output pin reported a write failure
    PinWrite,
}

impl fmt::Display for StepperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            StepperError::InvalidWiring => "pin count does not match wire count",
            StepperError::InvalidSpeed => "speed must be greater than zero rpm",
            StepperError::InvalidStepsPerRevolution => {
                "steps per revolution must be greater than zero"
            }
            StepperError::PinWrite => "failed to write output pin",
        };
        f.write_str(msg)
    }
}

/// Trait for table-sequenced stepper drivers
///
/// Motion is blocking: `move_steps` returns once every requested step has
/// been applied to the coils.
pub trait StepperDriver {
    /// Set the target speed in RPM
    ///
    /// Only the inter-step delay changes; the motor does not move.
    fn set_speed(&mut self, rpm: u32) -> Result<(), StepperError>;

    /// Get the configured speed, if one was set
    fn speed_rpm(&self) -> Option<u32>;

    /// Move by a signed number of steps
    ///
    /// Positive counts step forward, negative counts step in reverse and
    /// zero does nothing (the direction is left untouched).
    fn move_steps(&mut self, steps: i32) -> Result<(), StepperError>;

    /// Current position within one revolution
    fn step_index(&self) -> u32;

    /// Direction of the most recent non-zero move
    fn direction(&self) -> Option<Direction>;

    /// Revision of the sequencing tables in use
    fn version(&self) -> u8 {
        SEQUENCER_VERSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_steps() {
        assert_eq!(Direction::from_steps(3), Some(Direction::Forward));
        assert_eq!(Direction::from_steps(-1), Some(Direction::Reverse));
        assert_eq!(Direction::from_steps(i32::MIN), Some(Direction::Reverse));
        assert_eq!(Direction::from_steps(0), None);
    }

    #[test]
    fn test_direction_opposite() {
        assert_eq!(Direction::Forward.opposite(), Direction::Reverse);
        assert_eq!(Direction::Reverse.opposite(), Direction::Forward);
    }
}
