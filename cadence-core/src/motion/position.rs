//! Position within one revolution
//!
//! The counter wraps in both directions: stepping forward past the last
//! step returns to zero, stepping back from zero lands on the last step.

use crate::traits::{Direction, StepperError};

/// Step index bounded by the motor's steps per revolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepCounter {
    index: u32,
    steps_per_revolution: u32,
}

impl StepCounter {
    /// Create a counter at step zero
    pub fn new(steps_per_revolution: u32) -> Result<Self, StepperError> {
        if steps_per_revolution == 0 {
            return Err(StepperError::InvalidStepsPerRevolution);
        }
        Ok(Self {
            index: 0,
            steps_per_revolution,
        })
    }

    /// Current step index, always below `steps_per_revolution`
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Steps in one full revolution
    pub fn steps_per_revolution(&self) -> u32 {
        self.steps_per_revolution
    }

    /// Change the revolution length, reducing the index into the new range
    pub fn set_steps_per_revolution(&mut self, steps_per_revolution: u32) -> Result<(), StepperError> {
        if steps_per_revolution == 0 {
            return Err(StepperError::InvalidStepsPerRevolution);
        }
        self.steps_per_revolution = steps_per_revolution;
        self.index %= steps_per_revolution;
        Ok(())
    }

    /// Move one step and return the new index
    pub fn advance(&mut self, direction: Direction) -> u32 {
        self.index = match direction {
            Direction::Forward => {
                if self.index + 1 >= self.steps_per_revolution {
                    0
                } else {
                    self.index + 1
                }
            }
            Direction::Reverse => {
                if self.index == 0 {
                    self.steps_per_revolution - 1
                } else {
                    self.index - 1
                }
            }
        };
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_steps_rejected() {
        assert_eq!(
            StepCounter::new(0),
            Err(StepperError::InvalidStepsPerRevolution)
        );
    }

    #[test]
    fn test_forward_wraps_to_zero() {
        let mut counter = StepCounter::new(200).unwrap();
        for _ in 0..199 {
            counter.advance(Direction::Forward);
        }
        assert_eq!(counter.index(), 199);

        assert_eq!(counter.advance(Direction::Forward), 0);
    }

    #[test]
    fn test_reverse_wraps_to_last_step() {
        let mut counter = StepCounter::new(200).unwrap();
        assert_eq!(counter.advance(Direction::Reverse), 199);
        assert_eq!(counter.advance(Direction::Reverse), 198);
    }

    #[test]
    fn test_single_step_revolution() {
        let mut counter = StepCounter::new(1).unwrap();
        assert_eq!(counter.advance(Direction::Forward), 0);
        assert_eq!(counter.advance(Direction::Reverse), 0);
    }

    #[test]
    fn test_shrinking_revolution_reduces_index() {
        let mut counter = StepCounter::new(500).unwrap();
        for _ in 0..450 {
            counter.advance(Direction::Forward);
        }

        counter.set_steps_per_revolution(200).unwrap();
        assert_eq!(counter.index(), 50);
        assert_eq!(counter.steps_per_revolution(), 200);

        assert_eq!(
            counter.set_steps_per_revolution(0),
            Err(StepperError::InvalidStepsPerRevolution)
        );
        assert_eq!(counter.steps_per_revolution(), 200);
    }

    proptest! {
        #[test]
        fn index_stays_in_range(spr in 1u32..1000, moves in proptest::collection::vec(any::<bool>(), 0..500)) {
            let mut counter = StepCounter::new(spr).unwrap();
            for forward in moves {
                let dir = if forward { Direction::Forward } else { Direction::Reverse };
                prop_assert!(counter.advance(dir) < spr);
            }
        }

        #[test]
        fn forward_then_reverse_returns_home(spr in 1u32..1000, start in 0u32..1000, k in 0u32..2000) {
            let mut counter = StepCounter::new(spr).unwrap();
            for _ in 0..(start % spr) {
                counter.advance(Direction::Forward);
            }
            let origin = counter.index();

            for _ in 0..k {
                counter.advance(Direction::Forward);
            }
            for _ in 0..k {
                counter.advance(Direction::Reverse);
            }
            prop_assert_eq!(counter.index(), origin);
        }
    }
}
