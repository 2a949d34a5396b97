//! Configuration type definitions
//!
//! A `StepperConfig` describes one motor: how it is wired, how many steps
//! make a revolution and how fast it should turn. Firmware builds it from
//! `stepper.toml`; host code can build it directly.

use heapless::{String, Vec};

use crate::motion::step_delay_micros;
use crate::sequence::WireCount;
use crate::traits::StepperError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum label length
pub const MAX_LABEL_LEN: usize = 16;

/// Maximum control wires per motor
pub const MAX_WIRES: usize = 5;

/// Default full steps per revolution (1.8° motors)
pub const DEFAULT_STEPS_PER_REVOLUTION: u32 = 200;

/// Default speed in RPM
pub const DEFAULT_RPM: u32 = 90;

/// Output pin assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self { pin }
    }
}

/// Stepper motor configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StepperConfig {
    /// Stepper name (e.g., "dial", "feeder")
    pub name: String<MAX_LABEL_LEN>,
    /// Number of control wires
    pub wiring: WireCount,
    /// Control pins in phase-table column order
    pub pins: Vec<PinConfig, MAX_WIRES>,
    /// Full steps per motor revolution
    pub steps_per_revolution: u32,
    /// Target speed in RPM
    pub rpm: u32,
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            wiring: WireCount::Four,
            pins: Vec::new(),
            steps_per_revolution: DEFAULT_STEPS_PER_REVOLUTION,
            rpm: DEFAULT_RPM,
        }
    }
}

impl StepperConfig {
    /// Check the configuration before any pin is touched
    ///
    /// Pins must match the wire count and must not repeat, since a pin
    /// can only be owned by one coil.
    pub fn validate(&self) -> Result<(), StepperError> {
        if self.pins.len() != self.wiring.pins() {
            return Err(StepperError::InvalidWiring);
        }
        for (i, pin) in self.pins.iter().enumerate() {
            if self.pins[i + 1..].contains(pin) {
                return Err(StepperError::InvalidWiring);
            }
        }
        self.step_delay_micros().map(|_| ())
    }

    /// Step delay implied by this configuration
    pub fn step_delay_micros(&self) -> Result<u32, StepperError> {
        step_delay_micros(self.steps_per_revolution, self.rpm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_wire(pins: &[u8]) -> StepperConfig {
        let mut config = StepperConfig::default();
        for &pin in pins {
            config.pins.push(PinConfig::new(pin)).unwrap();
        }
        config
    }

    #[test]
    fn test_default_config() {
        let config = StepperConfig::default();
        assert_eq!(config.wiring, WireCount::Four);
        assert_eq!(config.steps_per_revolution, 200);
        assert_eq!(config.rpm, 90);
        assert!(config.pins.is_empty());
    }

    #[test]
    fn test_valid_config() {
        let config = four_wire(&[2, 3, 4, 5]);
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.step_delay_micros(), Ok(3333));
    }

    #[test]
    fn test_pin_count_mismatch() {
        let config = four_wire(&[2, 3, 4]);
        assert_eq!(config.validate(), Err(StepperError::InvalidWiring));

        let mut config = four_wire(&[2, 3, 4, 5]);
        config.wiring = WireCount::Five;
        assert_eq!(config.validate(), Err(StepperError::InvalidWiring));
    }

    #[test]
    fn test_duplicate_pin() {
        let config = four_wire(&[2, 3, 2, 5]);
        assert_eq!(config.validate(), Err(StepperError::InvalidWiring));
    }

    #[test]
    fn test_invalid_speed() {
        let mut config = four_wire(&[2, 3, 4, 5]);
        config.rpm = 0;
        assert_eq!(config.validate(), Err(StepperError::InvalidSpeed));

        config.rpm = 60;
        config.steps_per_revolution = 0;
        assert_eq!(
            config.validate(),
            Err(StepperError::InvalidStepsPerRevolution)
        );
    }
}
