//! Cadence - Table-Driven Stepper Sequencer Firmware
//!
//! Drives a 2-, 4- or 5-wire stepper motor straight from RP2040 GPIO
//! through a transistor array or H-bridge. The motor, its wiring and the
//! motion to run are described in `stepper.toml`, embedded at build time.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use {defmt_rtt as _, panic_probe as _};

use cadence_core::config::{parse_config, BoardConfig};
use cadence_core::traits::StepperDriver;
use cadence_drivers::{Coils, PhaseStepper, SpinGate};

use crate::clock::EmbassyClock;

/// Embedded configuration (compiled into firmware)
/// Edit stepper.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../stepper.toml");

/// GPIO numbers wired to the driver inputs, in column order
const BOARD_COIL_PINS: [u8; 5] = [2, 3, 4, 5, 6];

mod clock;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Cadence firmware starting...");

    let p = embassy_rp::init(Default::default());

    let config = match load_config() {
        Some(config) => config,
        None => {
            error!("No usable stepper configuration, halting");
            return;
        }
    };

    // Outputs start low so no coil is energized before the first step
    let outputs = [
        Output::new(p.PIN_2, Level::Low),
        Output::new(p.PIN_3, Level::Low),
        Output::new(p.PIN_4, Level::Low),
        Output::new(p.PIN_5, Level::Low),
        Output::new(p.PIN_6, Level::Low),
    ];
    let wires = config.stepper.wiring.pins();

    let coils = match Coils::from_pins(config.stepper.wiring, outputs.into_iter().take(wires)) {
        Ok(coils) => coils,
        Err(e) => {
            error!("Failed to assign coil pins: {}", e);
            return;
        }
    };

    let mut stepper = match PhaseStepper::new(
        coils,
        config.stepper.steps_per_revolution,
        EmbassyClock,
        SpinGate,
    ) {
        Ok(stepper) => stepper,
        Err(e) => {
            error!("Failed to configure stepper: {}", e);
            return;
        }
    };

    if let Err(e) = stepper.set_speed(config.stepper.rpm) {
        error!("Invalid speed {} rpm: {}", config.stepper.rpm, e);
        return;
    }

    info!(
        "Stepper '{}' ready at {} rpm",
        config.stepper.name.as_str(),
        config.stepper.rpm
    );

    spawner.spawn(tasks::stepper_task(stepper, config.sweep)).unwrap();
}

/// Parse and validate the embedded configuration
fn load_config() -> Option<BoardConfig> {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to parse stepper.toml: {}", e);
            return None;
        }
    };

    if let Err(e) = config.stepper.validate() {
        error!("Invalid stepper configuration: {}", e);
        return None;
    }

    // The board routes fixed GPIOs to the driver; the config must name them
    let expected = &BOARD_COIL_PINS[..config.stepper.wiring.pins()];
    let matches_board = config
        .stepper
        .pins
        .iter()
        .zip(expected)
        .all(|(pin, &gpio)| pin.pin == gpio);
    if !matches_board {
        error!(
            "stepper.toml pins do not match board wiring (expected GPIO{})",
            expected
        );
        return None;
    }

    info!(
        "Config loaded: {} wires, {} steps/rev, sweep {} steps",
        config.stepper.wiring,
        config.stepper.steps_per_revolution,
        config.sweep.steps
    );
    Some(config)
}
