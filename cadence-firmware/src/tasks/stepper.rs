//! Stepper sweep task
//!
//! Runs the configured back-and-forth motion on the phase-sequenced
//! stepper. Steps are awaited on the embassy timer, so other tasks keep
//! running between steps.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::{Delay, Duration, Timer};

use cadence_core::config::SweepConfig;
use cadence_core::traits::{StepperDriver, StepperError};
use cadence_drivers::{PhaseStepper, SpinGate};

use crate::clock::EmbassyClock;

/// Stepper type driven by this firmware
pub type FirmwareStepper = PhaseStepper<Output<'static>, EmbassyClock, SpinGate>;

/// Sweep task for the configured motor
///
/// Each cycle moves `steps` then `-steps`, pausing between legs.
#[embassy_executor::task]
pub async fn stepper_task(mut stepper: FirmwareStepper, sweep: SweepConfig) {
    info!(
        "Stepper task started: {} wires, {} steps/rev, {} us/step, sequencer v{}",
        stepper.wire_count(),
        stepper.steps_per_revolution(),
        stepper.step_delay_micros(),
        stepper.version()
    );

    if sweep.steps == 0 {
        warn!("Sweep of 0 steps configured, motor stays idle");
        return;
    }

    let mut delay = Delay;
    let mut cycle: u32 = 0;

    loop {
        if let Some(cycles) = sweep.cycles {
            if cycle >= cycles {
                break;
            }
        }

        for leg in [sweep.steps, -sweep.steps] {
            if let Err(e) = run_leg(&mut stepper, &mut delay, leg).await {
                error!("Sweep aborted: {}", e);
                return;
            }

            if sweep.release_between {
                if let Err(e) = stepper.de_energize() {
                    warn!("Failed to release coils: {}", e);
                }
            }
            Timer::after(Duration::from_millis(sweep.pause_ms as u64)).await;
        }

        cycle = cycle.wrapping_add(1);
        debug!("Sweep cycle {} complete", cycle);
    }

    info!("Sweep finished after {} cycles", cycle);
    if let Err(e) = stepper.de_energize() {
        warn!("Failed to release coils: {}", e);
    }
}

async fn run_leg(stepper: &mut FirmwareStepper, delay: &mut Delay, steps: i32) -> Result<(), StepperError> {
    trace!("Leg: {} steps", steps);
    stepper.move_steps_async(steps, delay).await?;
    debug!(
        "Leg done: index={} dir={:?}",
        stepper.step_index(),
        stepper.direction()
    );
    Ok(())
}
