//! Speed to step delay conversion

use crate::traits::StepperError;

/// Microseconds in one minute
pub const MICROS_PER_MINUTE: u32 = 60 * 1000 * 1000;

/// Minimum delay between two steps for a speed in RPM
///
/// Both divisions truncate, in this order, so the result is
/// `floor(60_000_000 / steps_per_revolution / rpm)`.
///
/// # Errors
/// - `InvalidStepsPerRevolution` if `steps_per_revolution` is zero
/// - `InvalidSpeed` if `rpm` is zero
pub fn step_delay_micros(steps_per_revolution: u32, rpm: u32) -> Result<u32, StepperError> {
    if steps_per_revolution == 0 {
        return Err(StepperError::InvalidStepsPerRevolution);
    }
    if rpm == 0 {
        return Err(StepperError::InvalidSpeed);
    }
    Ok(MICROS_PER_MINUTE / steps_per_revolution / rpm)
}
