//! Hardware abstraction traits
//!
//! These traits define the interface between the sequencing logic
//! and hardware-specific implementations.

pub mod clock;
pub mod stepper;

pub use clock::MonotonicClock;
pub use stepper::{Direction, StepperDriver, StepperError};
