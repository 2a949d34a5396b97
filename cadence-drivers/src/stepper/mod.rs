//! Stepper driver implementations

pub mod coils;
pub mod phase;

pub use coils::Coils;
pub use phase::PhaseStepper;
