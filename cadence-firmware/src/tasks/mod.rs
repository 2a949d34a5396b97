//! Embassy async tasks

pub mod stepper;

pub use stepper::{stepper_task, FirmwareStepper};
