//! Motion bookkeeping
//!
//! Position within a revolution and the speed to delay conversion used
//! for step pacing.

pub mod position;
pub mod speed;

pub use position::StepCounter;
pub use speed::{step_delay_micros, MICROS_PER_MINUTE};
