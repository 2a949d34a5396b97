//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in cadence-core:
//!
//! - Phase-sequenced stepper driver over `embedded-hal` output pins
//! - Pacing gates (busy-wait and `DelayNs` sleep)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod pacing;
pub mod stepper;

pub use pacing::{DelayGate, PacingGate, SpinGate};
pub use stepper::{Coils, PhaseStepper};
