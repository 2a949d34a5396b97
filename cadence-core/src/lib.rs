//! Board-agnostic core logic for Cadence stepper drivers
//!
//! This crate contains everything that does not touch real hardware:
//!
//! - Commutation tables for 2-, 4- and 5-wire motors
//! - Step counter with wraparound over one revolution
//! - Speed to step delay conversion
//! - Hardware abstraction traits (stepper driver, monotonic clock)
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod motion;
pub mod sequence;
pub mod traits;

pub use sequence::SEQUENCER_VERSION;
