//! Configuration types
//!
//! Board-agnostic stepper configuration, optionally serde-serializable,
//! and the minimal `no_std` parser for `stepper.toml`.

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, BoardConfig, ParseError, SweepConfig};
pub use types::*;
