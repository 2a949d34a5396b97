//! Phase sequencing
//!
//! Commutation tables and the wire-count tag that selects between them.

pub mod phase;

pub use phase::{
    WireCount, FIVE_WIRE_PHASES, FOUR_STEP_CYCLE, FOUR_WIRE_PHASES, TEN_STEP_CYCLE,
    TWO_WIRE_PHASES,
};

/// Revision of the sequencing tables and pacing behavior
///
/// Reported to hosts that audit which step sequence a board runs.
pub const SEQUENCER_VERSION: u8 = 1;
