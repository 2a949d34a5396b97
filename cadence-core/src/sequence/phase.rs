//! Commutation tables
//!
//! Each row is the level applied to every control wire for one step, in
//! pin order (`true` = energized). Stepping through the rows in order turns
//! the rotor by one full step per row; stepping backwards reverses it.
//!
//! The 2-wire table is columns C1 and C2 of the 4-wire sequence, with the
//! external driver inverting them to recover the other two coils. The
//! 5-wire table follows the winding topology of five-phase motors and is
//! not symmetric, so it is kept as a literal table like the others.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::traits::StepperError;

/// Steps in one cycle of the 2- and 4-wire sequences
pub const FOUR_STEP_CYCLE: usize = 4;

/// Steps in one cycle of the 5-wire sequence
pub const TEN_STEP_CYCLE: usize = 10;

/// 2-wire sequence (C0 C1): 01, 11, 10, 00
pub const TWO_WIRE_PHASES: [[bool; 2]; FOUR_STEP_CYCLE] = [
    [false, true],
    [true, true],
    [true, false],
    [false, false],
];

/// 4-wire sequence (C0 C1 C2 C3): 1010, 0110, 0101, 1001
pub const FOUR_WIRE_PHASES: [[bool; 4]; FOUR_STEP_CYCLE] = [
    [true, false, true, false],
    [false, true, true, false],
    [false, true, false, true],
    [true, false, false, true],
];

/// 5-wire sequence (C0 C1 C2 C3 C4)
pub const FIVE_WIRE_PHASES: [[bool; 5]; TEN_STEP_CYCLE] = [
    [false, true, true, false, true],   // 01101
    [false, true, false, false, true],  // 01001
    [false, true, false, true, true],   // 01011
    [false, true, false, true, false],  // 01010
    [true, true, false, true, false],   // 11010
    [true, false, false, true, false],  // 10010
    [true, false, true, true, false],   // 10110
    [true, false, true, false, false],  // 10100
    [true, false, true, false, true],   // 10101
    [false, false, true, false, true],  // 00101
];

/// Number of control wires driving the motor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub enum WireCount {
    /// Two wires, inverted externally (Darlington array or L293)
    Two,
    /// Four wires, unipolar or bipolar
    #[default]
    Four,
    /// Five wires, five-phase motor
    Five,
}

impl WireCount {
    /// Number of pins this wiring drives
    pub const fn pins(self) -> usize {
        match self {
            WireCount::Two => 2,
            WireCount::Four => 4,
            WireCount::Five => 5,
        }
    }

    /// Length of the commutation cycle for this wiring
    pub const fn cycle_len(self) -> usize {
        match self {
            WireCount::Two | WireCount::Four => FOUR_STEP_CYCLE,
            WireCount::Five => TEN_STEP_CYCLE,
        }
    }

    /// Row of the commutation table selected by a step index
    ///
    /// The index is reduced modulo the cycle length, so any absolute step
    /// index can be passed directly.
    pub fn pattern(self, step_index: u32) -> &'static [bool] {
        let row = step_index as usize % self.cycle_len();
        match self {
            WireCount::Two => &TWO_WIRE_PHASES[row],
            WireCount::Four => &FOUR_WIRE_PHASES[row],
            WireCount::Five => &FIVE_WIRE_PHASES[row],
        }
    }
}

impl TryFrom<u8> for WireCount {
    type Error = StepperError;

    fn try_from(wires: u8) -> Result<Self, Self::Error> {
        match wires {
            2 => Ok(WireCount::Two),
            4 => Ok(WireCount::Four),
            5 => Ok(WireCount::Five),
            _ => Err(StepperError::InvalidWiring),
        }
    }
}

impl From<WireCount> for u8 {
    fn from(wires: WireCount) -> Self {
        wires.pins() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Parse a row written the way the motor datasheets print it
    fn bits(row: &str) -> [bool; 5] {
        let mut out = [false; 5];
        for (i, c) in row.chars().enumerate() {
            out[i] = c == '1';
        }
        out
    }

    #[test]
    fn test_two_wire_sequence() {
        let expected = ["01", "11", "10", "00"];
        for (i, row) in expected.iter().enumerate() {
            assert_eq!(WireCount::Two.pattern(i as u32), &bits(row)[..2]);
        }
    }

    #[test]
    fn test_four_wire_sequence() {
        let expected = ["1010", "0110", "0101", "1001"];
        for (i, row) in expected.iter().enumerate() {
            assert_eq!(WireCount::Four.pattern(i as u32), &bits(row)[..4]);
        }
        assert_eq!(WireCount::Four.pattern(2), &[false, true, false, true]);
    }

    #[test]
    fn test_five_wire_sequence() {
        let expected = [
            "01101", "01001", "01011", "01010", "11010", "10010", "10110", "10100", "10101",
            "00101",
        ];
        for (i, row) in expected.iter().enumerate() {
            assert_eq!(WireCount::Five.pattern(i as u32), &bits(row)[..]);
        }
    }

    #[test]
    fn test_two_wire_matches_middle_of_four_wire() {
        for i in 0..FOUR_STEP_CYCLE as u32 {
            assert_eq!(
                WireCount::Two.pattern(i),
                &WireCount::Four.pattern(i)[1..3]
            );
        }
    }

    #[test]
    fn test_adjacent_rows_differ() {
        for wires in [WireCount::Two, WireCount::Four, WireCount::Five] {
            for i in 0..wires.cycle_len() as u32 {
                assert_ne!(wires.pattern(i), wires.pattern(i + 1));
            }
        }
    }

    #[test]
    fn test_wire_count_conversion() {
        assert_eq!(WireCount::try_from(2), Ok(WireCount::Two));
        assert_eq!(WireCount::try_from(4), Ok(WireCount::Four));
        assert_eq!(WireCount::try_from(5), Ok(WireCount::Five));
        assert_eq!(WireCount::try_from(3), Err(StepperError::InvalidWiring));
        assert_eq!(WireCount::try_from(0), Err(StepperError::InvalidWiring));
        assert_eq!(u8::from(WireCount::Five), 5);
    }

    proptest! {
        #[test]
        fn pattern_width_matches_wiring(index in any::<u32>()) {
            for wires in [WireCount::Two, WireCount::Four, WireCount::Five] {
                prop_assert_eq!(wires.pattern(index).len(), wires.pins());
            }
        }

        #[test]
        fn pattern_repeats_every_cycle(index in 0u32..1_000_000) {
            for wires in [WireCount::Two, WireCount::Four, WireCount::Five] {
                let cycle = wires.cycle_len() as u32;
                prop_assert_eq!(wires.pattern(index), wires.pattern(index + cycle));
            }
        }
    }
}
