//! Switch state model.
//!
//! Each of the [`NUM_SWITCHES`] switches has five contacts, labelled A to E.
//! Their combined state is a 5-bit value with A as the most significant bit:
//!
//! | Contact | Weight |
//! |---------|--------|
//! | A       | 16     |
//! | B       | 8      |
//! | C       | 4      |
//! | D       | 2      |
//! | E       | 1      |
//!
//! A value of zero means every contact is closed.

use core::ops::Index;
use core::slice::Iter;

use crate::consts::{NUM_SWITCHES, SWITCH_STATE_MASK};

/// The 5-bit state of a single switch.
///
/// The wrapped value is always in `0..=31`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Switch(u8);

impl Switch {
    /// All contacts closed.
    pub const CLOSED: Switch = Switch(0);

    /// Every contact open.
    pub const ALL_OPEN: Switch = Switch(SWITCH_STATE_MASK);

    /// Creates a switch state, returning `None` if `bits` does not fit in 5 bits.
    pub const fn new(bits: u8) -> Option<Switch> {
        if bits > SWITCH_STATE_MASK {
            None
        } else {
            Some(Switch(bits))
        }
    }

    /// Creates a switch state from the low 5 bits of `bits`.
    pub const fn from_bits_truncate(bits: u8) -> Switch {
        Switch(bits & SWITCH_STATE_MASK)
    }

    /// State for a single contact letter, see [`switches_mask`].
    pub const fn from_char(c: u8) -> Switch {
        Switch(switches_mask(c))
    }

    /// Raw 5-bit value.
    pub const fn bits(self) -> u8 {
        self.0
    }
}

/// Returns the bitmask for a contact letter (case-insensitive).
///
/// `A` = 16, `B` = 8, `C` = 4, `D` = 2, `E` = 1. Any other byte maps to 0.
pub const fn switches_mask(c: u8) -> u8 {
    match c {
        b'a' | b'A' => 16,
        b'b' | b'B' => 8,
        b'c' | b'C' => 4,
        b'd' | b'D' => 2,
        b'e' | b'E' => 1,
        _ => 0,
    }
}

/// The state of every switch in the bank, indexed `0..NUM_SWITCHES`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct SwitchMatrix {
    switches: [Switch; NUM_SWITCHES],
}

impl SwitchMatrix {
    /// Creates a matrix with every switch set to `state`.
    pub const fn new(state: Switch) -> Self {
        Self {
            switches: [state; NUM_SWITCHES],
        }
    }

    /// Sets every switch to `state`.
    pub fn set_all(&mut self, state: Switch) {
        self.switches.fill(state);
    }

    /// State of switch `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<Switch> {
        self.switches.get(index).copied()
    }

    /// Sets switch `index` to `state`. Returns `None` if out of range.
    pub fn set(&mut self, index: usize, state: Switch) -> Option<()> {
        let slot = self.switches.get_mut(index)?;
        *slot = state;
        Some(())
    }

    /// Iterates over the switches in index order.
    pub fn iter(&self) -> Iter<'_, Switch> {
        self.switches.iter()
    }
}

impl Default for SwitchMatrix {
    fn default() -> Self {
        Self::new(Switch::CLOSED)
    }
}

impl Index<usize> for SwitchMatrix {
    type Output = Switch;

    fn index(&self, index: usize) -> &Switch {
        &self.switches[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_letters() {
        assert_eq!(switches_mask(b'a'), 16);
        assert_eq!(switches_mask(b'B'), 8);
        assert_eq!(switches_mask(b'c'), 4);
        assert_eq!(switches_mask(b'D'), 2);
        assert_eq!(switches_mask(b'e'), 1);
        assert_eq!(switches_mask(b'A'), 16);
        assert_eq!(switches_mask(b'E'), 1);
    }

    #[test]
    fn test_mask_unknown_is_zero() {
        for c in [b'f', b'F', b'z', b'0', b'1', b' ', b'\r', 0x00, 0xFF] {
            assert_eq!(switches_mask(c), 0);
        }
    }

    #[test]
    fn test_switch_range() {
        assert_eq!(Switch::new(31), Some(Switch::ALL_OPEN));
        assert_eq!(Switch::new(32), None);
        assert_eq!(Switch::from_bits_truncate(0xFF).bits(), 31);
        assert_eq!(Switch::from_bits_truncate(0x20), Switch::CLOSED);
        assert_eq!(Switch::from_char(b'c').bits(), 4);
    }

    #[test]
    fn test_matrix_set_all() {
        let mut matrix = SwitchMatrix::default();
        assert!(matrix.iter().all(|s| *s == Switch::CLOSED));

        matrix.set_all(Switch::from_char(b'B'));
        assert_eq!(matrix.iter().count(), NUM_SWITCHES);
        assert!(matrix.iter().all(|s| s.bits() == 8));
    }

    #[test]
    fn test_matrix_indexing() {
        let mut matrix = SwitchMatrix::new(Switch::CLOSED);
        assert_eq!(matrix.set(31, Switch::ALL_OPEN), Some(()));
        assert_eq!(matrix.set(32, Switch::ALL_OPEN), None);
        assert_eq!(matrix.get(31), Some(Switch::ALL_OPEN));
        assert_eq!(matrix.get(32), None);
        assert_eq!(matrix[0], Switch::CLOSED);
    }
}
