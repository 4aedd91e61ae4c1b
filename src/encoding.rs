//! Switch matrix to shift-register frame packing.
//!
//! The external shift-register chain expects the 32 five-bit switch states
//! as a 160-bit image laid out in four groups of eight switches.
//!
//! ## Frame Layout
//!
//! - Group `g` (0..4) holds switches `32 - 8*(g+1) .. 32 - 8*g`, last switch
//!   first: switch `31 - 8*g - j` lands in slot `j`.
//! - Slot `j` occupies bits `5*j + s .. 5*j + s + 5` of a 64-bit
//!   accumulator, where `s = 1 - g/2`. Groups 0 and 1 are shifted up by one
//!   bit, groups 2 and 3 are not. This offset follows the board wiring.
//! - The low six bytes of the accumulator (little-endian) are OR-merged into
//!   the frame starting at byte `5*g`, so neighbouring groups share a byte.
//!   The window of the last group is clipped at the end of the frame; its
//!   sixth byte is always empty.
//!
//! ## Functions
//!
//! - [`pack`]: Converts a [`SwitchMatrix`] into a frame
//! - [`group_bits`]: The raw accumulator for one group

use crate::consts::{
    BITS_PER_SWITCH, FRAME_LEN, GROUP_STRIDE, GROUP_WINDOW, NUM_SWITCHES, SWITCH_GROUPS,
    SWITCHES_PER_GROUP,
};
use crate::switches::SwitchMatrix;

/// A packed frame, ready for the shift-register bus.
pub type Frame = [u8; FRAME_LEN];

/// Bit offset applied to every slot of `group`.
const fn group_shift(group: usize) -> usize {
    1 - group / 2
}

/// Builds the 64-bit accumulator for one group of eight switches.
///
/// # Panics
/// If `group >= SWITCH_GROUPS`.
pub fn group_bits(matrix: &SwitchMatrix, group: usize) -> u64 {
    assert!(group < SWITCH_GROUPS);
    let shift = group_shift(group);
    let mut bits: u64 = 0;
    for slot in 0..SWITCHES_PER_GROUP {
        let index = NUM_SWITCHES - (group * SWITCHES_PER_GROUP + slot) - 1;
        bits |= u64::from(matrix[index].bits()) << (slot * BITS_PER_SWITCH + shift);
    }
    bits
}

/// Packs the switch matrix into the 20-byte frame shifted out to the registers.
pub fn pack(matrix: &SwitchMatrix) -> Frame {
    let mut frame = [0u8; FRAME_LEN];
    for group in 0..SWITCH_GROUPS {
        let bytes = group_bits(matrix, group).to_le_bytes();
        let window = &mut frame[group * GROUP_STRIDE..];
        for (out, byte) in window.iter_mut().zip(bytes.iter().take(GROUP_WINDOW)) {
            *out |= *byte;
        }
    }
    frame
}
