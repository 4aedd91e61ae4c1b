//! Constants shared by the host protocol and the frame codec.
//!
//! The frame layout constants describe the wiring of the external
//! shift-register chain and must not be changed independently of the
//! hardware. The host protocol constants size the fixed buffers used on the
//! receive path.
//!
//! ## Key Concepts
//!
//! - **Switch**: 5 bits of state, A (MSB) through E (LSB).
//! - **Group**: 8 switches packed into one 40-bit run of the frame.
//! - **Frame**: the 20-byte image shifted out to the registers.
//! - **Packet**: one host link transfer, at most 64 bytes.

/// Number of independently addressable switches.
pub const NUM_SWITCHES: usize = 32;

/// Number of switches packed together into one 40-bit group.
pub const SWITCHES_PER_GROUP: usize = 8;

/// Number of groups making up a frame.
pub const SWITCH_GROUPS: usize = NUM_SWITCHES / SWITCHES_PER_GROUP;

/// Number of bits of state carried by a single switch.
pub const BITS_PER_SWITCH: usize = 5;

/// Mask selecting the valid state bits of a switch.
pub const SWITCH_STATE_MASK: u8 = 0x1F;

/// Length (in bytes) of the frame sent to the shift registers.
pub const FRAME_LEN: usize = 20;

/// Distance (in bytes) between the start of consecutive group windows.
pub const GROUP_STRIDE: usize = 5;

/// Number of frame bytes a single group is OR-merged into.
///
/// One more than [`GROUP_STRIDE`], so neighbouring groups share a byte.
pub const GROUP_WINDOW: usize = 6;

/// Capacity (in bytes) of the receive line buffer.
pub const RX_BUFFER_LEN: usize = 64;

/// Maximum size (in bytes) of a single host link packet.
pub const HOST_PACKET_LEN: usize = 64;

/// Maximum number of whitespace separated tokens on a command line,
/// including the command name.
pub const MAX_TOKENS: usize = 12;

/// Maximum number of arguments following the command name.
pub const MAX_ARGS: usize = MAX_TOKENS - 1;

/// Line terminator used by the host protocol unless configured otherwise.
pub const DEFAULT_TERMINATOR: &[u8] = b"\r";

/// Queue depth (in bytes) below which idle bytes are fed to the bus while
/// the clock output is running.
pub const CLOCK_LOW_WATER: usize = 4;

/// Byte shifted out to keep the bus clock running.
pub const IDLE_BYTE: u8 = 0x00;

/// Text sent to the host before an echoed command line.
pub const ECHO_PREFIX: &[u8] = b"Command: \"";

/// Text sent to the host after an echoed command line.
pub const ECHO_SUFFIX: &[u8] = b"\"\r\n";

/// Status line sent to the host after a command succeeds.
pub const REPLY_OK: &[u8] = b"OK\r\n";
