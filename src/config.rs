//! Runtime configuration for the [`Controller`](crate::controller::Controller).

use crate::consts::{CLOCK_LOW_WATER, DEFAULT_TERMINATOR};
use crate::switches::Switch;

/// Settings fixed when the controller is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Byte sequence ending a command line. Must be non-empty and shorter
    /// than the receive buffer.
    pub terminator: &'static [u8],
    /// State every switch starts in.
    pub default_state: Switch,
    /// Bus queue depth kept while the clock output runs.
    pub clock_low_water: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            terminator: DEFAULT_TERMINATOR,
            default_state: Switch::CLOSED,
            clock_low_water: CLOCK_LOW_WATER,
        }
    }
}
