//! Bus transfer completion, shared with the bus interrupt.
//!
//! The shift-register bus raises an interrupt when it has shifted out its
//! queue. The interrupt handler only records that fact in a
//! [`TransferSignal`]; the foreground loop picks it up and fires the strobe.
//! The slot is guarded by `critical_section`, so a signal can live in a
//! `static`:
//!
//! ```rust
//! use switchbank::signal::TransferSignal;
//!
//! static BUS_DONE: TransferSignal = TransferSignal::new();
//!
//! // In the bus TX interrupt handler:
//! fn bus_tx_isr(status_done: bool) {
//!     BUS_DONE.notify(status_done);
//! }
//! # bus_tx_isr(true);
//! # assert!(BUS_DONE.take());
//! ```

use core::cell::Cell;
use core::fmt;
use critical_section::Mutex;

/// Single-slot completion flag written from interrupt context.
pub struct TransferSignal {
    complete: Mutex<Cell<bool>>,
}

impl TransferSignal {
    /// Creates a signal with no pending completion.
    pub const fn new() -> Self {
        Self {
            complete: Mutex::new(Cell::new(false)),
        }
    }

    /// Records a finished transfer. Does nothing unless the bus reported its
    /// done status, so FIFO-level interrupts are ignored.
    pub fn notify(&self, done: bool) {
        if done {
            critical_section::with(|cs| self.complete.borrow(cs).set(true));
        }
    }

    /// Consumes a pending completion, returning whether there was one.
    pub fn take(&self) -> bool {
        critical_section::with(|cs| self.complete.borrow(cs).replace(false))
    }

    /// Discards any pending completion.
    pub fn reset(&self) {
        critical_section::with(|cs| self.complete.borrow(cs).set(false));
    }
}

impl fmt::Debug for TransferSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferSignal").finish_non_exhaustive()
    }
}

impl Default for TransferSignal {
    fn default() -> Self {
        Self::new()
    }
}
