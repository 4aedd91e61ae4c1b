//! # switchbank
//!
//! A portable, no_std Rust controller for a bank of 32 five-state switches
//! driven through a chain of shift registers, commanded by a host over a
//! line-oriented text protocol.
//!
//! The crate implements:
//! - a bounded receive buffer and line splitter that survive partial reads,
//!   overflow and several commands arriving in one packet
//! - a tokenizer and command dispatcher for the `CLEAR`, `SELECT`, `LOAD`,
//!   `CLOCK`, `STOP`, `WRITE` and `NOOP` commands
//! - the bit-exact codec packing 32 five-bit switch states into the 20-byte
//!   frame the shift registers expect
//! - non-blocking load pulses, fired once the bus reports a frame shifted out,
//!   with the completion handed over from the interrupt through `critical-section`
//!
//! The host link and the shift-register bus are traits implemented by the
//! board support code; the strobe line is an `embedded-hal`
//! [`OutputPin`](embedded_hal::digital::OutputPin).
//!
//! ## Crate features
//! | Feature       | Description |
//! |---------------|-------------|
//! | `std`         | Disables `#![no_std]` |
//! | `delay-loop`  | Adds [`run_poll_loop`], pacing the poll loop with `embedded_hal::delay::DelayNs` |
//! | `defmt-0-3`   | Uses `defmt` logging |
//! | `log`         | Uses `log` logging |
//!
//! ## Host protocol
//!
//! Lines end with `\r` by default. For every line the controller echoes
//! `Command: "<line>"\r\n` and then answers `OK\r\n` or
//! `ERROR: <message>\r\n`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use switchbank::{Config, Controller, TransferSignal};
//!
//! static BUS_DONE: TransferSignal = TransferSignal::new();
//!
//! // In the bus transfer-complete interrupt:
//! BUS_DONE.notify(true);
//!
//! let mut controller = Controller::new(usb, spi, ld_pin, &BUS_DONE, Config::default())?;
//! loop {
//!     controller.poll()?;
//! }
//! ```
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[macro_use]
mod fmt;

pub use critical_section;
pub use heapless;

pub mod command;
pub mod config;
pub mod consts;
pub mod controller;
pub mod dispatcher;
pub mod encoding;
pub mod error;
pub mod line_buffer;
pub mod signal;
pub mod switches;
pub mod transport;

#[cfg(feature = "delay-loop")]
mod runner;

#[cfg(test)]
mod mock;

pub use config::Config;
pub use controller::Controller;
pub use error::Error;
#[cfg(feature = "delay-loop")]
pub use runner::run_poll_loop;
pub use signal::TransferSignal;
pub use switches::{Switch, SwitchMatrix};
