//! Crate-wide error type.
//!
//! Every variant is recoverable. Command errors are reported back to the
//! host as `ERROR: <message>` using the `Display` text below, so keep the
//! messages short enough to fit in a single host packet.

use thiserror::Error;

/// Errors raised while receiving, parsing or executing host commands.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Error {
    /// Incoming data did not fit into the receive buffer. The buffer was
    /// reset and the next line will be skipped.
    #[error("receive buffer overflow")]
    BufferOverflow,
    /// The first token of the line is not a known command.
    #[error("invalid command")]
    InvalidCommand,
    /// The line has more tokens than the tokenizer accepts.
    #[error("too many arguments")]
    TooManyArgs,
    /// The command received the wrong number of arguments.
    #[error("wrong number of arguments")]
    ArgCount,
    /// An argument has the wrong shape (e.g. more than one character).
    #[error("malformed argument")]
    ArgFormat,
    /// The command would change the switches while the clock output runs.
    #[error("clock output running, send STOP first")]
    ClockActive,
    /// The command is recognised but not supported by this firmware.
    #[error("not implemented")]
    NotImplemented,
    /// The configured line terminator is empty or does not fit the buffer.
    #[error("invalid line terminator")]
    InvalidTerminator,
    /// The host link reported a failure.
    #[error("host link failure")]
    HostLink,
    /// Driving the strobe line failed.
    #[error("strobe line failure")]
    Strobe,
}
