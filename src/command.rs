//! Command line tokenizer.
//!
//! A command line is a command name followed by arguments, separated by any
//! run of ASCII whitespace. Names are matched case-insensitively.
//!
//! | Command      | Arguments      | Description                                        |
//! |--------------|----------------|----------------------------------------------------|
//! | `NOOP`       |                | Does nothing                                       |
//! | `CLEAR`      |                | Closes every switch and latches the new frame      |
//! | `WRITE`      | `[0x]<hex>`    | Loads a raw 160-bit frame (not supported)          |
//! | `SELECT`     | `<A-E>`        | Opens one contact on every switch                  |
//! | `LOAD`       |                | Pulses the strobe line without sending a frame     |
//! | `CLOCK`      |                | Keeps the bus clock running with idle bytes        |
//! | `STOP`       |                | Stops the bus clock and flushes the bus queue      |

use heapless::Vec;

use crate::consts::MAX_ARGS;
use crate::error::Error;

/// Commands understood by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Command {
    /// Does nothing.
    Noop,
    /// Closes every switch.
    Clear,
    /// Loads a raw frame.
    Write,
    /// Opens one contact on every switch.
    Select,
    /// Pulses the strobe line.
    Load,
    /// Starts the idle bus clock.
    Clock,
    /// Stops the idle bus clock.
    Stop,
    /// Anything else.
    Invalid,
}

impl Command {
    const TABLE: [(&'static str, Command); 7] = [
        ("NOOP", Command::Noop),
        ("CLEAR", Command::Clear),
        ("WRITE", Command::Write),
        ("SELECT", Command::Select),
        ("LOAD", Command::Load),
        ("CLOCK", Command::Clock),
        ("STOP", Command::Stop),
    ];

    /// Looks up a command by name, ignoring ASCII case.
    pub fn from_name(name: &[u8]) -> Command {
        Self::TABLE
            .iter()
            .find(|(known, _)| known.as_bytes().eq_ignore_ascii_case(name))
            .map_or(Command::Invalid, |(_, command)| *command)
    }

    /// Canonical upper-case name.
    pub fn name(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(_, command)| *command == self)
            .map_or("INVALID", |(known, _)| *known)
    }
}

/// A tokenized command line, borrowing its arguments from the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    /// The command named by the first token.
    pub command: Command,
    /// Remaining tokens, in order. The command name is not included.
    pub args: Vec<&'a [u8], MAX_ARGS>,
}

impl<'a> ParsedCommand<'a> {
    /// A command without arguments.
    pub fn new(command: Command) -> Self {
        Self {
            command,
            args: Vec::new(),
        }
    }
}

/// Splits `line` into a command and its arguments.
///
/// A blank line parses as [`Command::Noop`].
///
/// # Errors
/// - [`Error::InvalidCommand`] if the first token is not a known command
/// - [`Error::TooManyArgs`] if the line has more than
///   [`MAX_TOKENS`](crate::consts::MAX_TOKENS) tokens
pub fn tokenize(line: &[u8]) -> Result<ParsedCommand<'_>, Error> {
    let mut tokens = line
        .split(|b| b.is_ascii_whitespace())
        .filter(|token| !token.is_empty());

    let Some(name) = tokens.next() else {
        return Ok(ParsedCommand::new(Command::Noop));
    };

    let command = match Command::from_name(name) {
        Command::Invalid => return Err(Error::InvalidCommand),
        command => command,
    };

    let mut parsed = ParsedCommand::new(command);
    for token in tokens {
        parsed.args.push(token).map_err(|_| Error::TooManyArgs)?;
    }
    Ok(parsed)
}
