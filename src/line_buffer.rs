//! Receive buffer and line splitting for the host command stream.
//!
//! Host packets are appended to a fixed [`RX_BUFFER_LEN`] byte buffer. Once a
//! terminator shows up, everything before it is handed out as a line and
//! the buffer is compacted so the remaining bytes start at offset 0.
//!
//! If a packet does not fit, the whole buffer is dropped and the buffer
//! enters *overflow-skip*: the next terminator only resynchronises the
//! stream, and the (truncated) line in front of it is discarded.

use heapless::Vec;

use crate::consts::RX_BUFFER_LEN;
use crate::error::Error;

/// A complete command line, without its terminator.
pub type Line = Vec<u8, RX_BUFFER_LEN>;

/// Accumulates host bytes and splits them into lines.
#[derive(Debug)]
pub struct LineBuffer {
    buf: Vec<u8, RX_BUFFER_LEN>,
    overflow: bool,
    terminator: &'static [u8],
}

impl LineBuffer {
    /// Creates an empty buffer splitting on `terminator`.
    ///
    /// # Errors
    /// [`Error::InvalidTerminator`] if the terminator is empty or would not
    /// leave room for any line content.
    pub fn new(terminator: &'static [u8]) -> Result<Self, Error> {
        if terminator.is_empty() || terminator.len() >= RX_BUFFER_LEN {
            return Err(Error::InvalidTerminator);
        }
        Ok(Self {
            buf: Vec::new(),
            overflow: false,
            terminator,
        })
    }

    /// Appends `incoming` to the buffer.
    ///
    /// Either all of `incoming` is stored or none of it is. When it does not
    /// fit, the buffer is emptied and overflow-skip is armed.
    ///
    /// # Errors
    /// [`Error::BufferOverflow`] if the data did not fit.
    pub fn append(&mut self, incoming: &[u8]) -> Result<(), Error> {
        if incoming.is_empty() {
            return Ok(());
        }
        if self.buf.extend_from_slice(incoming).is_err() {
            self.buf.clear();
            self.overflow = true;
            return Err(Error::BufferOverflow);
        }
        Ok(())
    }

    /// Removes and returns the next complete line.
    ///
    /// Lines terminated while overflow-skip is armed are consumed here and
    /// never returned. Returns `None` once no terminator is left; a trailing
    /// partial line stays buffered for the next [`append`](Self::append).
    pub fn next_line(&mut self) -> Option<Line> {
        loop {
            let end = self
                .buf
                .windows(self.terminator.len())
                .position(|window| window == self.terminator)?;

            let line = if self.overflow {
                self.overflow = false;
                None
            } else {
                // The line is strictly shorter than the buffer, so this cannot fail
                Vec::from_slice(&self.buf[..end]).ok()
            };

            self.consume(end + self.terminator.len());

            if line.is_some() {
                return line;
            }
        }
    }

    /// Drops any buffered data and clears overflow-skip.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.overflow = false;
    }

    /// Number of buffered bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Whether the next line will be skipped after an overflow.
    pub fn is_overflowed(&self) -> bool {
        self.overflow
    }

    /// Buffered bytes that have not been returned as a line yet.
    pub fn pending(&self) -> &[u8] {
        &self.buf
    }

    fn consume(&mut self, count: usize) {
        let len = self.buf.len();
        self.buf.copy_within(count..len, 0);
        self.buf.truncate(len - count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::DEFAULT_TERMINATOR;

    fn buffer() -> LineBuffer {
        LineBuffer::new(DEFAULT_TERMINATOR).unwrap()
    }

    #[test]
    fn test_rejects_bad_terminator() {
        assert_eq!(LineBuffer::new(b"").unwrap_err(), Error::InvalidTerminator);
        assert_eq!(
            LineBuffer::new(&[b'\r'; RX_BUFFER_LEN]).unwrap_err(),
            Error::InvalidTerminator
        );
    }

    #[test]
    fn test_empty_append_is_noop() {
        let mut lines = buffer();
        assert_eq!(lines.append(b""), Ok(()));
        assert!(lines.is_empty());
        assert!(lines.next_line().is_none());
    }

    #[test]
    fn test_single_line() {
        let mut lines = buffer();
        assert_eq!(lines.append(b"CLEAR\r"), Ok(()));
        assert_eq!(lines.next_line().as_deref(), Some(&b"CLEAR"[..]));
        assert!(lines.next_line().is_none());
        assert!(lines.is_empty());
    }

    #[test]
    fn test_multiple_lines_in_one_packet() {
        let mut lines = buffer();
        assert_eq!(lines.append(b"CLEAR\rSELECT A\r"), Ok(()));
        assert_eq!(lines.next_line().as_deref(), Some(&b"CLEAR"[..]));
        assert_eq!(lines.next_line().as_deref(), Some(&b"SELECT A"[..]));
        assert!(lines.next_line().is_none());
        assert!(lines.is_empty());
    }

    #[test]
    fn test_partial_line_is_retained() {
        let mut lines = buffer();
        assert_eq!(lines.append(b"SEL"), Ok(()));
        assert!(lines.next_line().is_none());
        assert_eq!(lines.pending(), b"SEL");

        assert_eq!(lines.append(b"ECT A\rLO"), Ok(()));
        assert_eq!(lines.next_line().as_deref(), Some(&b"SELECT A"[..]));
        assert!(lines.next_line().is_none());
        assert_eq!(lines.pending(), b"LO");
    }

    #[test]
    fn test_empty_lines() {
        let mut lines = buffer();
        assert_eq!(lines.append(b"\r\r"), Ok(()));
        assert_eq!(lines.next_line().as_deref(), Some(&b""[..]));
        assert_eq!(lines.next_line().as_deref(), Some(&b""[..]));
        assert!(lines.next_line().is_none());
    }

    #[test]
    fn test_full_buffer_is_accepted() {
        let mut lines = buffer();
        assert_eq!(lines.append(&[b'x'; RX_BUFFER_LEN - 1]), Ok(()));
        assert_eq!(lines.append(b"\r"), Ok(()));
        assert_eq!(lines.len(), RX_BUFFER_LEN);
        assert_eq!(lines.next_line().map(|l| l.len()), Some(RX_BUFFER_LEN - 1));
        assert!(lines.is_empty());
    }

    #[test]
    fn test_oversized_append_overflows() {
        let mut lines = buffer();
        assert_eq!(
            lines.append(&[b'x'; RX_BUFFER_LEN + 1]),
            Err(Error::BufferOverflow)
        );
        assert!(lines.is_empty());
        assert!(lines.is_overflowed());
    }

    #[test]
    fn test_overflow_is_all_or_nothing() {
        let mut lines = buffer();
        assert_eq!(lines.append(&[b'x'; 40]), Ok(()));
        assert_eq!(lines.append(&[b'y'; 30]), Err(Error::BufferOverflow));
        assert!(lines.is_empty());
        assert!(lines.is_overflowed());
    }

    #[test]
    fn test_overflow_skips_next_line() {
        let mut lines = buffer();
        assert_eq!(
            lines.append(&[b'x'; RX_BUFFER_LEN + 1]),
            Err(Error::BufferOverflow)
        );

        // Tail of the truncated line, then a good one
        assert_eq!(lines.append(b"xx\rLOAD\r"), Ok(()));
        assert_eq!(lines.next_line().as_deref(), Some(&b"LOAD"[..]));
        assert!(!lines.is_overflowed());
        assert!(lines.is_empty());
    }

    #[test]
    fn test_overflow_terminator_alone_clears_flag() {
        let mut lines = buffer();
        assert_eq!(
            lines.append(&[b'x'; RX_BUFFER_LEN + 1]),
            Err(Error::BufferOverflow)
        );
        assert_eq!(lines.append(b"\r"), Ok(()));
        assert!(lines.next_line().is_none());
        assert!(!lines.is_overflowed());
        assert!(lines.is_empty());
    }

    #[test]
    fn test_overflow_keeps_partial_after_skip() {
        let mut lines = buffer();
        assert_eq!(
            lines.append(&[b'x'; RX_BUFFER_LEN + 1]),
            Err(Error::BufferOverflow)
        );
        assert_eq!(lines.append(b"x\rSTO"), Ok(()));
        assert!(lines.next_line().is_none());
        assert_eq!(lines.pending(), b"STO");
        assert_eq!(lines.append(b"P\r"), Ok(()));
        assert_eq!(lines.next_line().as_deref(), Some(&b"STOP"[..]));
    }

    #[test]
    fn test_multi_byte_terminator() {
        let mut lines = LineBuffer::new(b"\r\n").unwrap();
        assert_eq!(lines.append(b"CLOCK\r"), Ok(()));
        assert!(lines.next_line().is_none());
        assert_eq!(lines.append(b"\nSTOP\r\nNO"), Ok(()));
        assert_eq!(lines.next_line().as_deref(), Some(&b"CLOCK"[..]));
        assert_eq!(lines.next_line().as_deref(), Some(&b"STOP"[..]));
        assert!(lines.next_line().is_none());
        assert_eq!(lines.pending(), b"NO");
    }

    #[test]
    fn test_reset_discards_everything() {
        let mut lines = buffer();
        assert_eq!(lines.append(b"SEL"), Ok(()));
        lines.reset();
        assert!(lines.is_empty());

        assert_eq!(
            lines.append(&[b'x'; RX_BUFFER_LEN + 1]),
            Err(Error::BufferOverflow)
        );
        lines.reset();
        assert!(!lines.is_overflowed());
        assert_eq!(lines.append(b"NOOP\r"), Ok(()));
        assert_eq!(lines.next_line().as_deref(), Some(&b"NOOP"[..]));
    }
}
