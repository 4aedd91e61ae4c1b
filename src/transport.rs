//! Interfaces to the host link and the shift-register bus.
//!
//! Both are implemented by the board support code. The host link is
//! typically a USB CDC endpoint, the bus an SPI master with a TX FIFO.
//! The strobe line that latches the shifted data is a plain
//! [`OutputPin`](embedded_hal::digital::OutputPin).

use core::fmt;

use nb::block;

use crate::consts::HOST_PACKET_LEN;
use crate::error::Error;

/// Packet oriented link to the host.
pub trait HostLink {
    /// Error reported by the link.
    type Error;

    /// Returns `true` once after the host (re)configured the link,
    /// e.g. after a reconnect.
    fn configuration_changed(&mut self) -> bool;

    /// Reads the bytes the host has sent so far into `buf`
    /// (at most [`HOST_PACKET_LEN`]).
    ///
    /// Returns `nb::Error::WouldBlock` if there is nothing to read.
    fn read_packet(&mut self, buf: &mut [u8]) -> nb::Result<usize, Self::Error>;

    /// Sends one packet of at most [`HOST_PACKET_LEN`] bytes. An empty
    /// packet is a zero-length packet marking the end of a transfer.
    ///
    /// Returns `nb::Error::WouldBlock` while the link is not ready to send.
    fn write_packet(&mut self, data: &[u8]) -> nb::Result<(), Self::Error>;
}

/// Queue in front of the shift-register bus.
///
/// The bus signals completion separately, through a
/// [`TransferSignal`](crate::signal::TransferSignal).
pub trait ShiftBus {
    /// Queues a single byte.
    fn put_byte(&mut self, byte: u8);

    /// Queues a run of bytes, at most one frame long.
    fn put_array(&mut self, data: &[u8]);

    /// Number of bytes waiting to be shifted out.
    fn queue_depth(&self) -> usize;

    /// Drops everything still queued.
    fn clear_queue(&mut self);
}

/// Sends `data` to the host, blocking until the link accepts each packet.
///
/// Data longer than [`HOST_PACKET_LEN`] is split into packets. Every
/// full-size packet is followed by a zero-length packet so the host can
/// find the end of the transfer. Empty `data` sends a single zero-length
/// packet.
///
/// # Errors
/// [`Error::HostLink`] if the link reports a failure.
pub fn write_host<H: HostLink>(host: &mut H, data: &[u8]) -> Result<(), Error> {
    if data.is_empty() {
        return block!(host.write_packet(&[])).map_err(|_| Error::HostLink);
    }
    for chunk in data.chunks(HOST_PACKET_LEN) {
        block!(host.write_packet(chunk)).map_err(|_| Error::HostLink)?;
        if chunk.len() == HOST_PACKET_LEN {
            block!(host.write_packet(&[])).map_err(|_| Error::HostLink)?;
        }
    }
    Ok(())
}

/// Formats `args` straight onto the host link, without an intermediate
/// buffer. Each formatted piece goes out through [`write_host`].
///
/// # Errors
/// [`Error::HostLink`] if the link reports a failure.
pub fn write_host_fmt<H: HostLink>(host: &mut H, args: fmt::Arguments<'_>) -> Result<(), Error> {
    let mut writer = HostWriter { host, failed: None };
    match fmt::write(&mut writer, args) {
        Ok(()) => Ok(()),
        Err(_) => Err(writer.failed.unwrap_or(Error::HostLink)),
    }
}

struct HostWriter<'a, H> {
    host: &'a mut H,
    failed: Option<Error>,
}

impl<H: HostLink> fmt::Write for HostWriter<'_, H> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        write_host(self.host, s.as_bytes()).map_err(|err| {
            self.failed = Some(err);
            fmt::Error
        })
    }
}
