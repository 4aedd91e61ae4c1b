//! Foreground loop tying the host link to the switch bank.
//!
//! The [`Controller`] is polled from the main loop. Each
//! [`poll()`](Controller::poll):
//!
//! 1. Drops any partial line if the host reconfigured the link
//! 2. Fires the load pulse for a frame the bus finished shifting
//! 3. Reads whatever the host has sent and runs every completed line
//! 4. Keeps the bus clock fed while `CLOCK` is active
//!
//! For every completed line the host gets an echo, `Command: "<line>"\r\n`,
//! followed by `OK\r\n` or `ERROR: <message>\r\n`.
//!
//! ## Example
//!
//! ```rust,ignore
//! static BUS_DONE: TransferSignal = TransferSignal::new();
//!
//! let mut controller = Controller::new(usb, spi, ld_pin, &BUS_DONE, Config::default())?;
//! controller.run();
//! ```

use embedded_hal::digital::OutputPin;

use crate::command::tokenize;
use crate::config::Config;
use crate::consts::{ECHO_PREFIX, ECHO_SUFFIX, HOST_PACKET_LEN, REPLY_OK};
use crate::dispatcher::Dispatcher;
use crate::error::Error;
use crate::line_buffer::LineBuffer;
use crate::signal::TransferSignal;
use crate::transport::{HostLink, ShiftBus, write_host, write_host_fmt};

/// Host command processor for the switch bank.
///
/// ## Type Parameters
///
/// - `HOST`: link to the host, see [`HostLink`]
/// - `BUS`: shift-register bus queue, see [`ShiftBus`]
/// - `LD`: strobe output pin
#[derive(Debug)]
pub struct Controller<'s, HOST, BUS, LD>
where
    HOST: HostLink,
    BUS: ShiftBus,
    LD: OutputPin,
{
    /// Link to the host
    pub host: HOST,
    /// Command executor, owning the bus and the strobe line
    pub dispatcher: Dispatcher<'s, BUS, LD>,
    lines: LineBuffer,
}

impl<'s, HOST, BUS, LD> Controller<'s, HOST, BUS, LD>
where
    HOST: HostLink,
    BUS: ShiftBus,
    LD: OutputPin,
{
    /// Creates a controller. `signal` must be notified by the bus
    /// completion interrupt.
    ///
    /// # Errors
    /// [`Error::InvalidTerminator`] if `config.terminator` is unusable.
    pub fn new(
        host: HOST,
        bus: BUS,
        strobe: LD,
        signal: &'s TransferSignal,
        config: Config,
    ) -> Result<Self, Error> {
        let lines = LineBuffer::new(config.terminator)?;
        let mut dispatcher = Dispatcher::new(bus, strobe, signal, config.default_state);
        dispatcher.set_clock_low_water(config.clock_low_water);
        Ok(Self {
            host,
            dispatcher,
            lines,
        })
    }

    /// The receive buffer.
    pub fn lines(&self) -> &LineBuffer {
        &self.lines
    }

    /// Runs one iteration of the foreground loop.
    ///
    /// # Errors
    /// - [`Error::HostLink`] if reading from or replying to the host failed
    /// - [`Error::Strobe`] if a load pulse could not be driven
    ///
    /// Command errors are reported to the host and do not end up here.
    pub fn poll(&mut self) -> Result<(), Error> {
        if self.host.configuration_changed() {
            info!("host link reconfigured, dropping {} bytes", self.lines.len());
            self.lines.reset();
        }

        // Latch a finished frame before new commands queue the next one
        let _ = self.dispatcher.service_load_pulse()?;

        let mut packet = [0u8; HOST_PACKET_LEN];
        match self.host.read_packet(&mut packet) {
            Ok(count) => self.receive(&packet[..count.min(HOST_PACKET_LEN)])?,
            Err(nb::Error::WouldBlock) => {}
            Err(nb::Error::Other(_)) => return Err(Error::HostLink),
        }

        self.dispatcher.feed_clock();
        Ok(())
    }

    /// Feeds bytes received from the host and runs every line they complete.
    ///
    /// An overflowing packet is dropped and logged; the next line is then
    /// skipped.
    ///
    /// # Errors
    /// See [`poll()`](Self::poll). Every complete line is run even after a
    /// failure; the first failure is returned.
    pub fn receive(&mut self, data: &[u8]) -> Result<(), Error> {
        if let Err(err) = self.lines.append(data) {
            warn!("{}, dropped {} bytes", err, data.len());
        }
        let mut result = Ok(());
        while let Some(line) = self.lines.next_line() {
            let outcome = self.run_line(&line);
            if result.is_ok() {
                result = outcome;
            }
        }
        result
    }

    /// Polls forever. Failures are logged and polling carries on.
    pub fn run(&mut self) -> ! {
        loop {
            if let Err(err) = self.poll() {
                error!("poll failed: {}", err);
            }
        }
    }

    fn run_line(&mut self, line: &[u8]) -> Result<(), Error> {
        let echoed = self.echo(line);
        let result = tokenize(line).and_then(|parsed| self.dispatcher.dispatch(&parsed));
        let replied = match result {
            Ok(()) => write_host(&mut self.host, REPLY_OK),
            Err(err) => {
                debug!("command failed: {}", err);
                write_host_fmt(&mut self.host, format_args!("ERROR: {}\r\n", err))
            }
        };
        echoed?;
        replied?;
        match result {
            Err(Error::Strobe) => Err(Error::Strobe),
            _ => Ok(()),
        }
    }

    fn echo(&mut self, line: &[u8]) -> Result<(), Error> {
        write_host(&mut self.host, ECHO_PREFIX)?;
        if !line.is_empty() {
            write_host(&mut self.host, line)?;
        }
        write_host(&mut self.host, ECHO_SUFFIX)
    }
}
