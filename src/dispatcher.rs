//! Command execution against the switch bank.
//!
//! The [`Dispatcher`] owns the switch state, the shift-register bus and the
//! strobe line. Commands that change the switches pack a new frame, queue
//! it on the bus and arm a load pulse. The pulse is fired from
//! [`Dispatcher::service_load_pulse`] once the bus reports the transfer
//! finished, so dispatching never waits for the bus.
//!
//! While the clock output is running (`CLOCK`), the bus is kept busy with
//! idle bytes and every command that would touch the switches or the strobe
//! is refused with [`Error::ClockActive`] until `STOP`. A frame still
//! shifting when `CLOCK` starts is never latched.

use embedded_hal::digital::OutputPin;

use crate::command::{Command, ParsedCommand};
use crate::consts::{CLOCK_LOW_WATER, IDLE_BYTE};
use crate::encoding::pack;
use crate::error::Error;
use crate::signal::TransferSignal;
use crate::switches::{Switch, SwitchMatrix};
use crate::transport::ShiftBus;

/// Executes parsed commands.
///
/// ## Type Parameters
///
/// - `BUS`: the shift-register bus queue
/// - `LD`: the strobe (load) output pin
#[derive(Debug)]
pub struct Dispatcher<'s, BUS, LD>
where
    BUS: ShiftBus,
    LD: OutputPin,
{
    /// Shift-register bus
    pub bus: BUS,
    /// Strobe line latching shifted data into the registers
    pub strobe: LD,
    matrix: SwitchMatrix,
    clock: bool,
    pulse_pending: bool,
    clock_low_water: usize,
    signal: &'s TransferSignal,
}

impl<'s, BUS, LD> Dispatcher<'s, BUS, LD>
where
    BUS: ShiftBus,
    LD: OutputPin,
{
    /// Creates a dispatcher with every switch set to `default_state`.
    ///
    /// Nothing is sent to the bus until the first command.
    pub fn new(bus: BUS, strobe: LD, signal: &'s TransferSignal, default_state: Switch) -> Self {
        Self {
            bus,
            strobe,
            matrix: SwitchMatrix::new(default_state),
            clock: false,
            pulse_pending: false,
            clock_low_water: CLOCK_LOW_WATER,
            signal,
        }
    }

    /// Sets the queue depth below which idle bytes are fed while the clock
    /// output runs.
    pub fn set_clock_low_water(&mut self, depth: usize) {
        self.clock_low_water = depth;
    }

    /// Current switch state.
    pub fn matrix(&self) -> &SwitchMatrix {
        &self.matrix
    }

    /// Whether the idle clock output is running.
    pub fn clock_running(&self) -> bool {
        self.clock
    }

    /// Whether a queued frame is waiting for its load pulse.
    pub fn pulse_pending(&self) -> bool {
        self.pulse_pending
    }

    /// Executes one command.
    ///
    /// # Errors
    /// - [`Error::ArgCount`] / [`Error::ArgFormat`] for bad arguments
    /// - [`Error::ClockActive`] if the command is refused while the clock runs
    /// - [`Error::NotImplemented`] for `WRITE`
    /// - [`Error::InvalidCommand`] for [`Command::Invalid`]
    /// - [`Error::Strobe`] if the strobe line could not be driven, either for
    ///   `LOAD` or to latch a finished frame before the next one is queued
    ///
    /// A failed command leaves the switch state untouched.
    pub fn dispatch(&mut self, parsed: &ParsedCommand<'_>) -> Result<(), Error> {
        debug!("dispatch {:?} ({} args)", parsed.command, parsed.args.len());
        match parsed.command {
            Command::Noop => Ok(()),
            Command::Clear => self.clear(),
            Command::Write => self.write(&parsed.args),
            Command::Select => self.select(&parsed.args),
            Command::Load => self.load(),
            Command::Clock => self.clock(),
            Command::Stop => {
                self.stop();
                Ok(())
            }
            Command::Invalid => Err(Error::InvalidCommand),
        }
    }

    /// Fires the load pulse for a finished frame.
    ///
    /// Consumes any completion reported through the [`TransferSignal`].
    /// Returns `true` if the strobe was pulsed.
    ///
    /// # Errors
    /// [`Error::Strobe`] if the strobe line could not be driven.
    pub fn service_load_pulse(&mut self) -> Result<bool, Error> {
        if !self.signal.take() || !self.pulse_pending {
            return Ok(false);
        }
        self.pulse_pending = false;
        self.pulse()?;
        Ok(true)
    }

    /// Tops the bus queue up with idle bytes while the clock output runs.
    pub fn feed_clock(&mut self) {
        if !self.clock {
            return;
        }
        for _ in self.bus.queue_depth()..self.clock_low_water {
            self.bus.put_byte(IDLE_BYTE);
        }
    }

    fn clear(&mut self) -> Result<(), Error> {
        self.ensure_clock_stopped()?;
        self.transmit(Switch::CLOSED)
    }

    fn select(&mut self, args: &[&[u8]]) -> Result<(), Error> {
        let &[arg] = args else {
            return Err(Error::ArgCount);
        };
        let &[contact] = arg else {
            return Err(Error::ArgFormat);
        };
        self.ensure_clock_stopped()?;
        self.transmit(Switch::from_char(contact))
    }

    fn write(&mut self, args: &[&[u8]]) -> Result<(), Error> {
        let &[arg] = args else {
            return Err(Error::ArgCount);
        };
        let hex = arg
            .strip_prefix(b"0x")
            .or_else(|| arg.strip_prefix(b"0X"))
            .unwrap_or(arg);
        debug!("WRITE of {} hex digits refused", hex.len());
        Err(Error::NotImplemented)
    }

    fn load(&mut self) -> Result<(), Error> {
        self.ensure_clock_stopped()?;
        self.pulse()
    }

    fn clock(&mut self) -> Result<(), Error> {
        self.settle_pending_pulse()?;
        // Idle bytes follow whatever frame is still shifting, so it is never latched
        self.pulse_pending = false;
        self.clock = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.clock = false;
        self.bus.clear_queue();
        // Whatever frame was queued is gone, so there is nothing to latch
        self.pulse_pending = false;
    }

    fn ensure_clock_stopped(&self) -> Result<(), Error> {
        if self.clock {
            Err(Error::ClockActive)
        } else {
            Ok(())
        }
    }

    fn transmit(&mut self, state: Switch) -> Result<(), Error> {
        self.settle_pending_pulse()?;
        self.matrix.set_all(state);
        let frame = pack(&self.matrix);
        self.pulse_pending = true;
        self.bus.put_array(&frame);
        Ok(())
    }

    /// Latches an armed frame the bus already finished. Without an armed
    /// frame, any completion left over from idle transfers is dropped.
    fn settle_pending_pulse(&mut self) -> Result<(), Error> {
        if self.pulse_pending {
            let _ = self.service_load_pulse()?;
        } else {
            self.signal.reset();
        }
        Ok(())
    }

    fn pulse(&mut self) -> Result<(), Error> {
        self.strobe.set_high().map_err(|_| Error::Strobe)?;
        self.strobe.set_low().map_err(|_| Error::Strobe)
    }
}
