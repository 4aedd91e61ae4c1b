use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::controller::Controller;
use crate::transport::{HostLink, ShiftBus};

/// Runs a blocking loop that polls the controller every `poll_us`
/// microseconds.
///
/// For firmware that has nothing else to do between polls. Poll failures
/// are logged and the loop carries on.
///
/// # Arguments
/// - `controller`: the controller to drive
/// - `delay`: a delay provider implementing [`DelayNs`], typically from the HAL
/// - `poll_us`: pause between polls, in microseconds
///
/// # Example
/// ```rust,ignore
/// use switchbank::run_poll_loop;
/// let mut controller = Controller::new(usb, spi, ld_pin, &BUS_DONE, Config::default())?;
/// run_poll_loop(&mut controller, &mut delay, 100);
/// ```
pub fn run_poll_loop<D, HOST, BUS, LD>(
    controller: &mut Controller<'_, HOST, BUS, LD>,
    delay: &mut D,
    poll_us: u32,
) -> !
where
    D: DelayNs,
    HOST: HostLink,
    BUS: ShiftBus,
    LD: OutputPin,
{
    loop {
        if let Err(err) = controller.poll() {
            error!("poll failed: {}", err);
        }
        delay.delay_us(poll_us);
    }
}
