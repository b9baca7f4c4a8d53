use embedded_hal::{delay::DelayNs, digital::OutputPin};

use super::config::TRIGGER_PULSE_TIME_US;

/// Drives the shared trigger line of both sensors.
pub struct PulseGenerator<P, D> {
    trigger: P,
    delay: D,
}

impl<P, D> PulseGenerator<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    pub fn new(mut trigger: P, delay: D) -> Result<Self, P::Error> {
        trigger.set_low()?;
        Ok(Self { trigger, delay })
    }

    /// Emits one trigger pulse, starting a ranging cycle on both channels.
    pub fn fire(&mut self) -> Result<(), P::Error> {
        if let Err(err) = self.trigger.set_high() {
            let _ = self.trigger.set_low();
            return Err(err);
        }
        self.delay.delay_us(TRIGGER_PULSE_TIME_US);
        self.trigger.set_low()
    }
}
