use embassy_futures::select::{select, Either};
use embassy_sync::{blocking_mutex::raw::RawMutex, signal::Signal};
use embassy_time::{Duration, Ticker};
use embedded_hal::{delay::DelayNs, digital::OutputPin};

use super::{
    config::{SensorConfig, SAMPLE_SIZE},
    pulse::PulseGenerator,
    types::{Mode, SchedulerCommand},
};

/// Trigger cadence for `mode`: idle polling while waiting, `SAMPLE_SIZE`
/// pulses per swipe window while detecting.
pub fn command_for_mode(mode: Mode, config: &SensorConfig) -> SchedulerCommand {
    match mode {
        Mode::Off => SchedulerCommand::Halt,
        Mode::Waiting => {
            SchedulerCommand::Run(Duration::from_millis(config.sample_interval_ms as u64))
        }
        Mode::Detecting => SchedulerCommand::Run(detecting_period(config)),
    }
}

pub fn detecting_period(config: &SensorConfig) -> Duration {
    Duration::from_micros(config.swipe_speed_ms as u64 * 1_000 / SAMPLE_SIZE as u64)
}

/// Fires the trigger on the most recently signalled period. A new command
/// drops the running ticker before the next one is armed, and a pending
/// command wins over a due tick. Never returns.
pub async fn run_sampling_scheduler<M, P, D>(
    commands: &Signal<M, SchedulerCommand>,
    pulse: &mut PulseGenerator<P, D>,
)
where
    M: RawMutex,
    P: OutputPin,
    D: DelayNs,
{
    let mut command = SchedulerCommand::Halt;
    loop {
        command = match command {
            SchedulerCommand::Halt => {
                log::debug!("scheduler: halted");
                commands.wait().await
            }
            SchedulerCommand::Run(period) => {
                log::debug!("scheduler: run period_us={}", period.as_micros());
                let mut ticker = Ticker::every(period);
                loop {
                    match select(commands.wait(), ticker.next()).await {
                        Either::First(next) => break next,
                        Either::Second(()) => {
                            if let Err(err) = pulse.fire() {
                                log::warn!("scheduler: trigger_failed err={:?}", err);
                            }
                        }
                    }
                }
            }
        };
    }
}
