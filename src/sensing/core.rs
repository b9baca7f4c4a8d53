use statig::blocking::IntoStateMachineExt as _;

use super::{
    config::{SensorConfig, DEFAULT_SENSOR_CONFIG},
    distance::{distance_cm, to_centi_cm, within_timeout},
    echo::{EchoTimer, ReadingRejected},
    types::{
        CalibrationReport, Channel, DistanceSample, EdgeEvent, Gesture, Mode, SchedulerCommand,
        SensorFault,
    },
};

mod hsm;
mod session;
#[cfg(test)]
mod tests;

use hsm::{SensingHsm, SensingHsmEvent};
pub use session::{GestureSession, SessionProgress};

/// Everything one engine call asks of its surroundings.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EngineOutput {
    pub scheduler: Option<SchedulerCommand>,
    pub gesture: Option<Gesture>,
    pub calibration: Option<CalibrationReport>,
    pub rejected: Option<ReadingRejected>,
}

#[derive(Clone, Copy, Debug, Default)]
struct DispatchContext {
    scheduler: Option<SchedulerCommand>,
    gesture: Option<Gesture>,
}

impl DispatchContext {
    fn reschedule(&mut self, command: SchedulerCommand) {
        self.scheduler = Some(command);
    }

    fn emit(&mut self, gesture: Gesture) {
        self.gesture = Some(gesture);
    }

    fn finish(self) -> EngineOutput {
        EngineOutput {
            scheduler: self.scheduler,
            gesture: self.gesture,
            ..EngineOutput::default()
        }
    }
}

/// Echo timing, distance conversion and the Off/Waiting/Detecting machine
/// behind one serialized entry point per input.
pub struct GestureEngine {
    machine: statig::blocking::StateMachine<SensingHsm>,
    echo: EchoTimer,
    last_distance_cm: [f32; 2],
}

impl Default for GestureEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureEngine {
    pub fn new() -> Self {
        Self {
            machine: SensingHsm::new(DEFAULT_SENSOR_CONFIG).state_machine(),
            echo: EchoTimer::new(),
            last_distance_cm: [0.0; 2],
        }
    }

    pub fn mode(&self) -> Mode {
        self.machine.inner().mode
    }

    pub fn config(&self) -> &SensorConfig {
        &self.machine.inner().config
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.machine.inner().session.as_ref()
    }

    /// Off -> Waiting. Clears per-channel echo state; ignored when running.
    pub fn start(&mut self, config: SensorConfig) -> EngineOutput {
        if self.mode() == Mode::Off {
            self.echo.reset();
            self.last_distance_cm = [0.0; 2];
        }
        self.dispatch(SensingHsmEvent::Start(config))
    }

    /// Any -> Off. An open session is dropped without classification.
    pub fn stop(&mut self) -> EngineOutput {
        let output = self.dispatch(SensingHsmEvent::Stop);
        self.echo.reset();
        output
    }

    pub fn on_edge(&mut self, edge: Result<EdgeEvent, SensorFault>) -> EngineOutput {
        if self.mode() == Mode::Off {
            return EngineOutput::default();
        }

        let edge = match edge {
            Ok(edge) => edge,
            Err(fault) => {
                self.echo.abandon(fault.channel);
                log::warn!(
                    "echo: read_fault channel={} cycle=abandoned",
                    fault.channel.label()
                );
                return rejected(fault.into());
            }
        };

        let pulse = match self.echo.on_edge(edge) {
            Ok(Some(pulse)) => pulse,
            Ok(None) => return EngineOutput::default(),
            Err(reason) => return self.drop_reading(reason),
        };

        if self.mode() != Mode::Detecting
            && !within_timeout(pulse.elapsed_us, self.config().sensor_timeout_us)
        {
            return self.drop_reading(ReadingRejected::OutOfRange {
                channel: pulse.channel,
                elapsed_us: pulse.elapsed_us,
            });
        }

        let sample = DistanceSample {
            channel: pulse.channel,
            distance_cm: distance_cm(pulse.elapsed_us),
            at: pulse.at,
        };
        self.on_sample(sample)
    }

    /// Feeds an already computed distance, e.g. from a replayed trace.
    pub fn on_sample(&mut self, sample: DistanceSample) -> EngineOutput {
        if self.mode() == Mode::Off {
            return EngineOutput::default();
        }

        self.last_distance_cm[sample.channel.index()] = sample.distance_cm;
        let calibration = self.config().calibrate.then(|| self.calibration_report());

        let mut output = self.dispatch(SensingHsmEvent::Sample(sample));
        output.calibration = calibration;
        output
    }

    pub fn calibration_report(&self) -> CalibrationReport {
        CalibrationReport {
            left: to_centi_cm(self.last_distance_cm[Channel::Left.index()]),
            right: to_centi_cm(self.last_distance_cm[Channel::Right.index()]),
        }
    }

    fn dispatch(&mut self, event: SensingHsmEvent) -> EngineOutput {
        let mut context = DispatchContext::default();
        self.machine.handle_with_context(&event, &mut context);
        context.finish()
    }

    fn drop_reading(&self, reason: ReadingRejected) -> EngineOutput {
        log::debug!(
            "echo: reading_dropped channel={} reason={} mode={}",
            reason.channel().label(),
            reason.reason(),
            self.mode().label()
        );
        rejected(reason)
    }
}

fn rejected(reason: ReadingRejected) -> EngineOutput {
    EngineOutput {
        rejected: Some(reason),
        ..EngineOutput::default()
    }
}
