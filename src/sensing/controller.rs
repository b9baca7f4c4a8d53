use super::{
    config::{ConfigError, SensorConfig},
    core::{EngineOutput, GestureEngine},
    echo::ReadingRejected,
    types::{EdgeEvent, HostCommand, HostEvent, Mode, SchedulerCommand, SensorFault},
};

/// Everything the sensing pipeline task consumes, in arrival order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SensingInput {
    Edge(Result<EdgeEvent, SensorFault>),
    Command(HostCommand),
}

/// Host events in emission order plus the latest trigger cadence.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControllerOutput {
    pub events: [Option<HostEvent>; 2],
    pub scheduler: Option<SchedulerCommand>,
    pub rejected: Option<ReadingRejected>,
}

impl ControllerOutput {
    fn ack() -> Self {
        Self {
            events: [Some(HostEvent::Started), None],
            ..Self::default()
        }
    }
}

impl From<EngineOutput> for ControllerOutput {
    fn from(output: EngineOutput) -> Self {
        Self {
            events: [
                output.calibration.map(HostEvent::Calibration),
                output.gesture.map(HostEvent::Gesture),
            ],
            scheduler: output.scheduler,
            rejected: output.rejected,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleError {
    NotConfigured,
    InvalidConfig(ConfigError),
}

impl From<ConfigError> for LifecycleError {
    fn from(value: ConfigError) -> Self {
        Self::InvalidConfig(value)
    }
}

/// Configure-once, start and stop around a [`GestureEngine`].
#[derive(Default)]
pub struct SensingController {
    engine: GestureEngine,
    config: Option<SensorConfig>,
}

impl SensingController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.engine.mode()
    }

    pub fn config(&self) -> Option<&SensorConfig> {
        self.config.as_ref()
    }

    pub fn engine(&self) -> &GestureEngine {
        &self.engine
    }

    pub fn handle(&mut self, input: SensingInput) -> ControllerOutput {
        match input {
            SensingInput::Edge(edge) => self.engine.on_edge(edge).into(),
            SensingInput::Command(command) => self.command(command),
        }
    }

    pub fn command(&mut self, command: HostCommand) -> ControllerOutput {
        let result = match command {
            HostCommand::Configure(config) => self.configure(config),
            HostCommand::Start => self.start(),
            HostCommand::Stop => Ok(self.engine.stop().into()),
        };
        result.unwrap_or_else(|err| {
            log::warn!("controller: command_rejected err={:?}", err);
            ControllerOutput::default()
        })
    }

    /// Only the first valid configuration is kept. Every accepted call is
    /// acknowledged.
    pub fn configure(&mut self, config: SensorConfig) -> Result<ControllerOutput, LifecycleError> {
        if self.config.is_some() {
            log::info!("controller: config_ignored reason=already_configured");
            return Ok(ControllerOutput::ack());
        }
        config.validate()?;
        log::info!(
            "controller: configured left_cm={} right_cm={} swipe_ms={} sample_ms={} timeout_us={} calibrate={}",
            config.left_distance_cm,
            config.right_distance_cm,
            config.swipe_speed_ms,
            config.sample_interval_ms,
            config.sensor_timeout_us,
            config.calibrate
        );
        self.config = Some(config);
        Ok(ControllerOutput::ack())
    }

    pub fn start(&mut self) -> Result<ControllerOutput, LifecycleError> {
        let config = self.config.ok_or(LifecycleError::NotConfigured)?;
        Ok(self.engine.start(config).into())
    }
}
