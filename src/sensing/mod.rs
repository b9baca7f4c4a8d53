//! Two-channel ultrasonic ranging and gesture classification.
//!
//! Edge timestamps become echo pulses, pulses become distances, and the
//! Off/Waiting/Detecting machine turns distance streams into gestures. All of
//! it runs on the host with synthetic timestamps; the firmware only feeds
//! edges in and drives the trigger pin.

pub mod classify;
pub mod config;
pub mod controller;
pub mod core;
pub mod distance;
pub mod echo;
pub mod pipeline;
pub mod pulse;
pub mod schedule;
pub mod types;

pub use self::core::{EngineOutput, GestureEngine, GestureSession, SessionProgress};
pub use config::{ConfigError, SensorConfig, DEFAULT_SENSOR_CONFIG};
pub use controller::{ControllerOutput, LifecycleError, SensingController, SensingInput};
pub use echo::{EchoPulse, EchoTimer, ReadingRejected};
pub use pulse::PulseGenerator;
pub use types::{
    CalibrationReport, CentiCm, Channel, DistanceSample, EdgeDirection, EdgeEvent, Gesture,
    HostCommand, HostEvent, Mode, SchedulerCommand, SensorFault,
};
