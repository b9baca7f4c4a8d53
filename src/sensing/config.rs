use super::types::Channel;

/// Microseconds sound needs to travel one centimetre at 34321 cm/s.
pub const MICROSECONDS_PER_CM: f32 = 1e6 / 34321.0;
/// Target samples per channel in one detection session.
pub const SAMPLE_SIZE: usize = 5;
/// A session keeps one sample past the target before taking the median.
pub const SESSION_CAPACITY: usize = SAMPLE_SIZE + 1;
pub const TRIGGER_PULSE_TIME_US: u32 = 10;
pub const SWIPE_DIFFERENCE_MULTIPLE: f32 = 1.3;

const MAX_GPIO: u8 = 39;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensorConfig {
    pub trigger_pin: u8,
    pub echo_left_pin: u8,
    pub echo_right_pin: u8,
    pub left_distance_cm: f32,
    pub right_distance_cm: f32,
    /// Whole detection window in milliseconds.
    pub swipe_speed_ms: u32,
    /// Idle trigger period in milliseconds.
    pub sample_interval_ms: u32,
    /// Longest round trip accepted outside a detection session.
    pub sensor_timeout_us: u32,
    pub calibrate: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    PinOutOfRange(u8),
    PinConflict(u8),
    InvalidThreshold,
    SwipeWindowTooShort(u32),
    ZeroSampleInterval,
    ZeroSensorTimeout,
}

impl SensorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for pin in [self.trigger_pin, self.echo_left_pin, self.echo_right_pin] {
            if pin > MAX_GPIO {
                return Err(ConfigError::PinOutOfRange(pin));
            }
        }
        if self.trigger_pin == self.echo_left_pin || self.trigger_pin == self.echo_right_pin {
            return Err(ConfigError::PinConflict(self.trigger_pin));
        }
        if self.echo_left_pin == self.echo_right_pin {
            return Err(ConfigError::PinConflict(self.echo_left_pin));
        }
        if !valid_threshold(self.left_distance_cm) || !valid_threshold(self.right_distance_cm) {
            return Err(ConfigError::InvalidThreshold);
        }
        if (self.swipe_speed_ms as usize) < SAMPLE_SIZE {
            return Err(ConfigError::SwipeWindowTooShort(self.swipe_speed_ms));
        }
        if self.sample_interval_ms == 0 {
            return Err(ConfigError::ZeroSampleInterval);
        }
        if self.sensor_timeout_us == 0 {
            return Err(ConfigError::ZeroSensorTimeout);
        }
        Ok(())
    }

    pub const fn threshold_cm(&self, channel: Channel) -> f32 {
        match channel {
            Channel::Left => self.left_distance_cm,
            Channel::Right => self.right_distance_cm,
        }
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        DEFAULT_SENSOR_CONFIG
    }
}

fn valid_threshold(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

include!(concat!(env!("OUT_DIR"), "/sensing_config.rs"));
