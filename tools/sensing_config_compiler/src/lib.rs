//! Compiles `config/sensing.toml` into the Rust constant the firmware embeds
//! as its default sensor configuration.

use std::{fmt, fs, path::Path};

use serde::Deserialize;

/// Per-channel session target; the fast trigger period is
/// `swipe_speed_ms / SAMPLE_SIZE`, so shorter windows cannot be scheduled.
const SAMPLE_SIZE: u32 = 5;
const MAX_GPIO: u8 = 39;

#[derive(Debug)]
pub enum ConfigCompilerError {
    Io(String),
    Parse(String),
    Validation(String),
}

impl fmt::Display for ConfigCompilerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "io error: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::Validation(msg) => write!(f, "validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigCompilerError {}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SensingFile {
    pub pins: PinSection,
    pub thresholds: ThresholdSection,
    pub timing: TimingSection,
    pub debug: DebugSection,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PinSection {
    pub trigger: u8,
    pub echo_left: u8,
    pub echo_right: u8,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ThresholdSection {
    pub left_cm: f32,
    pub right_cm: f32,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TimingSection {
    pub swipe_speed_ms: u32,
    pub sample_interval_ms: u32,
    pub sensor_timeout_us: u32,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DebugSection {
    pub calibrate: bool,
}

pub fn parse_sensing_file(path: &Path) -> Result<SensingFile, ConfigCompilerError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| ConfigCompilerError::Io(format!("{}: {e}", path.display())))?;
    parse_sensing_str(&raw)
}

pub fn parse_sensing_str(raw: &str) -> Result<SensingFile, ConfigCompilerError> {
    toml::from_str(raw).map_err(|e| ConfigCompilerError::Parse(e.to_string()))
}

pub fn validate_config(config: &SensingFile) -> Result<(), ConfigCompilerError> {
    let invalid = |msg: &str| Err(ConfigCompilerError::Validation(msg.to_string()));

    let pins = &config.pins;
    if pins.trigger > MAX_GPIO || pins.echo_left > MAX_GPIO || pins.echo_right > MAX_GPIO {
        return invalid("all pins fields must be <= 39");
    }
    if pins.trigger == pins.echo_left
        || pins.trigger == pins.echo_right
        || pins.echo_left == pins.echo_right
    {
        return invalid("pins.trigger, pins.echo_left and pins.echo_right must be distinct");
    }

    if !(config.thresholds.left_cm.is_finite() && config.thresholds.left_cm > 0.0) {
        return invalid("thresholds.left_cm must be a positive finite number");
    }
    if !(config.thresholds.right_cm.is_finite() && config.thresholds.right_cm > 0.0) {
        return invalid("thresholds.right_cm must be a positive finite number");
    }

    let timing = &config.timing;
    if timing.swipe_speed_ms < SAMPLE_SIZE {
        return invalid("timing.swipe_speed_ms must be >= 5");
    }
    if timing.sample_interval_ms == 0 {
        return invalid("timing.sample_interval_ms must be > 0");
    }
    if timing.sensor_timeout_us == 0 {
        return invalid("timing.sensor_timeout_us must be > 0");
    }

    Ok(())
}

pub fn render_generated_config(config: &SensingFile) -> String {
    let mut out = String::new();
    out.push_str("// @generated by sensing_config_compiler. Do not edit.\n\n");
    out.push_str("pub const DEFAULT_SENSOR_CONFIG: SensorConfig = SensorConfig {\n");
    out.push_str(&format!("    trigger_pin: {},\n", config.pins.trigger));
    out.push_str(&format!("    echo_left_pin: {},\n", config.pins.echo_left));
    out.push_str(&format!("    echo_right_pin: {},\n", config.pins.echo_right));
    out.push_str(&format!(
        "    left_distance_cm: {},\n",
        float_literal(config.thresholds.left_cm)
    ));
    out.push_str(&format!(
        "    right_distance_cm: {},\n",
        float_literal(config.thresholds.right_cm)
    ));
    out.push_str(&format!(
        "    swipe_speed_ms: {},\n",
        config.timing.swipe_speed_ms
    ));
    out.push_str(&format!(
        "    sample_interval_ms: {},\n",
        config.timing.sample_interval_ms
    ));
    out.push_str(&format!(
        "    sensor_timeout_us: {},\n",
        config.timing.sensor_timeout_us
    ));
    out.push_str(&format!("    calibrate: {},\n", config.debug.calibrate));
    out.push_str("};\n");
    out
}

pub fn generate_from_path(path: &Path) -> Result<String, ConfigCompilerError> {
    let config = parse_sensing_file(path)?;
    validate_config(&config)?;
    Ok(render_generated_config(&config))
}

// `{:?}` keeps the decimal point on whole numbers, so the output is always a
// float literal.
fn float_literal(value: f32) -> String {
    format!("{value:?}")
}
