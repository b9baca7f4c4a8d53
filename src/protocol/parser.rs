use crate::sensing::{HostCommand, SensorConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    NotUtf8,
    UnknownCommand,
    /// `START`/`STOP` followed by arguments.
    UnexpectedArgument,
    MalformedPair,
    UnknownKey,
    InvalidValue,
}

/// Parses one host line. `CONFIG` keys that are absent keep the value from
/// `defaults`; the result is not validated here.
pub fn parse_host_command(line: &[u8], defaults: &SensorConfig) -> Result<HostCommand, ParseError> {
    let line = core::str::from_utf8(line).map_err(|_| ParseError::NotUtf8)?;
    let mut tokens = line.split_ascii_whitespace();
    let command = tokens.next().ok_or(ParseError::Empty)?;

    if command.eq_ignore_ascii_case("START") {
        no_arguments(tokens)?;
        return Ok(HostCommand::Start);
    }
    if command.eq_ignore_ascii_case("STOP") {
        no_arguments(tokens)?;
        return Ok(HostCommand::Stop);
    }
    if !command.eq_ignore_ascii_case("CONFIG") {
        return Err(ParseError::UnknownCommand);
    }

    let mut config = *defaults;
    for pair in tokens {
        let (key, value) = pair.split_once('=').ok_or(ParseError::MalformedPair)?;
        apply_pair(&mut config, key, value)?;
    }
    Ok(HostCommand::Configure(config))
}

fn no_arguments<'a>(mut rest: impl Iterator<Item = &'a str>) -> Result<(), ParseError> {
    match rest.next() {
        Some(_) => Err(ParseError::UnexpectedArgument),
        None => Ok(()),
    }
}

fn apply_pair(config: &mut SensorConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "trigger" => config.trigger_pin = parse_value(value)?,
        "echo_left" => config.echo_left_pin = parse_value(value)?,
        "echo_right" => config.echo_right_pin = parse_value(value)?,
        "left_cm" => config.left_distance_cm = parse_value(value)?,
        "right_cm" => config.right_distance_cm = parse_value(value)?,
        "swipe_ms" => config.swipe_speed_ms = parse_value(value)?,
        "sample_ms" => config.sample_interval_ms = parse_value(value)?,
        "timeout_us" => config.sensor_timeout_us = parse_value(value)?,
        "calibrate" => config.calibrate = parse_flag(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

fn parse_value<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_flag(value: &str) -> Result<bool, ParseError> {
    match value {
        "1" | "true" | "on" => Ok(true),
        "0" | "false" | "off" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}
