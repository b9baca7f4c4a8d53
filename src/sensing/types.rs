use embassy_time::{Duration, Instant};

use super::config::SensorConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Left,
    Right,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Left, Channel::Right];

    pub const fn index(self) -> usize {
        match self {
            Channel::Left => 0,
            Channel::Right => 1,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Channel::Left => "left",
            Channel::Right => "right",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeDirection {
    Rising,
    Falling,
}

/// One echo-line transition as delivered by the pin driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeEvent {
    pub channel: Channel,
    pub direction: EdgeDirection,
    pub at: Instant,
}

impl EdgeEvent {
    pub const fn rising(channel: Channel, at: Instant) -> Self {
        Self {
            channel,
            direction: EdgeDirection::Rising,
            at,
        }
    }

    pub const fn falling(channel: Channel, at: Instant) -> Self {
        Self {
            channel,
            direction: EdgeDirection::Falling,
            at,
        }
    }
}

/// The pin driver failed while delivering an edge for `channel`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SensorFault {
    pub channel: Channel,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistanceSample {
    pub channel: Channel,
    pub distance_cm: f32,
    pub at: Instant,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Off,
    Waiting,
    Detecting,
}

impl Mode {
    pub const fn label(self) -> &'static str {
        match self {
            Mode::Off => "off",
            Mode::Waiting => "waiting",
            Mode::Detecting => "detecting",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    Press,
    SwipeLeft,
    SwipeRight,
}

impl Gesture {
    /// Wire name used by the host protocol.
    pub const fn label(self) -> &'static str {
        match self {
            Gesture::Press => "Press",
            Gesture::SwipeLeft => "Swipe Left",
            Gesture::SwipeRight => "Swipe Right",
        }
    }
}

/// Distance in hundredths of a centimetre, as reported to the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct CentiCm(pub u32);

impl core::fmt::Display for CentiCm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CalibrationReport {
    pub left: CentiCm,
    pub right: CentiCm,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostCommand {
    Configure(SensorConfig),
    Start,
    Stop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostEvent {
    Started,
    Gesture(Gesture),
    Calibration(CalibrationReport),
}

/// Instruction for the trigger task; `Run` always replaces the running ticker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerCommand {
    Run(Duration),
    Halt,
}
