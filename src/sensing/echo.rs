use embassy_time::{Instant, TICK_HZ};

use super::types::{Channel, EdgeDirection, EdgeEvent, SensorFault};

/// Completed echo pulse for one channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EchoPulse {
    pub channel: Channel,
    pub elapsed_us: f32,
    pub at: Instant,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReadingRejected {
    /// Falling edge with no usable rising edge before it.
    Unpaired(Channel),
    /// Round trip longer than the configured sensor timeout.
    OutOfRange { channel: Channel, elapsed_us: f32 },
    Fault(SensorFault),
}

impl ReadingRejected {
    pub const fn channel(&self) -> Channel {
        match self {
            Self::Unpaired(channel) => *channel,
            Self::OutOfRange { channel, .. } => *channel,
            Self::Fault(fault) => fault.channel,
        }
    }

    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Unpaired(_) => "unpaired",
            Self::OutOfRange { .. } => "timeout",
            Self::Fault(_) => "fault",
        }
    }
}

impl From<SensorFault> for ReadingRejected {
    fn from(value: SensorFault) -> Self {
        Self::Fault(value)
    }
}

/// Holds the rising-edge tick of each channel until its falling edge arrives.
#[derive(Clone, Copy, Debug, Default)]
pub struct EchoTimer {
    start: [Option<Instant>; 2],
}

impl EchoTimer {
    pub const fn new() -> Self {
        Self { start: [None; 2] }
    }

    /// Rising edges arm the channel and yield `Ok(None)`; falling edges
    /// consume the armed tick.
    pub fn on_edge(&mut self, edge: EdgeEvent) -> Result<Option<EchoPulse>, ReadingRejected> {
        let slot = &mut self.start[edge.channel.index()];
        match edge.direction {
            EdgeDirection::Rising => {
                *slot = Some(edge.at);
                Ok(None)
            }
            EdgeDirection::Falling => {
                let start = slot.take().ok_or(ReadingRejected::Unpaired(edge.channel))?;
                if edge.at < start {
                    return Err(ReadingRejected::Unpaired(edge.channel));
                }
                Ok(Some(EchoPulse {
                    channel: edge.channel,
                    elapsed_us: elapsed_us(start, edge.at),
                    at: edge.at,
                }))
            }
        }
    }

    /// Drops the in-flight cycle of `channel`.
    pub fn abandon(&mut self, channel: Channel) {
        self.start[channel.index()] = None;
    }

    pub fn reset(&mut self) {
        self.start = [None; 2];
    }

    pub fn is_armed(&self, channel: Channel) -> bool {
        self.start[channel.index()].is_some()
    }
}

/// Tick-accurate difference; keeps sub-microsecond resolution when the time
/// driver runs faster than 1 MHz.
pub fn elapsed_us(start: Instant, end: Instant) -> f32 {
    let ticks = end.as_ticks().saturating_sub(start.as_ticks());
    ticks as f32 * (1_000_000.0 / TICK_HZ as f32)
}
