use heapless::Vec;

use crate::sensing::{
    classify::median,
    config::{SAMPLE_SIZE, SESSION_CAPACITY},
    types::Channel,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionProgress {
    Collected,
    /// This channel just took its median.
    ChannelDone,
    /// Both channels hold a median; the session is ready to classify.
    Complete,
    /// The channel already finished; the sample was dropped.
    Ignored,
}

/// Samples collected per channel during one Detecting window.
///
/// A channel stores `SAMPLE_SIZE` samples while counting up, then takes one
/// more before computing its median, so medians cover `SAMPLE_SIZE + 1`
/// readings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GestureSession {
    distances: [Vec<f32, SESSION_CAPACITY>; 2],
    counts: [usize; 2],
    medians: [Option<f32>; 2],
}

impl GestureSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accumulate(&mut self, channel: Channel, distance_cm: f32) -> SessionProgress {
        let idx = channel.index();
        if self.medians[idx].is_some() {
            return SessionProgress::Ignored;
        }

        if self.distances[idx].push(distance_cm).is_err() {
            return SessionProgress::Ignored;
        }
        if self.counts[idx] < SAMPLE_SIZE {
            self.counts[idx] += 1;
            return SessionProgress::Collected;
        }

        let mut sorted = self.distances[idx].clone();
        self.medians[idx] = median(&mut sorted);
        if self.medians.iter().all(Option::is_some) {
            SessionProgress::Complete
        } else {
            SessionProgress::ChannelDone
        }
    }

    pub fn count(&self, channel: Channel) -> usize {
        self.counts[channel.index()]
    }

    pub fn distances(&self, channel: Channel) -> &[f32] {
        &self.distances[channel.index()]
    }

    pub fn median(&self, channel: Channel) -> Option<f32> {
        self.medians[channel.index()]
    }

    /// `(left, right)` once both channels are done.
    pub fn medians(&self) -> Option<(f32, f32)> {
        Some((
            self.medians[Channel::Left.index()]?,
            self.medians[Channel::Right.index()]?,
        ))
    }

    pub fn is_empty(&self) -> bool {
        self.distances.iter().all(|d| d.is_empty())
    }
}
