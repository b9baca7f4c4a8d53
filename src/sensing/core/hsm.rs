use statig::prelude::*;

use super::{DispatchContext, GestureSession, SessionProgress};
use crate::sensing::{
    classify::classify_swipe,
    config::SensorConfig,
    schedule::command_for_mode,
    types::{DistanceSample, Mode},
};

#[derive(Clone, Copy, Debug)]
pub(super) enum SensingHsmEvent {
    Start(SensorConfig),
    Stop,
    Sample(DistanceSample),
}

pub(super) struct SensingHsm {
    pub(super) config: SensorConfig,
    pub(super) mode: Mode,
    /// Present exactly while `mode` is `Detecting`.
    pub(super) session: Option<GestureSession>,
}

impl SensingHsm {
    pub(super) fn new(config: SensorConfig) -> Self {
        Self {
            config,
            mode: Mode::Off,
            session: None,
        }
    }

    fn enter(&mut self, context: &mut DispatchContext, mode: Mode) {
        log::info!(
            "sensing: mode_change from={} to={}",
            self.mode.label(),
            mode.label()
        );
        self.mode = mode;
        self.session = match mode {
            Mode::Detecting => Some(GestureSession::new()),
            Mode::Off | Mode::Waiting => None,
        };
        context.reschedule(command_for_mode(mode, &self.config));
    }

    fn crosses_threshold(&self, sample: &DistanceSample) -> bool {
        sample.distance_cm <= self.config.threshold_cm(sample.channel)
    }
}

#[state_machine(initial = "State::off()")]
impl SensingHsm {
    #[state]
    fn off(&mut self, context: &mut DispatchContext, event: &SensingHsmEvent) -> Outcome<State> {
        match event {
            SensingHsmEvent::Start(config) => {
                self.config = *config;
                self.enter(context, Mode::Waiting);
                Transition(State::waiting())
            }
            SensingHsmEvent::Stop | SensingHsmEvent::Sample(_) => Handled,
        }
    }

    #[state]
    fn waiting(
        &mut self,
        context: &mut DispatchContext,
        event: &SensingHsmEvent,
    ) -> Outcome<State> {
        match event {
            SensingHsmEvent::Start(_) => {
                log::debug!("sensing: start_ignored mode=waiting");
                Handled
            }
            SensingHsmEvent::Stop => {
                self.enter(context, Mode::Off);
                Transition(State::off())
            }
            SensingHsmEvent::Sample(sample) => {
                if !self.crosses_threshold(sample) {
                    return Handled;
                }
                log::debug!(
                    "sensing: threshold_crossed channel={} distance_cm={}",
                    sample.channel.label(),
                    sample.distance_cm
                );
                self.enter(context, Mode::Detecting);
                Transition(State::detecting())
            }
        }
    }

    #[state]
    fn detecting(
        &mut self,
        context: &mut DispatchContext,
        event: &SensingHsmEvent,
    ) -> Outcome<State> {
        match event {
            SensingHsmEvent::Start(_) => {
                log::debug!("sensing: start_ignored mode=detecting");
                Handled
            }
            SensingHsmEvent::Stop => {
                log::info!("sensing: session_discarded reason=stop");
                self.enter(context, Mode::Off);
                Transition(State::off())
            }
            SensingHsmEvent::Sample(sample) => {
                let Some(session) = self.session.as_mut() else {
                    self.enter(context, Mode::Waiting);
                    return Transition(State::waiting());
                };
                if session.accumulate(sample.channel, sample.distance_cm)
                    != SessionProgress::Complete
                {
                    return Handled;
                }
                let Some((left_avg, right_avg)) = session.medians() else {
                    return Handled;
                };

                let gesture = classify_swipe(left_avg, right_avg, &self.config);
                match gesture {
                    Some(gesture) => {
                        log::info!(
                            "sensing: gesture kind={} left_cm={} right_cm={}",
                            gesture.label(),
                            left_avg,
                            right_avg
                        );
                        context.emit(gesture);
                    }
                    None => log::debug!(
                        "sensing: gesture_ambiguous left_cm={} right_cm={}",
                        left_avg,
                        right_avg
                    ),
                }
                self.enter(context, Mode::Waiting);
                Transition(State::waiting())
            }
        }
    }
}
