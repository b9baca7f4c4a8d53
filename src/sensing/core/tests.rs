use embassy_time::{Duration, Instant};

use super::*;
use crate::sensing::{
    config::{MICROSECONDS_PER_CM, SAMPLE_SIZE},
    schedule::detecting_period,
    types::CentiCm,
};

fn config() -> SensorConfig {
    SensorConfig {
        left_distance_cm: 20.0,
        right_distance_cm: 20.0,
        swipe_speed_ms: 1_000,
        sample_interval_ms: 300,
        sensor_timeout_us: 5_000,
        calibrate: false,
        ..DEFAULT_SENSOR_CONFIG
    }
}

fn sample(channel: Channel, distance_cm: f32, at_ms: u64) -> DistanceSample {
    DistanceSample {
        channel,
        distance_cm,
        at: Instant::from_millis(at_ms),
    }
}

fn echo(engine: &mut GestureEngine, channel: Channel, start_us: u64, width_us: u64) -> EngineOutput {
    let rise = engine.on_edge(Ok(EdgeEvent::rising(channel, Instant::from_micros(start_us))));
    assert_eq!(rise, EngineOutput::default());
    engine.on_edge(Ok(EdgeEvent::falling(
        channel,
        Instant::from_micros(start_us + width_us),
    )))
}

fn started(config: SensorConfig) -> GestureEngine {
    let mut engine = GestureEngine::new();
    let output = engine.start(config);
    assert_eq!(
        output.scheduler,
        Some(SchedulerCommand::Run(Duration::from_millis(300)))
    );
    engine
}

fn enter_detecting(engine: &mut GestureEngine) {
    let output = engine.on_sample(sample(Channel::Left, 15.0, 0));
    assert_eq!(engine.mode(), Mode::Detecting);
    assert_eq!(
        output.scheduler,
        Some(SchedulerCommand::Run(detecting_period(engine.config())))
    );
}

/// Feeds `SAMPLE_SIZE + 1` samples per channel and returns every output.
fn complete_session(engine: &mut GestureEngine, left: f32, right: f32) -> EngineOutput {
    let mut last = EngineOutput::default();
    for i in 0..=SAMPLE_SIZE as u64 {
        assert_eq!(engine.on_sample(sample(Channel::Left, left, 10 + i)).gesture, None);
        last = engine.on_sample(sample(Channel::Right, right, 10 + i));
    }
    last
}

#[test]
fn starts_in_off_and_start_moves_to_waiting() {
    let mut engine = GestureEngine::new();
    assert_eq!(engine.mode(), Mode::Off);
    assert!(engine.session().is_none());

    engine.start(config());
    assert_eq!(engine.mode(), Mode::Waiting);
    assert!(engine.session().is_none());
}

#[test]
fn off_ignores_edges_and_samples() {
    let mut engine = GestureEngine::new();
    assert_eq!(echo(&mut engine, Channel::Left, 0, 500), EngineOutput::default());
    assert_eq!(
        engine.on_sample(sample(Channel::Right, 5.0, 1)),
        EngineOutput::default()
    );
    assert_eq!(engine.mode(), Mode::Off);
}

#[test]
fn far_readings_keep_waiting() {
    let mut engine = started(config());
    let output = engine.on_sample(sample(Channel::Left, 120.0, 0));
    assert_eq!(output, EngineOutput::default());
    assert_eq!(engine.mode(), Mode::Waiting);
}

#[test]
fn threshold_crossing_opens_empty_session() {
    let mut engine = started(config());
    enter_detecting(&mut engine);

    let session = engine.session().expect("session open");
    assert!(session.is_empty());
    assert_eq!(session.count(Channel::Left), 0);
}

#[test]
fn threshold_is_inclusive() {
    let mut engine = started(config());
    engine.on_sample(sample(Channel::Right, 20.0, 0));
    assert_eq!(engine.mode(), Mode::Detecting);
}

#[test]
fn press_classified_after_full_session() {
    let mut engine = started(config());
    enter_detecting(&mut engine);

    let output = complete_session(&mut engine, 12.0, 14.0);
    assert_eq!(output.gesture, Some(Gesture::Press));
    assert_eq!(
        output.scheduler,
        Some(SchedulerCommand::Run(Duration::from_millis(300)))
    );
    assert_eq!(engine.mode(), Mode::Waiting);
    assert!(engine.session().is_none());
}

#[test]
fn swipe_directions_follow_median_ratio() {
    let mut engine = started(config());
    enter_detecting(&mut engine);
    let output = complete_session(&mut engine, 60.0, 25.0);
    assert_eq!(output.gesture, Some(Gesture::SwipeRight));

    enter_detecting(&mut engine);
    let output = complete_session(&mut engine, 25.0, 60.0);
    assert_eq!(output.gesture, Some(Gesture::SwipeLeft));
}

#[test]
fn ambiguous_session_returns_to_waiting_silently() {
    let mut engine = started(config());
    enter_detecting(&mut engine);
    let output = complete_session(&mut engine, 40.0, 38.0);
    assert_eq!(output.gesture, None);
    assert_eq!(engine.mode(), Mode::Waiting);
}

#[test]
fn classification_waits_for_both_channels() {
    let mut engine = started(config());
    enter_detecting(&mut engine);

    for i in 0..10 {
        let output = engine.on_sample(sample(Channel::Left, 10.0, i));
        assert_eq!(output.gesture, None);
    }
    assert_eq!(engine.mode(), Mode::Detecting);
    let session = engine.session().expect("session open");
    assert_eq!(session.median(Channel::Left), Some(10.0));
    assert_eq!(session.median(Channel::Right), None);

    for i in 0..SAMPLE_SIZE as u64 {
        engine.on_sample(sample(Channel::Right, 10.0, 20 + i));
    }
    let output = engine.on_sample(sample(Channel::Right, 10.0, 30));
    assert_eq!(output.gesture, Some(Gesture::Press));
}

#[test]
fn median_suppresses_single_outlier() {
    let mut engine = started(config());
    enter_detecting(&mut engine);

    let left = [60.0, 61.0, 2.0, 59.0, 62.0, 60.5];
    let mut output = EngineOutput::default();
    for (i, l) in left.into_iter().enumerate() {
        engine.on_sample(sample(Channel::Left, l, i as u64));
        output = engine.on_sample(sample(Channel::Right, 25.0, i as u64));
    }
    assert_eq!(output.gesture, Some(Gesture::SwipeRight));
}

#[test]
fn stop_during_detecting_discards_session() {
    let mut engine = started(config());
    enter_detecting(&mut engine);
    engine.on_sample(sample(Channel::Left, 10.0, 1));

    let output = engine.stop();
    assert_eq!(output.scheduler, Some(SchedulerCommand::Halt));
    assert_eq!(output.gesture, None);
    assert_eq!(engine.mode(), Mode::Off);
    assert!(engine.session().is_none());
}

#[test]
fn start_while_running_is_ignored() {
    let mut engine = started(config());
    let faster = SensorConfig {
        sample_interval_ms: 50,
        ..config()
    };
    let output = engine.start(faster);
    assert_eq!(output, EngineOutput::default());
    assert_eq!(engine.config().sample_interval_ms, 300);
}

#[test]
fn restart_after_stop_applies_new_config() {
    let mut engine = started(config());
    engine.stop();
    let output = engine.start(SensorConfig {
        sample_interval_ms: 50,
        ..config()
    });
    assert_eq!(
        output.scheduler,
        Some(SchedulerCommand::Run(Duration::from_millis(50)))
    );
}

#[test]
fn echo_pulse_becomes_distance_sample() {
    let mut engine = started(config());
    // 10 cm round trip.
    let width = (10.0 * MICROSECONDS_PER_CM) as u64;
    let output = echo(&mut engine, Channel::Left, 1_000, width);
    assert_eq!(output.rejected, None);
    assert_eq!(engine.mode(), Mode::Detecting);
}

#[test]
fn slow_echo_dropped_while_waiting() {
    let mut engine = started(config());
    let output = echo(&mut engine, Channel::Right, 1_000, 6_000);
    assert_eq!(
        output.rejected.map(|r| r.reason()),
        Some("timeout")
    );
    assert_eq!(engine.mode(), Mode::Waiting);
}

#[test]
fn slow_echo_accepted_while_detecting() {
    let mut engine = started(config());
    enter_detecting(&mut engine);

    let output = echo(&mut engine, Channel::Right, 1_000, 6_000);
    assert_eq!(output.rejected, None);
    let session = engine.session().expect("session open");
    assert_eq!(session.count(Channel::Right), 1);
}

#[test]
fn fault_abandons_cycle_without_sample() {
    let mut engine = started(config());
    engine.on_edge(Ok(EdgeEvent::rising(Channel::Left, Instant::from_micros(0))));

    let output = engine.on_edge(Err(SensorFault {
        channel: Channel::Left,
    }));
    assert_eq!(
        output.rejected,
        Some(ReadingRejected::Fault(SensorFault {
            channel: Channel::Left
        }))
    );

    let output = engine.on_edge(Ok(EdgeEvent::falling(
        Channel::Left,
        Instant::from_micros(300),
    )));
    assert_eq!(output.rejected, Some(ReadingRejected::Unpaired(Channel::Left)));
    assert_eq!(engine.mode(), Mode::Waiting);
}

#[test]
fn calibration_reports_latest_distance_per_channel() {
    let mut engine = started(SensorConfig {
        calibrate: true,
        ..config()
    });

    let output = engine.on_sample(sample(Channel::Left, 123.456, 0));
    assert_eq!(
        output.calibration,
        Some(CalibrationReport {
            left: CentiCm(12_346),
            right: CentiCm(0),
        })
    );

    let output = engine.on_sample(sample(Channel::Right, 80.0, 1));
    assert_eq!(
        output.calibration.map(|c| (c.left, c.right)),
        Some((CentiCm(12_346), CentiCm(8_000)))
    );
}

#[test]
fn calibration_silent_when_disabled() {
    let mut engine = started(config());
    let output = engine.on_sample(sample(Channel::Left, 80.0, 0));
    assert_eq!(output.calibration, None);
}
