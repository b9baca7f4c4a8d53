use embassy_time::Instant;
use esp_hal::{
    delay::Delay,
    gpio::{Input, Output},
};
use sonarswipe::sensing::{
    pipeline::run_sensing_pipeline, schedule::run_sampling_scheduler, Channel, EdgeEvent,
    PulseGenerator, SensingInput, SensorFault,
};

use super::config::{HOST_EVENTS, SCHEDULER_COMMANDS, SENSING_INPUTS};

#[embassy_executor::task]
pub(crate) async fn sensing_pipeline_task() {
    run_sensing_pipeline(&SENSING_INPUTS, &HOST_EVENTS, &SCHEDULER_COMMANDS).await;
}

#[embassy_executor::task]
pub(crate) async fn sampling_task(trigger: Output<'static>) {
    let mut pulse = match PulseGenerator::new(trigger, Delay::new()) {
        Ok(pulse) => pulse,
        Err(err) => {
            log::error!("scheduler: trigger_init_failed err={:?}", err);
            return;
        }
    };
    run_sampling_scheduler(&SCHEDULER_COMMANDS, &mut pulse).await;
}

/// Timestamps every echo-line transition. Two edges reading back the same
/// level mean one was missed, so the cycle is reported as a fault.
#[embassy_executor::task(pool_size = 2)]
pub(crate) async fn echo_watch_task(channel: Channel, mut echo: Input<'static>) {
    let mut high = echo.is_high();
    loop {
        echo.wait_for_any_edge().await;
        let at = Instant::now();
        let now_high = echo.is_high();
        let edge = if now_high == high {
            Err(SensorFault { channel })
        } else if now_high {
            Ok(EdgeEvent::rising(channel, at))
        } else {
            Ok(EdgeEvent::falling(channel, at))
        };
        high = now_high;
        // Ordered delivery; a dropped falling edge would pair with a stale start.
        SENSING_INPUTS.send(SensingInput::Edge(edge)).await;
    }
}
