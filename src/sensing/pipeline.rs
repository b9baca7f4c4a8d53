use embassy_sync::{blocking_mutex::raw::RawMutex, channel::Channel, signal::Signal};

use super::{
    controller::{SensingController, SensingInput},
    types::{HostEvent, SchedulerCommand},
};

/// Handles one input and forwards its results. The scheduler signal is
/// raised before any event is queued.
pub async fn step<M: RawMutex, const N: usize>(
    controller: &mut SensingController,
    input: SensingInput,
    events: &Channel<M, HostEvent, N>,
    scheduler: &Signal<M, SchedulerCommand>,
) {
    let output = controller.handle(input);
    if let Some(command) = output.scheduler {
        scheduler.signal(command);
    }
    for event in output.events.into_iter().flatten() {
        events.send(event).await;
    }
}

/// Single consumer of `inputs`; all sensing state changes happen here.
pub async fn run_sensing_pipeline<M: RawMutex, const I: usize, const N: usize>(
    inputs: &Channel<M, SensingInput, I>,
    events: &Channel<M, HostEvent, N>,
    scheduler: &Signal<M, SchedulerCommand>,
) {
    let mut controller = SensingController::new();
    loop {
        let input = inputs.receive().await;
        step(&mut controller, input, events, scheduler).await;
    }
}
