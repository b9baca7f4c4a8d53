use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel, signal::Signal};
use sonarswipe::sensing::{HostEvent, SchedulerCommand, SensingInput};

pub(crate) const UART_BAUD: u32 = 115_200;
pub(crate) const SENSING_INPUT_CAPACITY: usize = 32;
pub(crate) const HOST_EVENT_CAPACITY: usize = 8;

// Board wiring; a CONFIG naming other pins is accepted but cannot rewire them.
pub(crate) const BOARD_TRIGGER_GPIO: u8 = 25;
pub(crate) const BOARD_ECHO_LEFT_GPIO: u8 = 26;
pub(crate) const BOARD_ECHO_RIGHT_GPIO: u8 = 27;

pub(crate) static SENSING_INPUTS: Channel<
    CriticalSectionRawMutex,
    SensingInput,
    SENSING_INPUT_CAPACITY,
> = Channel::new();
pub(crate) static HOST_EVENTS: Channel<CriticalSectionRawMutex, HostEvent, HOST_EVENT_CAPACITY> =
    Channel::new();
pub(crate) static SCHEDULER_COMMANDS: Signal<CriticalSectionRawMutex, SchedulerCommand> =
    Signal::new();
