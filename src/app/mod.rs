pub(crate) mod config;
mod host_link;
mod sensing;

use esp_hal::{
    gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull},
    timer::timg::TimerGroup,
    uart::{Config as UartConfig, Uart},
};
use sonarswipe::sensing::Channel;

use self::config::UART_BAUD;

pub(crate) fn run() -> ! {
    let peripherals = esp_hal::init(esp_hal::Config::default());
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);
    esp_println::logger::init_logger(log::LevelFilter::Info);

    let uart_cfg = UartConfig::default().with_baudrate(UART_BAUD);
    let uart = match Uart::new(peripherals.UART0, uart_cfg) {
        Ok(uart) => uart
            .with_rx(peripherals.GPIO3)
            .with_tx(peripherals.GPIO1)
            .into_async(),
        Err(err) => {
            log::error!("boot: uart_init_failed err={:?}", err);
            halt_forever();
        }
    };
    let (uart_rx, uart_tx) = uart.split();

    let trigger = Output::new(peripherals.GPIO25, Level::Low, OutputConfig::default());
    let echo_cfg = InputConfig::default().with_pull(Pull::Down);
    let echo_left = Input::new(peripherals.GPIO26, echo_cfg);
    let echo_right = Input::new(peripherals.GPIO27, echo_cfg);
    log::info!(
        "boot: ready trigger={} echo_left={} echo_right={}",
        config::BOARD_TRIGGER_GPIO,
        config::BOARD_ECHO_LEFT_GPIO,
        config::BOARD_ECHO_RIGHT_GPIO
    );

    let mut executor = esp_rtos::embassy::Executor::new();
    let executor = unsafe { make_static(&mut executor) };
    executor.run(move |spawner| {
        spawner.must_spawn(sensing::sensing_pipeline_task());
        spawner.must_spawn(sensing::sampling_task(trigger));
        spawner.must_spawn(sensing::echo_watch_task(Channel::Left, echo_left));
        spawner.must_spawn(sensing::echo_watch_task(Channel::Right, echo_right));
        spawner.must_spawn(host_link::host_rx_task(uart_rx));
        spawner.must_spawn(host_link::host_tx_task(uart_tx));
    });
}

unsafe fn make_static<T>(value: &mut T) -> &'static mut T {
    unsafe { core::mem::transmute(value) }
}

fn halt_forever() -> ! {
    loop {
        core::hint::spin_loop();
    }
}
