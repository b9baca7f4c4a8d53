use esp_hal::{
    uart::{UartRx, UartTx},
    Async,
};
use sonarswipe::{
    protocol::{
        parse_host_command, render_host_event, LineReadEvent, LineReader, COMMAND_LINE_MAX,
    },
    sensing::{HostCommand, SensingInput, SensorConfig, DEFAULT_SENSOR_CONFIG},
};

use super::config::{
    BOARD_ECHO_LEFT_GPIO, BOARD_ECHO_RIGHT_GPIO, BOARD_TRIGGER_GPIO, HOST_EVENTS, SENSING_INPUTS,
};

#[embassy_executor::task]
pub(crate) async fn host_rx_task(mut uart: UartRx<'static, Async>) {
    let mut reader = LineReader::<COMMAND_LINE_MAX>::new();
    let mut rx = [0u8; 1];

    loop {
        match uart.read_async(&mut rx).await {
            Ok(1) => {}
            Ok(_) => continue,
            Err(err) => {
                log::warn!("host: read_failed err={:?}", err);
                reader.clear();
                continue;
            }
        }

        let command = match reader.push_byte(rx[0]) {
            LineReadEvent::None => continue,
            LineReadEvent::Overflow => {
                log::warn!("host: line_overflow max={}", COMMAND_LINE_MAX);
                continue;
            }
            LineReadEvent::Complete(line) => parse_host_command(line, &DEFAULT_SENSOR_CONFIG),
        };

        match command {
            Ok(command) => {
                if let HostCommand::Configure(config) = &command {
                    warn_on_pin_mismatch(config);
                }
                SENSING_INPUTS.send(SensingInput::Command(command)).await;
            }
            Err(err) => log::warn!("host: command_rejected err={:?}", err),
        }
    }
}

#[embassy_executor::task]
pub(crate) async fn host_tx_task(mut uart: UartTx<'static, Async>) {
    loop {
        let event = HOST_EVENTS.receive().await;
        let line = render_host_event(&event);
        if !uart_write_all(&mut uart, line.as_bytes()).await {
            log::warn!("host: write_failed");
        }
    }
}

async fn uart_write_all(uart: &mut UartTx<'static, Async>, mut bytes: &[u8]) -> bool {
    while !bytes.is_empty() {
        match uart.write_async(bytes).await {
            Ok(0) => return false,
            Ok(written) => bytes = &bytes[written..],
            Err(_) => return false,
        }
    }
    true
}

fn warn_on_pin_mismatch(config: &SensorConfig) {
    if config.trigger_pin != BOARD_TRIGGER_GPIO
        || config.echo_left_pin != BOARD_ECHO_LEFT_GPIO
        || config.echo_right_pin != BOARD_ECHO_RIGHT_GPIO
    {
        log::warn!(
            "host: pins_fixed requested={}/{}/{} wired={}/{}/{}",
            config.trigger_pin,
            config.echo_left_pin,
            config.echo_right_pin,
            BOARD_TRIGGER_GPIO,
            BOARD_ECHO_LEFT_GPIO,
            BOARD_ECHO_RIGHT_GPIO
        );
    }
}
