//! On-target checks for the trigger path: the pulse generator drives a real
//! GPIO and the engine runs under the esp-rtos time driver.

#![no_std]
#![no_main]

#[cfg(test)]
#[embedded_test::tests(executor = esp_rtos::embassy::Executor::new())]
mod tests {
    use embassy_time::{Duration, Instant, Timer};
    use esp_hal::{
        delay::Delay,
        gpio::{Level, Output, OutputConfig},
        peripherals::GPIO25,
    };
    use sonarswipe::sensing::{
        Channel, DistanceSample, GestureEngine, Mode, PulseGenerator, SchedulerCommand,
        DEFAULT_SENSOR_CONFIG,
    };

    #[init]
    fn init() -> GPIO25<'static> {
        let peripherals = esp_hal::init(esp_hal::Config::default());
        let timg0 = esp_hal::timer::timg::TimerGroup::new(peripherals.TIMG0);
        esp_rtos::start(timg0.timer0);
        peripherals.GPIO25
    }

    #[test]
    async fn trigger_pulse_returns_low(trigger_pin: GPIO25<'static>) {
        let trigger = Output::new(trigger_pin, Level::High, OutputConfig::default());
        let mut pulse = PulseGenerator::new(trigger, Delay::new()).unwrap();
        for _ in 0..3 {
            pulse.fire().unwrap();
            Timer::after(Duration::from_millis(1)).await;
        }
    }

    #[test]
    async fn engine_detects_on_target_clock() {
        let mut engine = GestureEngine::new();
        let output = engine.start(DEFAULT_SENSOR_CONFIG);
        assert!(matches!(output.scheduler, Some(SchedulerCommand::Run(_))));

        engine.on_sample(DistanceSample {
            channel: Channel::Right,
            distance_cm: DEFAULT_SENSOR_CONFIG.right_distance_cm / 2.0,
            at: Instant::now(),
        });
        assert_eq!(engine.mode(), Mode::Detecting);
    }
}
