//! Intrusion alarm firmware for Raspberry Pi Pico 2 W
//!
//! # Hardware
//!
//! | Function              | GPIO          |
//! |-----------------------|---------------|
//! | Keypad columns 1-4    | 2, 3, 4, 5    |
//! | Keypad rows 1-4       | 6, 7, 8, 9    |
//! | Ultrasonic echo       | 10            |
//! | Ultrasonic trigger    | 11            |
//! | Red lamp              | 12            |
//! | Piezo buzzer (PWM 6B) | 13            |
//!
//! # Usage
//!
//! ```bash
//! ALARM_CODE=4711 cargo build --release -p intrusion_alarm_firmware \
//!     --features pico2_w --target thumbv8m.main-none-eabihf
//! ```

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::Delay;
use intrusion_alarm_core::{AlarmConfig, ControlLoop, SecuritySystem};
use intrusion_alarm_firmware::control::run_control_loop;
use intrusion_alarm_firmware::core::status::LogStatusSink;
use intrusion_alarm_firmware::devices::outputs::{pwm_top_for_tone, BUZZER_TONE_HZ};
use intrusion_alarm_firmware::devices::{
    AlarmActuators, Lamp, MatrixKeypad, PiezoBuzzer, UltrasonicRanger,
};
use intrusion_alarm_firmware::platform::EmbassyTime;
use {defmt_rtt as _, panic_probe as _};

#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// PWM clock divider for the buzzer slice
const BUZZER_PWM_DIVIDER: u8 = 8;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    intrusion_alarm_firmware::log_info!("Intrusion alarm");
    intrusion_alarm_firmware::log_info!("===============");

    let config = match AlarmConfig::new(
        env!("ALARM_CODE"),
        intrusion_alarm_core::config::DISTANCE_THRESHOLD_CM,
        intrusion_alarm_core::config::COOLDOWN_DURATION_MS,
    ) {
        Ok(config) => config,
        Err(e) => {
            intrusion_alarm_firmware::log_error!("Invalid ALARM_CODE");
            panic!("invalid alarm configuration: {}", e);
        }
    };
    intrusion_alarm_firmware::log_info!(
        "Code length {}, threshold {} cm, cooldown {} ms",
        config.code_length,
        config.distance_threshold_cm,
        config.cooldown_duration_ms
    );

    // Keypad: rows pulled up, columns idle high
    let rows = [
        Input::new(p.PIN_6, Pull::Up),
        Input::new(p.PIN_7, Pull::Up),
        Input::new(p.PIN_8, Pull::Up),
        Input::new(p.PIN_9, Pull::Up),
    ];
    let cols = [
        Output::new(p.PIN_2, Level::High),
        Output::new(p.PIN_3, Level::High),
        Output::new(p.PIN_4, Level::High),
        Output::new(p.PIN_5, Level::High),
    ];
    let keypad = match MatrixKeypad::standard(rows, cols, EmbassyTime) {
        Ok(keypad) => keypad,
        Err(e) => panic!("keypad init failed: {}", e),
    };

    // Ultrasonic ranger
    let trigger = Output::new(p.PIN_11, Level::Low);
    let echo = Input::new(p.PIN_10, Pull::None);
    let ranger = UltrasonicRanger::new(trigger, echo, Delay, EmbassyTime);

    // Lamp and buzzer
    let lamp = Lamp::new(Output::new(p.PIN_12, Level::Low));

    let top = match pwm_top_for_tone(clk_sys_freq(), BUZZER_PWM_DIVIDER, BUZZER_TONE_HZ) {
        Ok(top) => top,
        Err(e) => panic!("buzzer tone out of range: {}", e),
    };
    let mut pwm_config = PwmConfig::default();
    pwm_config.divider = BUZZER_PWM_DIVIDER.into();
    pwm_config.top = top;
    pwm_config.compare_b = 0;
    let pwm = Pwm::new_output_b(p.PWM_SLICE6, p.PIN_13, pwm_config);
    let (_, buzzer_channel) = pwm.split();
    let buzzer = PiezoBuzzer::new(buzzer_channel.expect("PWM channel B"));

    let actuators = AlarmActuators::new(lamp, buzzer);

    let system = match SecuritySystem::new(config, EmbassyTime) {
        Ok(system) => system,
        Err(e) => panic!("invalid alarm configuration: {}", e),
    };
    let control = ControlLoop::new(system, keypad, ranger, actuators, LogStatusSink::new());

    intrusion_alarm_firmware::log_info!("Alarm ready (disarmed)");
    run_control_loop(control).await
}
