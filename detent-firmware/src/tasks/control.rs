//! Control loop task
//!
//! Owns the mode engine. Every loop period it collects one host line, the
//! button and key edges and the newest encoder detent, steps the engine and
//! refreshes the display and backlight.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_rp::pwm::PwmOutput;
use embassy_time::{Duration, Instant, Ticker};

use detent_core::{Engine, Inputs};
use detent_display::StatusScreen;
use detent_drivers::{ButtonEdge, KeyScanner, RgbLed};
use detent_protocol::KEY_COUNT;

use crate::channels::{ENCODER_MAILBOX, HOST_LINES};
use crate::config::KEYPAD_CONFIG;
use crate::display::OledBackend;
use crate::host_link::ChannelHostLink;

/// Status screen on the I2C0 OLED
pub type Oled = StatusScreen<OledBackend<I2c<'static, I2C0, Blocking>>>;

/// One PWM-driven RGB LED
pub type Led = RgbLed<PwmOutput<'static>, PwmOutput<'static>, PwmOutput<'static>>;

/// Control task - runs the engine at the configured loop period
#[embassy_executor::task]
pub async fn control_task(
    button: Input<'static>,
    keys: [Input<'static>; KEY_COUNT],
    mut display: Oled,
    mut backlight: (Led, Led),
) {
    info!("Control task started");

    let config = KEYPAD_CONFIG;
    let mut engine = Engine::new(config);
    let mut host = ChannelHostLink;
    let mut button_edge = ButtonEdge::new(config.button_debounce_ms);
    let mut keys = KeyScanner::new(keys);
    let mut ticker = Ticker::every(Duration::from_millis(u64::from(config.loop_period_ms)));

    let mut dropped = 0;
    let mut overwrites = 0;

    engine.start(&mut host, now_ms());
    info!("Engine started in {:?}", engine.mode());

    loop {
        ticker.next().await;
        let now = now_ms();

        let line = HOST_LINES.try_receive().ok();
        let inputs = Inputs {
            host_line: line.as_ref().map(|line| line.as_str()),
            button_pressed: button_edge.poll(button.is_low(), now),
            keys: keys.scan(),
            rotation: ENCODER_MAILBOX.take(),
        };

        if inputs.button_pressed {
            debug!("Encoder click");
        }
        if !inputs.keys.is_empty() {
            debug!("Key press: {:?}", inputs.keys);
        }
        if let Some(direction) = inputs.rotation {
            debug!("Encoder rotate: {:?}", direction);
        }

        let report = engine.step(&mut host, &inputs, now);
        for transition in report.transitions() {
            info!("Mode {:?} -> {:?}", transition.from, transition.to);
        }

        let dropped_now = engine.context().dropped_messages();
        if dropped_now != dropped {
            warn!(
                "Host queue full, {} message(s) dropped ({} total)",
                dropped_now.wrapping_sub(dropped),
                dropped_now
            );
            dropped = dropped_now;
        }

        let overwrites_now = ENCODER_MAILBOX.overwrites();
        if overwrites_now != overwrites {
            debug!("Encoder detents overwritten: {}", overwrites_now);
            overwrites = overwrites_now;
        }

        if let Err(e) = engine.present(&mut display, &mut backlight, now) {
            warn!("Status display update failed: {:?}", e);
        }
    }
}

/// Milliseconds since boot, wrapping
fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}
