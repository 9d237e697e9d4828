//! Detent - Macro Keypad Firmware
//!
//! Main firmware binary for the RP2040-based Detent keypad: twelve macro
//! keys, a rotary encoder with push button, two RGB backlight LEDs and a
//! small OLED status display. A host-side helper configures the keys and
//! executes the commands over the serial link.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm, PwmOutput};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use detent_display::StatusScreen;
use detent_drivers::RgbLed;

use crate::config::{HOST_BAUD_RATE, KEYPAD_CONFIG};
use crate::display::OledBackend;

mod channels;
mod config;
mod display;
mod host_link;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// PWM counter wrap; ~1.9 kHz at the default 125 MHz system clock
const PWM_TOP: u16 = 0xFFFF;

/// Backlight LEDs are common-cathode
const LED_INVERTED: bool = false;

/// OLED I2C clock
const OLED_I2C_FREQUENCY: u32 = 400_000;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Detent firmware starting...");

    KEYPAD_CONFIG.validate().unwrap();

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Host serial link (GPIO0 TX, GPIO1 RX)
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = HOST_BAUD_RATE;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized at {} baud", HOST_BAUD_RATE);

    // Rotary encoder: clock GPIO2, data GPIO3, push button GPIO4
    let enc_clock = Input::new(p.PIN_2, Pull::Up);
    let enc_data = Input::new(p.PIN_3, Pull::Up);
    let enc_button = Input::new(p.PIN_4, Pull::Up);

    // Macro keys, active low, index order
    let keys = [
        Input::new(p.PIN_5, Pull::Up),
        Input::new(p.PIN_6, Pull::Up),
        Input::new(p.PIN_7, Pull::Up),
        Input::new(p.PIN_10, Pull::Up),
        Input::new(p.PIN_11, Pull::Up),
        Input::new(p.PIN_12, Pull::Up),
        Input::new(p.PIN_13, Pull::Up),
        Input::new(p.PIN_14, Pull::Up),
        Input::new(p.PIN_15, Pull::Up),
        Input::new(p.PIN_22, Pull::Up),
        Input::new(p.PIN_26, Pull::Up),
        Input::new(p.PIN_27, Pull::Up),
    ];

    info!("Encoder and keys initialized");

    // SSD1306 OLED on I2C0 (GPIO8 SDA, GPIO9 SCL)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = OLED_I2C_FREQUENCY;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_9, p.PIN_8, i2c_config);
    let display = StatusScreen::new(OledBackend::new(i2c).unwrap());

    info!("OLED initialized");

    // Backlight: LED A on GPIO16/17/18, LED B on GPIO19/20/21
    let mut pwm_config = PwmConfig::default();
    pwm_config.top = PWM_TOP;

    let (a_red, a_green) = pwm_pair(Pwm::new_output_ab(
        p.PWM_SLICE0,
        p.PIN_16,
        p.PIN_17,
        pwm_config.clone(),
    ));
    let (a_blue, b_red) = pwm_pair(Pwm::new_output_ab(
        p.PWM_SLICE1,
        p.PIN_18,
        p.PIN_19,
        pwm_config.clone(),
    ));
    let (b_green, b_blue) = pwm_pair(Pwm::new_output_ab(
        p.PWM_SLICE2,
        p.PIN_20,
        p.PIN_21,
        pwm_config,
    ));

    let backlight = (
        RgbLed::new(a_red, a_green, a_blue, LED_INVERTED),
        RgbLed::new(b_red, b_green, b_blue, LED_INVERTED),
    );

    info!("Backlight initialized");

    // Spawn tasks
    spawner.spawn(tasks::host_rx_task(rx)).unwrap();
    spawner.spawn(tasks::host_tx_task(tx)).unwrap();
    spawner
        .spawn(tasks::encoder_task(enc_clock, enc_data))
        .unwrap();
    spawner
        .spawn(tasks::control_task(enc_button, keys, display, backlight))
        .unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Split a slice into its A and B outputs
fn pwm_pair(pwm: Pwm<'static>) -> (PwmOutput<'static>, PwmOutput<'static>) {
    let (a, b) = pwm.split();
    (a.unwrap(), b.unwrap())
}
