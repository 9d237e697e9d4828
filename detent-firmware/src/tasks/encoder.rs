//! Rotary encoder task
//!
//! Waits on the clock line, decodes each edge and posts the detent to the
//! mailbox the control loop drains.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Instant;

use detent_core::encoder::EdgeDecoder;

use crate::channels::ENCODER_MAILBOX;
use crate::config::KEYPAD_CONFIG;

/// Encoder task - one mailbox post per accepted detent
#[embassy_executor::task]
pub async fn encoder_task(mut clock: Input<'static>, data: Input<'static>) {
    info!("Encoder task started");

    let mut decoder = EdgeDecoder::new(KEYPAD_CONFIG.encoder_debounce_us);

    loop {
        clock.wait_for_any_edge().await;

        // Wraps after ~71 minutes; the decoder compares with wrapping_sub
        let now_us = Instant::now().as_micros() as u32;

        if let Some(direction) = decoder.on_edge(now_us, clock.is_high(), data.is_high()) {
            trace!("Detent: {:?}", direction);
            ENCODER_MAILBOX.post(direction);
        }
    }
}
