//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in detent-core on top of `embedded-hal` 1.0:
//!
//! - RGB backlight (hue to PWM duty)
//! - Key scanner (active-low direct inputs)
//! - Encoder push-button edge detection

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod button;
pub mod keys;
pub mod rgb;

pub use button::ButtonEdge;
pub use keys::KeyScanner;
pub use rgb::{hue_to_rgb, Rgb, RgbLed};
