//! Status display hardware
//!
//! The keypad shows its status on a 128x64 SSD1306 OLED on I2C0. Layout
//! happens in `detent_display::StatusScreen`; this module only draws the
//! finished character rows.

pub mod oled;

pub use oled::OledBackend;
