//! Build-time keypad configuration
//!
//! `build.rs` validates `keypad.toml` and generates `KEYPAD_CONFIG` and
//! `HOST_BAUD_RATE` from it. Edit the file and rebuild to change them.

use detent_core::KeypadConfig;

include!(concat!(env!("OUT_DIR"), "/keypad_config.rs"));
