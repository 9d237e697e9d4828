//! Detent Host Serial Protocol
//!
//! This crate defines the line-oriented protocol between the keypad and the
//! host application. Every message is a single ASCII line terminated by `\n`:
//!
//! ```text
//! Host → Device   KEY_CONFIG:0,Copy|3,Paste
//!                 COMMAND_COMPLETE
//! Device → Host   INIT_REQUEST
//!                 MUTE:ON / MUTE:OFF
//!                 VOL:<0-100>
//!                 KEY:<0-11>
//! ```
//!
//! Decoding never fails outward: malformed fragments are skipped and unknown
//! lines surface as [`HostMessage::Other`].

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod key_config;
pub mod line;
pub mod messages;

pub use key_config::{key_name, KeyConfig, KeyEntry, KeyName, KEY_COUNT, MAX_KEY_NAME_LEN};
pub use line::{Line, LineError, LineParser, MAX_LINE_LEN};
pub use messages::{DeviceMessage, HostMessage, COMMAND_COMPLETE, KEY_CONFIG_PREFIX};
