//! Message types for the host serial protocol
//!
//! Message types are divided into two categories:
//! - Host → Device: key configuration, command acknowledgement, free text
//! - Device → Host: init request, mute, volume and key notifications

use core::fmt::{self, Write};

use heapless::String;

use crate::key_config::KeyConfig;

// Host → Device
pub const KEY_CONFIG_PREFIX: &str = "KEY_CONFIG:";
pub const COMMAND_COMPLETE: &str = "COMMAND_COMPLETE";

// Device → Host
pub const INIT_REQUEST: &str = "INIT_REQUEST";
pub const MUTE_PREFIX: &str = "MUTE:";
pub const VOLUME_PREFIX: &str = "VOL:";
pub const KEY_PREFIX: &str = "KEY:";

/// Longest encoded device line including the terminator
pub const MAX_DEVICE_LINE_LEN: usize = 16;

/// Messages from the host to the device
///
/// Decoding is total: any line maps to exactly one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostMessage<'a> {
    /// `KEY_CONFIG:<idx>,<name>(|<idx>,<name>)*`
    KeyConfig(KeyConfig<'a>),
    /// `COMMAND_COMPLETE`
    CommandComplete,
    /// Any other text, trimmed
    Other(&'a str),
}

impl<'a> HostMessage<'a> {
    /// Decode one line, surrounding whitespace ignored
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if let Some(payload) = line.strip_prefix(KEY_CONFIG_PREFIX) {
            HostMessage::KeyConfig(KeyConfig::new(payload))
        } else if line == COMMAND_COMPLETE {
            HostMessage::CommandComplete
        } else {
            HostMessage::Other(line)
        }
    }
}

/// Messages from the device to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceMessage {
    /// Ask the host for the key configuration
    InitRequest,
    /// Mute state changed
    Mute(bool),
    /// Volume changed (0-100)
    Volume(u8),
    /// Assigned key pressed (0-11)
    Key(u8),
}

impl DeviceMessage {
    /// Encode as a `\n`-terminated line
    pub fn to_line(&self) -> String<MAX_DEVICE_LINE_LEN> {
        let mut line = String::new();
        // Longest variant is "INIT_REQUEST\n"
        let _ = writeln!(line, "{}", self);
        line
    }
}

impl fmt::Display for DeviceMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceMessage::InitRequest => f.write_str(INIT_REQUEST),
            DeviceMessage::Mute(true) => write!(f, "{}ON", MUTE_PREFIX),
            DeviceMessage::Mute(false) => write!(f, "{}OFF", MUTE_PREFIX),
            DeviceMessage::Volume(level) => write!(f, "{}{}", VOLUME_PREFIX, level),
            DeviceMessage::Key(index) => write!(f, "{}{}", KEY_PREFIX, index),
        }
    }
}
