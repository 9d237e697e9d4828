//! Shared keypad state
//!
//! The [`Context`] lives for the whole uptime and is handed to every mode
//! handler by `&mut`. Collaborators only ever see it read-only.

pub mod keys;

pub use keys::{KeySlot, KeyTable};

use crate::config::{HUE_RANGE, MAX_VOLUME};

/// State shared by all modes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    volume: u8,
    muted: bool,
    init_complete: bool,
    awaiting_host_ack: bool,
    keys: KeyTable,
    hue: u16,
    dropped_messages: u32,
}

impl Default for Context {
    fn default() -> Self {
        Self::new(crate::config::KeypadConfig::DEFAULT.default_volume)
    }
}

impl Context {
    /// Boot state: unmuted, hue 0, no keys assigned
    pub fn new(volume: u8) -> Self {
        Self {
            volume: volume.min(MAX_VOLUME),
            muted: false,
            init_complete: false,
            awaiting_host_ack: false,
            keys: KeyTable::new(),
            hue: 0,
            dropped_messages: 0,
        }
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    /// True once a key configuration has been received
    pub fn init_complete(&self) -> bool {
        self.init_complete
    }

    /// True while a key command waits for `COMMAND_COMPLETE`
    pub fn awaiting_host_ack(&self) -> bool {
        self.awaiting_host_ack
    }

    pub fn keys(&self) -> &KeyTable {
        &self.keys
    }

    /// Backlight hue in degrees, always below 360
    pub fn hue(&self) -> u16 {
        self.hue
    }

    /// Outbound messages the host link refused
    pub fn dropped_messages(&self) -> u32 {
        self.dropped_messages
    }

    /// Step the volume, clamped to `0..=MAX_VOLUME`
    pub(crate) fn adjust_volume(&mut self, delta: i16) -> u8 {
        let volume = (i16::from(self.volume) + delta).clamp(0, i16::from(MAX_VOLUME));
        self.volume = volume as u8;
        self.volume
    }

    pub(crate) fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Step the hue, wrapping into `0..HUE_RANGE`
    pub(crate) fn adjust_hue(&mut self, delta: i32) -> u16 {
        let hue = (i32::from(self.hue) + delta).rem_euclid(i32::from(HUE_RANGE));
        self.hue = hue as u16;
        self.hue
    }

    pub(crate) fn set_init_complete(&mut self, complete: bool) {
        self.init_complete = complete;
    }

    pub(crate) fn set_awaiting_host_ack(&mut self, awaiting: bool) {
        self.awaiting_host_ack = awaiting;
    }

    pub(crate) fn keys_mut(&mut self) -> &mut KeyTable {
        &mut self.keys
    }

    pub(crate) fn record_dropped(&mut self) {
        self.dropped_messages = self.dropped_messages.saturating_add(1);
    }
}
