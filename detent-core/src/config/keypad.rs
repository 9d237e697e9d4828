//! Keypad timing and step configuration
//!
//! Every tunable the mode engine reads lives here. The firmware generates
//! its instance at build time from `keypad.toml`; host tests use
//! [`KeypadConfig::DEFAULT`].

/// Upper bound of the volume range
pub const MAX_VOLUME: u8 = 100;

/// Hue wraps at this many degrees
pub const HUE_RANGE: u16 = 360;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Default volume above `MAX_VOLUME`
    VolumeOutOfRange,
    /// Volume step of zero or above `MAX_VOLUME`
    InvalidVolumeStep,
    /// Hue step of zero or not below `HUE_RANGE`
    InvalidHueStep,
    /// Double-click window of zero
    InvalidClickWindow,
    /// Loop period of zero
    InvalidLoopPeriod,
}

/// Keypad configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeypadConfig {
    /// Minimum spacing between accepted encoder edges (µs)
    pub encoder_debounce_us: u32,
    /// Minimum spacing between accepted button presses (ms)
    pub button_debounce_ms: u32,
    /// Second click within this window is a double-click (ms)
    pub double_click_window_ms: u32,
    /// Command mode gives up waiting for the host after this (ms)
    pub command_timeout_ms: u32,
    /// Volume change per encoder detent
    pub volume_step: u8,
    /// Hue change per encoder detent (degrees)
    pub hue_step: u16,
    /// Volume at boot
    pub default_volume: u8,
    /// Control loop period (ms)
    pub loop_period_ms: u32,
}

impl KeypadConfig {
    pub const DEFAULT: Self = Self {
        encoder_debounce_us: 2_000,
        button_debounce_ms: 50,
        double_click_window_ms: 300,
        command_timeout_ms: 5_000,
        volume_step: 5,
        hue_step: 5,
        default_volume: 50,
        loop_period_ms: 10,
    };

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_volume > MAX_VOLUME {
            return Err(ConfigError::VolumeOutOfRange);
        }
        if self.volume_step == 0 || self.volume_step > MAX_VOLUME {
            return Err(ConfigError::InvalidVolumeStep);
        }
        if self.hue_step == 0 || self.hue_step >= HUE_RANGE {
            return Err(ConfigError::InvalidHueStep);
        }
        if self.double_click_window_ms == 0 {
            return Err(ConfigError::InvalidClickWindow);
        }
        if self.loop_period_ms == 0 {
            return Err(ConfigError::InvalidLoopPeriod);
        }
        Ok(())
    }
}

impl Default for KeypadConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
