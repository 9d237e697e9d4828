//! Double-click arbitration
//!
//! The first press takes effect immediately and arms the arbiter. A second
//! press inside the window is a double-click and disarms it. An armed state
//! older than the window is cleared silently by [`DoubleClick::expire`], and
//! a press after the window counts as a new first press even if no expiry
//! ran in between.

/// Result of one press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClickOutcome {
    /// First press of a sequence
    Single,
    /// Second press within the window
    Double,
}

/// Per-mode double-click timer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoubleClick {
    window_ms: u32,
    armed_at_ms: Option<u32>,
}

impl DoubleClick {
    pub const fn new(window_ms: u32) -> Self {
        Self {
            window_ms,
            armed_at_ms: None,
        }
    }

    pub fn press(&mut self, now_ms: u32) -> ClickOutcome {
        match self.armed_at_ms {
            Some(armed_at) if now_ms.wrapping_sub(armed_at) <= self.window_ms => {
                self.armed_at_ms = None;
                ClickOutcome::Double
            }
            _ => {
                self.armed_at_ms = Some(now_ms);
                ClickOutcome::Single
            }
        }
    }

    /// Disarm if the window has passed
    ///
    /// Returns true if this call disarmed.
    pub fn expire(&mut self, now_ms: u32) -> bool {
        match self.armed_at_ms {
            Some(armed_at) if now_ms.wrapping_sub(armed_at) > self.window_ms => {
                self.armed_at_ms = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed_at_ms.is_some()
    }

    pub fn reset(&mut self) {
        self.armed_at_ms = None;
    }
}
