//! Encoder push-button edge detector
//!
//! Turns a sampled button level into press edges. After an accepted edge,
//! further edges are ignored for the debounce interval so contact bounce
//! never reaches the double-click arbiter as a second click.

/// Debounced released → pressed edge detector
#[derive(Debug, Clone)]
pub struct ButtonEdge {
    debounce_ms: u32,
    was_pressed: bool,
    last_edge_ms: Option<u32>,
}

impl ButtonEdge {
    pub const fn new(debounce_ms: u32) -> Self {
        Self {
            debounce_ms,
            was_pressed: false,
            last_edge_ms: None,
        }
    }

    /// Feed the current level; returns true on an accepted press edge
    pub fn poll(&mut self, pressed: bool, now_ms: u32) -> bool {
        let rising = pressed && !self.was_pressed;
        self.was_pressed = pressed;

        if !rising {
            return false;
        }

        if let Some(last) = self.last_edge_ms {
            if now_ms.wrapping_sub(last) < self.debounce_ms {
                return false;
            }
        }

        self.last_edge_ms = Some(now_ms);
        true
    }
}
