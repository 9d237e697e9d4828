//! Key scanner
//!
//! Reads one active-low input per key (pull-ups enabled, switch to ground)
//! and reports keys that went from released to pressed since the previous
//! scan. A pin that fails to read counts as released.

use detent_core::input::KeySet;
use embedded_hal::digital::InputPin;

/// Press-edge detector over a fixed set of key inputs
pub struct KeyScanner<P, const N: usize> {
    pins: [P; N],
    /// Level seen on the previous scan
    held: KeySet,
}

impl<P: InputPin, const N: usize> KeyScanner<P, N> {
    /// Create a scanner; keys held at construction do not report a press
    pub fn new(mut pins: [P; N]) -> Self {
        let held = read_levels(&mut pins);
        Self { pins, held }
    }

    /// Scan all keys and return the new press edges
    pub fn scan(&mut self) -> KeySet {
        let levels = read_levels(&mut self.pins);
        let pressed = levels.iter().filter(|&i| !self.held.contains(i)).collect();
        self.held = levels;
        pressed
    }
}

fn read_levels<P: InputPin>(pins: &mut [P]) -> KeySet {
    pins.iter_mut()
        .enumerate()
        .filter_map(|(index, pin)| pin.is_low().unwrap_or(false).then_some(index))
        .collect()
}
