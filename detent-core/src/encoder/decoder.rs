//! Quadrature edge decoder
//!
//! Runs in edge context: called once per electrical edge of the clock line
//! with both line levels sampled at that edge. It never blocks and only
//! produces a [`Direction`]; posting it anywhere is the caller's job.
//!
//! Decoding rule:
//! - an edge closer than the debounce interval to the previous accepted edge
//!   is dropped
//! - only rising clock edges produce a detent
//! - `data != clock` is clockwise, otherwise counter-clockwise

use super::Direction;

/// Debounced clock-edge decoder
#[derive(Debug, Clone)]
pub struct EdgeDecoder {
    debounce_us: u32,
    last_edge_us: Option<u32>,
}

impl EdgeDecoder {
    pub const fn new(debounce_us: u32) -> Self {
        Self {
            debounce_us,
            last_edge_us: None,
        }
    }

    /// Process one clock-line edge
    ///
    /// `now_us` is a free-running microsecond counter; wraparound is handled.
    pub fn on_edge(&mut self, now_us: u32, clock: bool, data: bool) -> Option<Direction> {
        if let Some(last) = self.last_edge_us {
            if now_us.wrapping_sub(last) < self.debounce_us {
                return None;
            }
        }
        self.last_edge_us = Some(now_us);

        if !clock {
            return None;
        }

        if data != clock {
            Some(Direction::Clockwise)
        } else {
            Some(Direction::CounterClockwise)
        }
    }
}
