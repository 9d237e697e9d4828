//! Rotary encoder input
//!
//! The decoder turns clock-line edges into detents; the mailbox carries the
//! newest detent from edge context to the control loop.

pub mod decoder;
pub mod mailbox;

pub use decoder::EdgeDecoder;
pub use mailbox::EncoderMailbox;

/// Rotation direction of one detent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// +1 for clockwise, -1 for counter-clockwise
    pub fn sign(self) -> i8 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}
