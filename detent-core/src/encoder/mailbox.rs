//! Single-slot handoff from edge context to the control loop
//!
//! The slot holds one packed byte: `0` empty, otherwise an encoded
//! [`Direction`]. Direction and readiness travel in the same atomic word,
//! so a consumer can never observe a ready flag paired with a stale value,
//! and `take` empties the slot in the same operation that reads it, so an
//! edge landing between read and clear cannot be delivered twice.
//!
//! Collision policy: last writer wins. A detent posted while the previous
//! one is still unread replaces it and bumps the overwrite counter.

use portable_atomic::{AtomicU32, AtomicU8, Ordering};

use super::Direction;

const EMPTY: u8 = 0;
const CLOCKWISE: u8 = 1;
const COUNTER_CLOCKWISE: u8 = 2;

/// One-slot SPSC mailbox for encoder detents
#[derive(Debug)]
pub struct EncoderMailbox {
    slot: AtomicU8,
    overwrites: AtomicU32,
}

impl Default for EncoderMailbox {
    fn default() -> Self {
        Self::new()
    }
}

impl EncoderMailbox {
    pub const fn new() -> Self {
        Self {
            slot: AtomicU8::new(EMPTY),
            overwrites: AtomicU32::new(0),
        }
    }

    /// Publish a detent (producer side, edge context)
    pub fn post(&self, direction: Direction) {
        let previous = self.slot.swap(encode(direction), Ordering::AcqRel);
        if previous != EMPTY {
            self.overwrites.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Drain the pending detent, if any (consumer side, loop context)
    pub fn take(&self) -> Option<Direction> {
        decode(self.slot.swap(EMPTY, Ordering::AcqRel))
    }

    /// Check for a pending detent without draining it
    pub fn is_pending(&self) -> bool {
        self.slot.load(Ordering::Acquire) != EMPTY
    }

    /// Detents replaced before the loop read them
    pub fn overwrites(&self) -> u32 {
        self.overwrites.load(Ordering::Relaxed)
    }
}

fn encode(direction: Direction) -> u8 {
    match direction {
        Direction::Clockwise => CLOCKWISE,
        Direction::CounterClockwise => COUNTER_CLOCKWISE,
    }
}

fn decode(raw: u8) -> Option<Direction> {
    match raw {
        CLOCKWISE => Some(Direction::Clockwise),
        COUNTER_CLOCKWISE => Some(Direction::CounterClockwise),
        _ => None,
    }
}
