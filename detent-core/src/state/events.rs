//! Events dispatched to the active mode

use detent_protocol::HostMessage;

use crate::encoder::Direction;

/// Events the engine dispatches to the active mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'a> {
    /// Debounced encoder button press
    EncoderClick,
    /// One encoder detent
    EncoderRotate(Direction),
    /// Key went from released to pressed (0-11)
    KeyPress(usize),
    /// Decoded host line
    Host(HostMessage<'a>),
    /// Periodic timeout check
    Tick,
}
