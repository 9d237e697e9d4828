//! Outbound host link trait

use detent_protocol::DeviceMessage;

/// Errors that can occur when queueing a message for the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// Outbound queue is full
    Full,
}

/// Trait for sending protocol messages to the host
///
/// Implementations must not block; the engine calls this from the control
/// loop. A refused message is counted and otherwise dropped.
pub trait HostLink {
    fn send(&mut self, message: DeviceMessage) -> Result<(), LinkError>;
}

impl<T: HostLink + ?Sized> HostLink for &mut T {
    fn send(&mut self, message: DeviceMessage) -> Result<(), LinkError> {
        (**self).send(message)
    }
}
