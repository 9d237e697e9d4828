//! Host link over the outbound channel

use detent_core::traits::{HostLink, LinkError};
use detent_protocol::DeviceMessage;

use crate::channels::HOST_OUTBOUND;

/// Queues engine messages for the UART transmit task
///
/// Never waits: a full queue refuses the message.
pub struct ChannelHostLink;

impl HostLink for ChannelHostLink {
    fn send(&mut self, message: DeviceMessage) -> Result<(), LinkError> {
        HOST_OUTBOUND.try_send(message).map_err(|_| LinkError::Full)
    }
}
