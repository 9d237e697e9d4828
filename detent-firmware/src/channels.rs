//! Inter-task communication channels
//!
//! Defines the statics shared between Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use detent_core::encoder::EncoderMailbox;
use detent_protocol::{DeviceMessage, Line};

/// Complete host lines waiting for the control loop
///
/// The control loop takes one line per iteration.
const HOST_LINE_CHANNEL_SIZE: usize = 4;

/// Outbound messages waiting for the UART
const HOST_OUTBOUND_CHANNEL_SIZE: usize = 16;

/// Lines received from the host, in arrival order
pub static HOST_LINES: Channel<CriticalSectionRawMutex, Line, HOST_LINE_CHANNEL_SIZE> =
    Channel::new();

/// Messages queued by the engine for the host
pub static HOST_OUTBOUND: Channel<
    CriticalSectionRawMutex,
    DeviceMessage,
    HOST_OUTBOUND_CHANNEL_SIZE,
> = Channel::new();

/// Newest encoder detent, written by the encoder task
pub static ENCODER_MAILBOX: EncoderMailbox = EncoderMailbox::new();
