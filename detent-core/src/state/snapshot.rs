//! Read-only view handed to the status display

use crate::context::KeyTable;

use super::mode::ModeKind;

/// Everything the status display renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSnapshot<'a> {
    pub mode: ModeKind,
    pub volume: u8,
    pub muted: bool,
    pub hue: u16,
    pub keys: &'a KeyTable,
    /// Time since the outstanding command was sent, Command mode only
    pub command_elapsed_ms: Option<u32>,
}
