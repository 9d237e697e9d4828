//! Command-response supervision
//!
//! Entering Command mode means one `KEY:<n>` message is outstanding. The
//! wait resolves on `COMMAND_COMPLETE` or once more than the configured
//! timeout has elapsed; either way the engine returns to the mode that was
//! active before. A timed-out command is never retried.

use crate::context::Context;

use super::mode::ModeKind;

/// Outstanding host command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCommand {
    sent_at_ms: u32,
    return_to: Option<ModeKind>,
}

impl PendingCommand {
    pub fn new(return_to: Option<ModeKind>) -> Self {
        Self {
            sent_at_ms: 0,
            return_to,
        }
    }

    /// Start waiting for the acknowledgement
    pub(crate) fn begin(&mut self, ctx: &mut Context, now_ms: u32) {
        self.sent_at_ms = now_ms;
        ctx.set_awaiting_host_ack(true);
    }

    /// Stop waiting; a late acknowledgement becomes a no-op
    pub(crate) fn end(&mut self, ctx: &mut Context) {
        ctx.set_awaiting_host_ack(false);
    }

    pub fn elapsed_ms(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.sent_at_ms)
    }

    pub fn is_timed_out(&self, now_ms: u32, timeout_ms: u32) -> bool {
        self.elapsed_ms(now_ms) > timeout_ms
    }

    /// Mode to resume, never Command itself
    pub fn resume_mode(&self) -> ModeKind {
        match self.return_to {
            Some(ModeKind::Command) | None => ModeKind::Normal,
            Some(kind) => kind,
        }
    }
}
