//! Keypad modes
//!
//! Exactly one [`Mode`] is active at a time. Each variant carries the state
//! that belongs to it alone and is built fresh on every transition into it,
//! so per-entry state such as an armed double-click never survives a mode
//! change.
//!
//! | Mode      | Click            | Double-click | Rotation      | Key            |
//! |-----------|------------------|--------------|---------------|----------------|
//! | Init      | -                | -            | hue ±step     | -              |
//! | Normal    | toggle mute      | → Backlight  | volume ±step  | → Command      |
//! | Backlight | arm              | → Normal     | hue ±step     | -              |
//! | Command   | -                | -            | -             | -              |

use detent_protocol::{DeviceMessage, HostMessage};

use crate::config::KeypadConfig;
use crate::context::Context;
use crate::encoder::Direction;
use crate::traits::HostLink;

use super::click::{ClickOutcome, DoubleClick};
use super::command::PendingCommand;

/// Mode identity without per-mode state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeKind {
    /// Waiting for the host to send the key configuration
    Init,
    /// Volume, mute and key commands
    Normal,
    /// Backlight hue adjustment
    Backlight,
    /// Waiting for the host to finish a key command
    Command,
}

impl ModeKind {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            ModeKind::Init => "INIT",
            ModeKind::Normal => "NORMAL",
            ModeKind::Backlight => "BACKLIGHT",
            ModeKind::Command => "COMMAND",
        }
    }
}

/// Everything a handler may touch during one dispatch
pub(crate) struct Scope<'a, H: HostLink + ?Sized> {
    pub ctx: &'a mut Context,
    pub host: &'a mut H,
    pub config: &'a KeypadConfig,
    pub now_ms: u32,
}

impl<H: HostLink + ?Sized> Scope<'_, H> {
    /// Send to the host, counting refusals
    pub fn emit(&mut self, message: DeviceMessage) {
        if self.host.send(message).is_err() {
            self.ctx.record_dropped();
        }
    }
}

/// Active mode with its private state
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Mode {
    Init,
    Normal(DoubleClick),
    Backlight(DoubleClick),
    Command(PendingCommand),
}

impl Mode {
    /// Fresh state for `kind`; `previous` is where Command returns to
    pub fn fresh(kind: ModeKind, previous: ModeKind, config: &KeypadConfig) -> Self {
        match kind {
            ModeKind::Init => Mode::Init,
            ModeKind::Normal => Mode::Normal(DoubleClick::new(config.double_click_window_ms)),
            ModeKind::Backlight => {
                Mode::Backlight(DoubleClick::new(config.double_click_window_ms))
            }
            ModeKind::Command => Mode::Command(PendingCommand::new(Some(previous))),
        }
    }

    pub fn kind(&self) -> ModeKind {
        match self {
            Mode::Init => ModeKind::Init,
            Mode::Normal(_) => ModeKind::Normal,
            Mode::Backlight(_) => ModeKind::Backlight,
            Mode::Command(_) => ModeKind::Command,
        }
    }

    pub fn pending_command(&self) -> Option<&PendingCommand> {
        match self {
            Mode::Command(pending) => Some(pending),
            _ => None,
        }
    }

    pub fn enter<H: HostLink + ?Sized>(&mut self, scope: &mut Scope<'_, H>) {
        match self {
            Mode::Init => {
                scope.ctx.keys_mut().reset();
                scope.ctx.set_init_complete(false);
                scope.emit(DeviceMessage::InitRequest);
            }
            Mode::Normal(click) | Mode::Backlight(click) => click.reset(),
            Mode::Command(pending) => pending.begin(scope.ctx, scope.now_ms),
        }
    }

    pub fn exit<H: HostLink + ?Sized>(&mut self, scope: &mut Scope<'_, H>) {
        match self {
            Mode::Init => {}
            Mode::Normal(click) | Mode::Backlight(click) => click.reset(),
            Mode::Command(pending) => pending.end(scope.ctx),
        }
    }

    pub fn on_encoder_click<H: HostLink + ?Sized>(
        &mut self,
        scope: &mut Scope<'_, H>,
    ) -> Option<ModeKind> {
        match self {
            Mode::Normal(click) => match click.press(scope.now_ms) {
                ClickOutcome::Single => {
                    let muted = scope.ctx.toggle_mute();
                    scope.emit(DeviceMessage::Mute(muted));
                    None
                }
                ClickOutcome::Double => Some(ModeKind::Backlight),
            },
            Mode::Backlight(click) => match click.press(scope.now_ms) {
                ClickOutcome::Single => None,
                ClickOutcome::Double => Some(ModeKind::Normal),
            },
            Mode::Init | Mode::Command(_) => None,
        }
    }

    pub fn on_encoder_rotate<H: HostLink + ?Sized>(
        &mut self,
        scope: &mut Scope<'_, H>,
        direction: Direction,
    ) -> Option<ModeKind> {
        match self {
            Mode::Normal(_) => {
                let delta = i16::from(direction.sign()) * i16::from(scope.config.volume_step);
                let volume = scope.ctx.adjust_volume(delta);
                scope.emit(DeviceMessage::Volume(volume));
            }
            Mode::Init | Mode::Backlight(_) => {
                let delta = i32::from(direction.sign()) * i32::from(scope.config.hue_step);
                scope.ctx.adjust_hue(delta);
            }
            Mode::Command(_) => {}
        }
        None
    }

    pub fn on_key_press<H: HostLink + ?Sized>(
        &mut self,
        scope: &mut Scope<'_, H>,
        index: usize,
    ) -> Option<ModeKind> {
        match self {
            Mode::Normal(_) if scope.ctx.keys().is_assigned(index) => {
                scope.emit(DeviceMessage::Key(index as u8));
                Some(ModeKind::Command)
            }
            _ => None,
        }
    }

    pub fn on_host_message<H: HostLink + ?Sized>(
        &mut self,
        scope: &mut Scope<'_, H>,
        message: HostMessage<'_>,
    ) -> Option<ModeKind> {
        match (self, message) {
            (Mode::Init, HostMessage::KeyConfig(config)) => {
                scope.ctx.keys_mut().apply(&config);
                scope.ctx.set_init_complete(true);
                Some(ModeKind::Normal)
            }
            (Mode::Command(pending), HostMessage::CommandComplete) => Some(pending.resume_mode()),
            _ => None,
        }
    }

    pub fn on_tick<H: HostLink + ?Sized>(&mut self, scope: &mut Scope<'_, H>) -> Option<ModeKind> {
        match self {
            Mode::Normal(click) | Mode::Backlight(click) => {
                click.expire(scope.now_ms);
                None
            }
            Mode::Command(pending) => pending
                .is_timed_out(scope.now_ms, scope.config.command_timeout_ms)
                .then(|| pending.resume_mode()),
            Mode::Init => None,
        }
    }
}
