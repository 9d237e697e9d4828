//! Mode engine
//!
//! The engine is the composition root of the keypad logic:
//! - Owns the [`Context`] and the active [`Mode`]
//! - Dispatches every input event to the active mode
//! - Runs exit and entry actions on mode changes
//! - Exposes a read-only snapshot for the output surfaces
//!
//! It does no I/O of its own. Outbound protocol messages go through the
//! [`HostLink`] passed into each call, and every call that changed mode
//! returns the [`Transition`] so the caller can log it.

use heapless::Vec;

use detent_protocol::HostMessage;

use crate::config::KeypadConfig;
use crate::context::Context;
use crate::encoder::Direction;
use crate::input::Inputs;
use crate::traits::{BacklightDriver, DisplayError, HostLink, StatusDisplay};

use super::events::Event;
use super::mode::{Mode, ModeKind, Scope};
use super::snapshot::StatusSnapshot;

/// Upper bound on mode changes within one loop iteration
pub const MAX_STEP_TRANSITIONS: usize = 16;

/// A completed mode change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub from: ModeKind,
    pub to: ModeKind,
}

/// Mode changes made during one [`Engine::step`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepReport {
    transitions: Vec<Transition, MAX_STEP_TRANSITIONS>,
}

impl StepReport {
    fn record(&mut self, transition: Option<Transition>) {
        if let Some(transition) = transition {
            // Bounded by the number of dispatches per step
            let _ = self.transitions.push(transition);
        }
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

/// Keypad mode engine
#[derive(Debug, Clone)]
pub struct Engine {
    ctx: Context,
    mode: Mode,
    config: KeypadConfig,
}

impl Engine {
    /// Create an engine in Init mode
    ///
    /// Init's entry action has not run yet; call [`Engine::start`] once the
    /// host link is available.
    pub fn new(config: KeypadConfig) -> Self {
        Self {
            ctx: Context::new(config.default_volume),
            mode: Mode::Init,
            config,
        }
    }

    /// Enter Init: clear the key table and request the configuration
    pub fn start<H: HostLink + ?Sized>(&mut self, host: &mut H, now_ms: u32) {
        let mut scope = Scope {
            ctx: &mut self.ctx,
            host,
            config: &self.config,
            now_ms,
        };
        self.mode.exit(&mut scope);
        self.mode = Mode::Init;
        self.mode.enter(&mut scope);
    }

    /// Get the active mode
    pub fn mode(&self) -> ModeKind {
        self.mode.kind()
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn config(&self) -> &KeypadConfig {
        &self.config
    }

    /// Handle a debounced encoder button press
    pub fn handle_encoder_click<H: HostLink + ?Sized>(
        &mut self,
        host: &mut H,
        now_ms: u32,
    ) -> Option<Transition> {
        self.dispatch(host, Event::EncoderClick, now_ms)
    }

    /// Handle one encoder detent
    pub fn handle_rotation<H: HostLink + ?Sized>(
        &mut self,
        host: &mut H,
        direction: Direction,
        now_ms: u32,
    ) -> Option<Transition> {
        self.dispatch(host, Event::EncoderRotate(direction), now_ms)
    }

    /// Handle a key press edge
    pub fn handle_key_press<H: HostLink + ?Sized>(
        &mut self,
        host: &mut H,
        index: usize,
        now_ms: u32,
    ) -> Option<Transition> {
        self.dispatch(host, Event::KeyPress(index), now_ms)
    }

    /// Decode and handle one host line
    pub fn handle_host_line<H: HostLink + ?Sized>(
        &mut self,
        host: &mut H,
        line: &str,
        now_ms: u32,
    ) -> Option<Transition> {
        self.dispatch(host, Event::Host(HostMessage::parse(line)), now_ms)
    }

    /// Check double-click expiry and command timeout
    pub fn tick<H: HostLink + ?Sized>(&mut self, host: &mut H, now_ms: u32) -> Option<Transition> {
        self.dispatch(host, Event::Tick, now_ms)
    }

    /// Route one event to the active mode and apply any resulting transition
    pub fn dispatch<H: HostLink + ?Sized>(
        &mut self,
        host: &mut H,
        event: Event<'_>,
        now_ms: u32,
    ) -> Option<Transition> {
        let mut scope = Scope {
            ctx: &mut self.ctx,
            host: &mut *host,
            config: &self.config,
            now_ms,
        };

        let next = match event {
            Event::EncoderClick => self.mode.on_encoder_click(&mut scope),
            Event::EncoderRotate(direction) => self.mode.on_encoder_rotate(&mut scope, direction),
            Event::KeyPress(index) => self.mode.on_key_press(&mut scope, index),
            Event::Host(message) => self.mode.on_host_message(&mut scope, message),
            Event::Tick => self.mode.on_tick(&mut scope),
        }?;

        Some(self.transition(host, next, now_ms))
    }

    /// Run one control loop iteration
    ///
    /// Order: host line, button, keys in scan order, encoder detent, tick.
    pub fn step<H: HostLink + ?Sized>(
        &mut self,
        host: &mut H,
        inputs: &Inputs<'_>,
        now_ms: u32,
    ) -> StepReport {
        let mut report = StepReport::default();

        if let Some(line) = inputs.host_line {
            report.record(self.handle_host_line(host, line, now_ms));
        }
        if inputs.button_pressed {
            report.record(self.handle_encoder_click(host, now_ms));
        }
        for index in inputs.keys.iter() {
            report.record(self.handle_key_press(host, index, now_ms));
        }
        if let Some(direction) = inputs.rotation {
            report.record(self.handle_rotation(host, direction, now_ms));
        }
        report.record(self.tick(host, now_ms));

        report
    }

    /// Current state for the status display
    pub fn snapshot(&self, now_ms: u32) -> StatusSnapshot<'_> {
        StatusSnapshot {
            mode: self.mode.kind(),
            volume: self.ctx.volume(),
            muted: self.ctx.muted(),
            hue: self.ctx.hue(),
            keys: self.ctx.keys(),
            command_elapsed_ms: self
                .mode
                .pending_command()
                .map(|pending| pending.elapsed_ms(now_ms)),
        }
    }

    /// Push the current state to the output surfaces
    pub fn present<D, B>(
        &self,
        display: &mut D,
        backlight: &mut B,
        now_ms: u32,
    ) -> Result<(), DisplayError>
    where
        D: StatusDisplay + ?Sized,
        B: BacklightDriver + ?Sized,
    {
        backlight.set_hue(self.ctx.hue());
        display.show(&self.snapshot(now_ms))
    }

    fn transition<H: HostLink + ?Sized>(
        &mut self,
        host: &mut H,
        to: ModeKind,
        now_ms: u32,
    ) -> Transition {
        let from = self.mode.kind();
        let mut scope = Scope {
            ctx: &mut self.ctx,
            host,
            config: &self.config,
            now_ms,
        };

        self.mode.exit(&mut scope);
        self.mode = Mode::fresh(to, from, &self.config);
        self.mode.enter(&mut scope);

        Transition { from, to }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeySet;
    use crate::traits::LinkError;
    use detent_protocol::{DeviceMessage, Line, LineParser, KEY_COUNT, MAX_KEY_NAME_LEN};
    use proptest::prelude::*;
    use std::vec::Vec;

    #[derive(Default)]
    struct RecordingHost {
        sent: Vec<DeviceMessage>,
        refuse: bool,
    }

    impl RecordingHost {
        fn take(&mut self) -> Vec<DeviceMessage> {
            core::mem::take(&mut self.sent)
        }
    }

    impl HostLink for RecordingHost {
        fn send(&mut self, message: DeviceMessage) -> Result<(), LinkError> {
            if self.refuse {
                return Err(LinkError::Full);
            }
            self.sent.push(message);
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingDisplay {
        frames: Vec<(ModeKind, u8, bool, u16, Option<u32>)>,
    }

    impl StatusDisplay for RecordingDisplay {
        fn show(&mut self, status: &StatusSnapshot<'_>) -> Result<(), DisplayError> {
            self.frames.push((
                status.mode,
                status.volume,
                status.muted,
                status.hue,
                status.command_elapsed_ms,
            ));
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingBacklight {
        hues: Vec<u16>,
    }

    impl BacklightDriver for RecordingBacklight {
        fn set_hue(&mut self, hue: u16) {
            self.hues.push(hue);
        }
    }

    fn started() -> (Engine, RecordingHost) {
        let mut engine = Engine::new(KeypadConfig::DEFAULT);
        let mut host = RecordingHost::default();
        engine.start(&mut host, 0);
        (engine, host)
    }

    /// Engine in Normal mode with keys 0 and 3 assigned, host log cleared
    fn normal() -> (Engine, RecordingHost) {
        let (mut engine, mut host) = started();
        engine.handle_host_line(&mut host, "KEY_CONFIG:0,Copy|3,Paste", 10);
        host.take();
        (engine, host)
    }

    /// Push `text` plus a newline through the serial line framer
    fn frame(text: &str) -> Line {
        let mut parser = LineParser::new();
        let mut framed = None;
        for &byte in text.as_bytes().iter().chain(b"\n") {
            if let Some(line) = parser.feed(byte).unwrap() {
                framed = Some(line);
            }
        }
        framed.unwrap()
    }

    #[test]
    fn test_boot_sends_init_request() {
        let (engine, host) = started();
        assert_eq!(engine.mode(), ModeKind::Init);
        assert_eq!(host.sent, [DeviceMessage::InitRequest]);
        assert_eq!(engine.context().volume(), 50);
        assert!(!engine.context().muted());
        assert_eq!(engine.context().hue(), 0);
    }

    #[test]
    fn test_key_config_enters_normal() {
        let (mut engine, mut host) = started();
        let transition = engine.handle_host_line(&mut host, "KEY_CONFIG:0,Copy|3,Paste", 10);

        assert_eq!(
            transition,
            Some(Transition {
                from: ModeKind::Init,
                to: ModeKind::Normal
            })
        );
        let keys = engine.context().keys();
        assert!(keys.is_assigned(0));
        assert!(keys.is_assigned(3));
        assert_eq!(keys.assigned_count(), 2);
        assert_eq!(keys.name(0), Some("Copy"));
        assert_eq!(keys.name(3), Some("Paste"));
        assert!(engine.context().init_complete());
    }

    #[test]
    fn test_full_key_config_over_serial() {
        let names = [
            "Copy", "Paste", "Cut", "Undo", "Redo", "Save", "Find", "Mic Mute",
            "Screenshot", "Lock", "Play/Pause", "Next Track",
        ];
        let text = names
            .iter()
            .enumerate()
            .map(|(index, name)| std::format!("{},{}", index, name))
            .collect::<Vec<_>>()
            .join("|");
        let line = frame(&std::format!("KEY_CONFIG:{}", text));

        let (mut engine, mut host) = started();
        engine.handle_host_line(&mut host, &line, 10);

        assert_eq!(engine.mode(), ModeKind::Normal);
        let keys = engine.context().keys();
        assert_eq!(keys.assigned_count(), KEY_COUNT);
        for (index, name) in names.iter().enumerate() {
            assert_eq!(keys.name(index), Some(*name));
        }
    }

    #[test]
    fn test_longest_key_config_over_serial() {
        let text = (0..KEY_COUNT)
            .map(|index| std::format!("{},{}", index, "W".repeat(MAX_KEY_NAME_LEN)))
            .collect::<Vec<_>>()
            .join("|");
        let line = frame(&std::format!("KEY_CONFIG:{}", text));

        let (mut engine, mut host) = started();
        engine.handle_host_line(&mut host, &line, 10);

        assert_eq!(engine.mode(), ModeKind::Normal);
        assert_eq!(engine.context().keys().assigned_count(), KEY_COUNT);
        assert_eq!(engine.context().keys().name(11).map(str::len), Some(MAX_KEY_NAME_LEN));
    }

    #[test]
    fn test_init_ignores_other_lines() {
        let (mut engine, mut host) = started();
        assert_eq!(engine.handle_host_line(&mut host, "hello", 10), None);
        assert_eq!(engine.handle_host_line(&mut host, "COMMAND_COMPLETE", 10), None);
        assert_eq!(engine.mode(), ModeKind::Init);
    }

    #[test]
    fn test_init_ignores_keys_and_clicks() {
        let (mut engine, mut host) = started();
        host.take();
        assert_eq!(engine.handle_key_press(&mut host, 0, 10), None);
        assert_eq!(engine.handle_encoder_click(&mut host, 10), None);
        assert!(host.sent.is_empty());
        assert!(!engine.context().muted());
    }

    #[test]
    fn test_init_rotation_adjusts_hue() {
        let (mut engine, mut host) = started();
        host.take();
        engine.handle_rotation(&mut host, Direction::CounterClockwise, 10);
        assert_eq!(engine.context().hue(), 355);
        assert!(host.sent.is_empty());
    }

    #[test]
    fn test_rotation_volume_and_clamp() {
        let (mut engine, mut host) = normal();

        engine.handle_rotation(&mut host, Direction::Clockwise, 20);
        assert_eq!(engine.context().volume(), 55);
        assert_eq!(host.take(), [DeviceMessage::Volume(55)]);

        for i in 0..20 {
            engine.handle_rotation(&mut host, Direction::CounterClockwise, 30 + i);
        }
        assert_eq!(engine.context().volume(), 0);
        let sent = host.take();
        assert_eq!(sent.len(), 20);
        assert_eq!(
            sent.iter()
                .filter(|m| **m == DeviceMessage::Volume(0))
                .count(),
            10
        );
        assert_eq!(sent.last(), Some(&DeviceMessage::Volume(0)));
    }

    #[test]
    fn test_volume_emitted_at_limit() {
        let (mut engine, mut host) = normal();
        for i in 0..15 {
            engine.handle_rotation(&mut host, Direction::Clockwise, 20 + i);
        }
        assert_eq!(engine.context().volume(), 100);
        assert_eq!(host.take().last(), Some(&DeviceMessage::Volume(100)));

        engine.handle_rotation(&mut host, Direction::Clockwise, 100);
        assert_eq!(host.take(), [DeviceMessage::Volume(100)]);
    }

    #[test]
    fn test_key_press_enters_command_then_times_out() {
        let (mut engine, mut host) = normal();

        let transition = engine.handle_key_press(&mut host, 0, 1_000);
        assert_eq!(
            transition,
            Some(Transition {
                from: ModeKind::Normal,
                to: ModeKind::Command
            })
        );
        assert_eq!(host.take(), [DeviceMessage::Key(0)]);
        assert!(engine.context().awaiting_host_ack());

        assert_eq!(engine.tick(&mut host, 6_000), None);
        assert_eq!(engine.mode(), ModeKind::Command);

        let transition = engine.tick(&mut host, 7_000);
        assert_eq!(
            transition,
            Some(Transition {
                from: ModeKind::Command,
                to: ModeKind::Normal
            })
        );
        assert!(!engine.context().awaiting_host_ack());
        assert!(host.sent.is_empty());
    }

    #[test]
    fn test_command_complete_returns_to_normal() {
        let (mut engine, mut host) = normal();
        engine.handle_key_press(&mut host, 3, 1_000);

        let transition = engine.handle_host_line(&mut host, "COMMAND_COMPLETE\r", 1_200);
        assert_eq!(transition.map(|t| t.to), Some(ModeKind::Normal));
        assert!(!engine.context().awaiting_host_ack());

        // Late ack is a no-op
        assert_eq!(engine.handle_host_line(&mut host, "COMMAND_COMPLETE", 1_300), None);
        assert_eq!(engine.mode(), ModeKind::Normal);
    }

    #[test]
    fn test_command_ignores_input() {
        let (mut engine, mut host) = normal();
        engine.handle_key_press(&mut host, 0, 1_000);
        host.take();

        assert_eq!(engine.handle_rotation(&mut host, Direction::Clockwise, 1_010), None);
        assert_eq!(engine.handle_encoder_click(&mut host, 1_020), None);
        assert_eq!(engine.handle_key_press(&mut host, 3, 1_030), None);
        assert_eq!(engine.handle_host_line(&mut host, "KEY_CONFIG:1,X", 1_040), None);

        assert!(host.sent.is_empty());
        assert_eq!(engine.context().volume(), 50);
        assert!(!engine.context().muted());
        assert!(!engine.context().keys().is_assigned(1));
        assert_eq!(engine.mode(), ModeKind::Command);
    }

    #[test]
    fn test_unassigned_key_ignored() {
        let (mut engine, mut host) = normal();
        assert_eq!(engine.handle_key_press(&mut host, 1, 1_000), None);
        assert_eq!(engine.handle_key_press(&mut host, 42, 1_000), None);
        assert!(host.sent.is_empty());
        assert_eq!(engine.mode(), ModeKind::Normal);
    }

    #[test]
    fn test_command_complete_outside_command_is_noop() {
        let (mut engine, mut host) = normal();
        let before = engine.context().clone();
        assert_eq!(engine.handle_host_line(&mut host, "COMMAND_COMPLETE", 100), None);
        assert_eq!(engine.context(), &before);
        assert!(host.sent.is_empty());
    }

    #[test]
    fn test_key_config_outside_init_ignored() {
        let (mut engine, mut host) = normal();
        assert_eq!(engine.handle_host_line(&mut host, "KEY_CONFIG:5,Late", 100), None);
        assert!(!engine.context().keys().is_assigned(5));
    }

    #[test]
    fn test_click_then_double_click() {
        let (mut engine, mut host) = normal();

        assert_eq!(engine.handle_encoder_click(&mut host, 1_000), None);
        assert_eq!(host.take(), [DeviceMessage::Mute(true)]);
        assert!(engine.context().muted());

        let transition = engine.handle_encoder_click(&mut host, 1_200);
        assert_eq!(transition.map(|t| t.to), Some(ModeKind::Backlight));
        assert!(host.sent.is_empty());
        assert!(engine.context().muted());
    }

    #[test]
    fn test_slow_clicks_toggle_twice() {
        let (mut engine, mut host) = normal();
        engine.handle_encoder_click(&mut host, 1_000);
        engine.tick(&mut host, 1_350);
        engine.handle_encoder_click(&mut host, 1_400);

        assert_eq!(
            host.take(),
            [DeviceMessage::Mute(true), DeviceMessage::Mute(false)]
        );
        assert_eq!(engine.mode(), ModeKind::Normal);
    }

    #[test]
    fn test_backlight_rotation_and_exit() {
        let (mut engine, mut host) = normal();
        engine.handle_encoder_click(&mut host, 1_000);
        engine.handle_encoder_click(&mut host, 1_100);
        host.take();

        engine.handle_rotation(&mut host, Direction::Clockwise, 1_200);
        engine.handle_rotation(&mut host, Direction::Clockwise, 1_210);
        assert_eq!(engine.context().hue(), 10);
        assert_eq!(engine.context().volume(), 50);

        // Armed state from Normal does not carry over; first click only arms
        assert_eq!(engine.handle_encoder_click(&mut host, 1_250), None);
        let transition = engine.handle_encoder_click(&mut host, 1_400);
        assert_eq!(transition.map(|t| t.to), Some(ModeKind::Normal));
        assert!(host.sent.is_empty());
        assert!(engine.context().muted());
    }

    #[test]
    fn test_backlight_single_click_expires() {
        let (mut engine, mut host) = normal();
        engine.handle_encoder_click(&mut host, 1_000);
        engine.handle_encoder_click(&mut host, 1_100);

        engine.handle_encoder_click(&mut host, 2_000);
        engine.tick(&mut host, 2_400);
        assert_eq!(engine.handle_encoder_click(&mut host, 2_450), None);
        assert_eq!(engine.mode(), ModeKind::Backlight);
    }

    #[test]
    fn test_refused_messages_counted() {
        let (mut engine, mut host) = normal();
        host.refuse = true;
        engine.handle_encoder_click(&mut host, 1_000);
        engine.handle_rotation(&mut host, Direction::Clockwise, 2_000);

        assert_eq!(engine.context().dropped_messages(), 2);
        assert!(engine.context().muted());
        assert_eq!(engine.context().volume(), 55);
    }

    #[test]
    fn test_key_press_with_refused_message_still_enters_command() {
        let (mut engine, mut host) = normal();
        host.refuse = true;
        engine.handle_key_press(&mut host, 0, 1_000);
        assert_eq!(engine.mode(), ModeKind::Command);
        assert_eq!(engine.context().dropped_messages(), 1);
    }

    #[test]
    fn test_step_order() {
        let (mut engine, mut host) = started();
        host.take();

        // Config, then key 0 in the same iteration: keys run after the line
        let inputs = Inputs {
            host_line: Some("KEY_CONFIG:0,Copy"),
            button_pressed: false,
            keys: [0, 5].into_iter().collect::<KeySet>(),
            rotation: Some(Direction::Clockwise),
        };
        let report = engine.step(&mut host, &inputs, 100);

        assert_eq!(
            report.transitions(),
            [
                Transition {
                    from: ModeKind::Init,
                    to: ModeKind::Normal
                },
                Transition {
                    from: ModeKind::Normal,
                    to: ModeKind::Command
                },
            ]
        );
        // Rotation landed in Command and was ignored
        assert_eq!(host.take(), [DeviceMessage::Key(0)]);
        assert_eq!(engine.context().volume(), 50);
    }

    #[test]
    fn test_step_without_input_ticks() {
        let (mut engine, mut host) = normal();
        engine.handle_key_press(&mut host, 0, 1_000);

        let report = engine.step(&mut host, &Inputs::default(), 6_001);
        assert_eq!(
            report.transitions(),
            [Transition {
                from: ModeKind::Command,
                to: ModeKind::Normal
            }]
        );
        assert!(engine.step(&mut host, &Inputs::default(), 6_011).is_empty());
    }

    #[test]
    fn test_snapshot_and_present() {
        let (mut engine, mut host) = normal();
        let mut display = RecordingDisplay::default();
        let mut backlight = RecordingBacklight::default();

        engine.present(&mut display, &mut backlight, 500).unwrap();
        engine.handle_key_press(&mut host, 3, 1_000);
        engine.present(&mut display, &mut backlight, 3_500).unwrap();

        assert_eq!(
            display.frames,
            [
                (ModeKind::Normal, 50, false, 0, None),
                (ModeKind::Command, 50, false, 0, Some(2_500)),
            ]
        );
        assert_eq!(backlight.hues, [0, 0]);

        let snapshot = engine.snapshot(3_500);
        assert_eq!(snapshot.keys.name(3), Some("Paste"));
    }

    #[test]
    fn test_restart_clears_keys() {
        let (mut engine, mut host) = normal();
        engine.start(&mut host, 2_000);

        assert_eq!(engine.mode(), ModeKind::Init);
        assert_eq!(engine.context().keys().assigned_count(), 0);
        assert!(!engine.context().init_complete());
        assert_eq!(host.take(), [DeviceMessage::InitRequest]);
    }

    #[derive(Debug, Clone)]
    enum Action {
        Click,
        Rotate(bool),
        Key(usize),
        Line(&'static str),
        Wait(u32),
    }

    fn action() -> impl Strategy<Value = Action> {
        prop_oneof![
            Just(Action::Click),
            any::<bool>().prop_map(Action::Rotate),
            (0usize..14).prop_map(Action::Key),
            prop_oneof![
                Just("COMMAND_COMPLETE"),
                Just("KEY_CONFIG:0,A|7,B|13,C"),
                Just("noise"),
            ]
            .prop_map(Action::Line),
            (0u32..7_000).prop_map(Action::Wait),
        ]
    }

    proptest! {
        #[test]
        fn prop_invariants_hold(actions in proptest::collection::vec(action(), 0..200)) {
            let mut engine = Engine::new(KeypadConfig::DEFAULT);
            let mut host = RecordingHost::default();
            engine.start(&mut host, 0);
            let mut now = 0u32;

            for action in actions {
                let mode_before = engine.mode();
                host.take();
                match action {
                    Action::Click => { engine.handle_encoder_click(&mut host, now); }
                    Action::Rotate(cw) => {
                        let direction = if cw { Direction::Clockwise } else { Direction::CounterClockwise };
                        engine.handle_rotation(&mut host, direction, now);
                        if mode_before == ModeKind::Normal {
                            // Exactly one VOL per accepted detent
                            prop_assert_eq!(host.sent.len(), 1);
                            prop_assert_eq!(host.sent[0], DeviceMessage::Volume(engine.context().volume()));
                        }
                    }
                    Action::Key(index) => { engine.handle_key_press(&mut host, index, now); }
                    Action::Line(line) => { engine.handle_host_line(&mut host, line, now); }
                    Action::Wait(ms) => {
                        now = now.wrapping_add(ms);
                        engine.tick(&mut host, now);
                    }
                }

                let ctx = engine.context();
                prop_assert!(ctx.volume() <= 100);
                prop_assert!(ctx.hue() < 360);
                prop_assert_eq!(ctx.awaiting_host_ack(), engine.mode() == ModeKind::Command);
                if engine.mode() != ModeKind::Init {
                    prop_assert!(ctx.init_complete());
                }
                now = now.wrapping_add(1);
            }
        }

        #[test]
        fn prop_full_table_survives_framing(
            names in proptest::collection::vec("[A-Za-z/]{1,16}", KEY_COUNT)
        ) {
            let text = names
                .iter()
                .enumerate()
                .map(|(index, name)| std::format!("{},{}", index, name))
                .collect::<Vec<_>>()
                .join("|");
            let line = frame(&std::format!("KEY_CONFIG:{}", text));

            let (mut engine, mut host) = started();
            engine.handle_host_line(&mut host, &line, 10);

            prop_assert_eq!(engine.mode(), ModeKind::Normal);
            for (index, name) in names.iter().enumerate() {
                prop_assert_eq!(engine.context().keys().name(index), Some(name.as_str()));
            }
        }

        #[test]
        fn prop_command_times_out_once(wait in 0u32..20_000) {
            let (mut engine, mut host) = normal();
            engine.handle_key_press(&mut host, 0, 1_000);

            let transition = engine.tick(&mut host, 1_000 + wait);
            if wait > 5_000 {
                prop_assert_eq!(transition.map(|t| t.to), Some(ModeKind::Normal));
                prop_assert_eq!(engine.tick(&mut host, 1_000 + wait + 1), None);
            } else {
                prop_assert_eq!(transition, None);
                prop_assert_eq!(engine.mode(), ModeKind::Command);
            }
        }

        #[test]
        fn prop_double_click_law(gap in 1u32..1_000) {
            let (mut engine, mut host) = normal();
            engine.handle_encoder_click(&mut host, 1_000);
            engine.tick(&mut host, 1_000 + gap);
            engine.handle_encoder_click(&mut host, 1_000 + gap);

            let mutes = host.sent.iter().filter(|m| matches!(m, DeviceMessage::Mute(_))).count();
            if gap <= 300 {
                prop_assert_eq!(engine.mode(), ModeKind::Backlight);
                prop_assert_eq!(mutes, 1);
            } else {
                prop_assert_eq!(engine.mode(), ModeKind::Normal);
                prop_assert_eq!(mutes, 2);
            }
        }
    }
}
