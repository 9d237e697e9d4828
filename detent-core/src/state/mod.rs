//! Keypad mode engine
//!
//! Defines the authoritative runtime behavior of the keypad.
//! The mode set is closed, and every transition runs the outgoing mode's
//! exit action before the incoming mode's entry action.

pub mod click;
pub mod command;
pub mod engine;
pub mod events;
pub mod mode;
pub mod snapshot;

pub use click::{ClickOutcome, DoubleClick};
pub use command::PendingCommand;
pub use engine::{Engine, StepReport, Transition};
pub use events::Event;
pub use mode::ModeKind;
pub use snapshot::StatusSnapshot;
