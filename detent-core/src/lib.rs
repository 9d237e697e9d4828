//! Board-agnostic core logic for the macro keypad firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (host link, status display, backlight)
//! - Mode engine with per-mode state
//! - Encoder edge decoding and the edge-to-loop mailbox
//! - Shared keypad context and key table
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod context;
pub mod encoder;
pub mod input;
pub mod state;
pub mod traits;

pub use config::KeypadConfig;
pub use context::Context;
pub use encoder::Direction;
pub use input::{Inputs, KeySet};
pub use state::{Engine, ModeKind, StatusSnapshot, Transition};
