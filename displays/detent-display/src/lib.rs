//! Status display components for the Detent keypad
//!
//! This crate provides:
//! - `DisplayBackend` trait for character-addressed displays (OLED, LCD, etc.)
//! - `Screen` character buffer with change tracking
//! - `StatusScreen`, the per-mode status layout implementing
//!   `detent_core::traits::StatusDisplay`
//!
//! # Architecture
//!
//! The mode engine hands a status snapshot to `StatusScreen` once per loop
//! iteration. The layout is rendered into the `Screen` buffer and only sent
//! to the backend when a row changed. Firmware provides the backend for its
//! concrete panel.

#![cfg_attr(not(test), no_std)]

pub mod backend;
pub mod screen;
pub mod status;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use screen::{Screen, SCREEN_COLS, SCREEN_ROWS};
pub use status::StatusScreen;
