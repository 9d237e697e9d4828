//! Configuration types
//!
//! Board-agnostic configuration structures. Values are fixed at build time.

pub mod keypad;

pub use keypad::*;
