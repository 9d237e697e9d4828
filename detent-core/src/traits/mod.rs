//! Collaborator traits
//!
//! These traits define the interface between the mode engine and the
//! hardware-specific implementations of the host link and output surfaces.

pub mod backlight;
pub mod display;
pub mod host;

pub use backlight::BacklightDriver;
pub use display::{DisplayError, StatusDisplay};
pub use host::{HostLink, LinkError};
