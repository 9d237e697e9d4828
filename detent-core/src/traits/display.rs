//! Status display trait

use crate::state::StatusSnapshot;

/// Errors that can occur with the status display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer failed
    Bus,
    /// Display not initialized
    NotReady,
    /// Text did not fit the target region
    BufferOverflow,
}

/// Trait for the status display
///
/// Called once per control loop iteration with the current snapshot.
/// Implementations decide themselves whether anything needs redrawing.
pub trait StatusDisplay {
    fn show(&mut self, status: &StatusSnapshot<'_>) -> Result<(), DisplayError>;
}
