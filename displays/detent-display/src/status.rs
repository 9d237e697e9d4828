//! Status screen renderer
//!
//! Lays a [`StatusSnapshot`] out on the 20×4 character screen:
//!
//! ```text
//! Normal                 Backlight              Command
//! ┌────────────────────┐ ┌────────────────────┐ ┌────────────────────┐
//! │NORMAL  VOL  55 MUTE│ │BACKLIGHT           │ │COMMAND             │
//! │Copy -    -    Past │ │Hue 120             │ │Waiting for host    │
//! │-    -    -    -    │ │Turn to change      │ │2.5s                │
//! │-    -    -    -    │ │Double-click: back  │ │                    │
//! └────────────────────┘ └────────────────────┘ └────────────────────┘
//! ```

use core::fmt::{self, Write};

use detent_core::state::{ModeKind, StatusSnapshot};
use detent_core::traits::StatusDisplay;
use heapless::String;

use crate::backend::{DisplayBackend, DisplayError};
use crate::screen::{truncate, Screen, SCREEN_ROWS};

/// Key names per grid row
const GRID_COLS: usize = 4;

/// Characters per key name cell, including the trailing gap
const CELL_WIDTH: usize = 5;

/// Formatting scratch, wider than a line so overflow truncates instead of failing
type LineBuf = String<32>;

/// Renders status snapshots onto a display backend
pub struct StatusScreen<B> {
    backend: B,
    screen: Screen,
}

impl<B: DisplayBackend> StatusScreen<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            screen: Screen::new(),
        }
    }

    /// Current screen content
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Lay out the snapshot without touching the backend
    pub fn render(&mut self, status: &StatusSnapshot<'_>) {
        match status.mode {
            ModeKind::Init => {
                self.screen.set_line(0, status.mode.name());
                self.screen.set_line(1, "Waiting for host");
                self.screen.set_line(2, "");
                self.screen.set_line(3, &format_line(format_args!("Hue {}", status.hue)));
            }
            ModeKind::Normal => {
                let header = format_line(format_args!(
                    "{:<7} VOL {:>3} {}",
                    status.mode.name(),
                    status.volume,
                    if status.muted { "MUTE" } else { "" }
                ));
                self.screen.set_line(0, header.trim_end());

                let mut slots = status.keys.iter();
                for row in 1..SCREEN_ROWS {
                    let mut line = LineBuf::new();
                    for slot in slots.by_ref().take(GRID_COLS) {
                        let name = if slot.is_assigned() { slot.name() } else { "-" };
                        let name = truncate(name, CELL_WIDTH - 1);
                        let _ = write!(line, "{:<width$}", name, width = CELL_WIDTH);
                    }
                    self.screen.set_line(row, line.trim_end());
                }
            }
            ModeKind::Backlight => {
                self.screen.set_line(0, status.mode.name());
                self.screen.set_line(1, &format_line(format_args!("Hue {}", status.hue)));
                self.screen.set_line(2, "Turn to change");
                self.screen.set_line(3, "Double-click: back");
            }
            ModeKind::Command => {
                let elapsed_ms = status.command_elapsed_ms.unwrap_or(0);
                self.screen.set_line(0, status.mode.name());
                self.screen.set_line(1, "Waiting for host");
                self.screen.set_line(
                    2,
                    &format_line(format_args!(
                        "{}.{}s",
                        elapsed_ms / 1000,
                        (elapsed_ms % 1000) / 100
                    )),
                );
                self.screen.set_line(3, "");
            }
        }
    }

    /// Send the screen to the backend if anything changed
    pub fn flush(&mut self) -> Result<(), DisplayError> {
        if !self.screen.is_dirty() {
            return Ok(());
        }

        let (cols, rows) = self.backend.dimensions();
        self.backend.clear()?;
        for (row, line) in self.screen.lines().enumerate().take(rows as usize) {
            self.backend
                .draw_text(row as u8, 0, truncate(line, cols as usize))?;
        }
        self.backend.flush()?;

        self.screen.mark_clean();
        Ok(())
    }
}

impl<B: DisplayBackend> StatusDisplay for StatusScreen<B> {
    fn show(&mut self, status: &StatusSnapshot<'_>) -> Result<(), DisplayError> {
        self.render(status);
        self.flush()
    }
}

fn format_line(args: fmt::Arguments<'_>) -> LineBuf {
    let mut line = LineBuf::new();
    let _ = line.write_fmt(args);
    line
}
