//! Line framing for the host serial link.
//!
//! Line format:
//! - ASCII text, at most [`MAX_LINE_LEN`] bytes
//! - terminated by `\n`; a `\r` anywhere in the line is dropped
//! - empty lines are skipped

use heapless::{String, Vec};

use crate::key_config::{KEY_COUNT, MAX_KEY_NAME_LEN};
use crate::messages::KEY_CONFIG_PREFIX;

/// Line terminator byte
pub const LINE_END: u8 = b'\n';

/// Longest `KEY_CONFIG` line: every key with a two-digit index, a comma,
/// a full-length name and a `|` between entries
pub const MAX_KEY_CONFIG_LINE_LEN: usize =
    KEY_CONFIG_PREFIX.len() + KEY_COUNT * (3 + MAX_KEY_NAME_LEN) + (KEY_COUNT - 1);

/// Maximum accepted line length in bytes, excluding the terminator
pub const MAX_LINE_LEN: usize = MAX_KEY_CONFIG_LINE_LEN.next_multiple_of(64);

/// A complete line received from the host
pub type Line = String<MAX_LINE_LEN>;

/// Errors that can occur while assembling a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded `MAX_LINE_LEN`; the rest of it is discarded
    Overflow,
    /// Line was not valid UTF-8
    InvalidUtf8,
}

/// State machine assembling incoming bytes into lines
#[derive(Debug, Clone)]
pub struct LineParser {
    state: ParseState,
    buffer: Vec<u8, MAX_LINE_LEN>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Collecting bytes of the current line
    Accumulating,
    /// Dropping the tail of an overlong line until its terminator
    Discarding,
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LineParser {
    /// Create a new line parser
    pub const fn new() -> Self {
        Self {
            state: ParseState::Accumulating,
            buffer: Vec::new(),
        }
    }

    /// Drop any partial line, e.g. after bytes were lost on the wire
    pub fn reset(&mut self) {
        self.state = ParseState::Accumulating;
        self.buffer.clear();
    }

    /// Number of bytes buffered for the current line
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(line))` when a non-empty line is complete,
    /// `Ok(None)` when more bytes are needed, or `Err` when the current
    /// line had to be dropped.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Line>, LineError> {
        match self.state {
            ParseState::Discarding => {
                if byte == LINE_END {
                    self.state = ParseState::Accumulating;
                }
                Ok(None)
            }
            ParseState::Accumulating => match byte {
                LINE_END => self.finish(),
                b'\r' => Ok(None),
                _ => {
                    if self.buffer.push(byte).is_err() {
                        self.buffer.clear();
                        self.state = ParseState::Discarding;
                        return Err(LineError::Overflow);
                    }
                    Ok(None)
                }
            },
        }
    }

    /// Feed bytes until the first complete line
    #[cfg(test)]
    fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Line>, LineError> {
        for &byte in bytes {
            if let Some(line) = self.feed(byte)? {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }

    fn finish(&mut self) -> Result<Option<Line>, LineError> {
        if self.buffer.is_empty() {
            return Ok(None);
        }

        let result = match core::str::from_utf8(&self.buffer) {
            Ok(text) => {
                let mut line = Line::new();
                // Same capacity as the buffer
                let _ = line.push_str(text);
                Ok(Some(line))
            }
            Err(_) => Err(LineError::InvalidUtf8),
        };

        self.buffer.clear();
        result
    }
}
