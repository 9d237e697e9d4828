//! Status screen character buffer
//!
//! Holds the rows last laid out by `StatusScreen` and remembers whether
//! they differ from what the panel shows.

use heapless::String;

/// Text rows
pub const SCREEN_ROWS: usize = 4;

/// Text columns
pub const SCREEN_COLS: usize = 20;

/// Byte capacity of one row
pub const LINE_LEN: usize = SCREEN_COLS;

/// Row buffer with change tracking
///
/// Writing the same text again leaves the buffer clean, so re-rendering an
/// unchanged status every loop iteration costs no display traffic.
#[derive(Clone)]
pub struct Screen {
    lines: [String<LINE_LEN>; SCREEN_ROWS],
    /// Rows changed since the last successful flush
    dirty: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Blank screen, dirty so the first flush blanks the panel too
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
            dirty: true,
        }
    }

    pub fn clear(&mut self) {
        for row in 0..SCREEN_ROWS {
            self.set_line(row, "");
        }
    }

    /// Replace a row, truncated to `LINE_LEN` bytes; out-of-range rows are ignored
    pub fn set_line(&mut self, row: usize, text: &str) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };

        let text = truncate(text, LINE_LEN);
        if line.as_str() == text {
            return;
        }

        line.clear();
        // Fits after truncation
        let _ = line.push_str(text);
        self.dirty = true;
    }

    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(String::as_str)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Called once the backend accepted the frame
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Rows top to bottom
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}

/// Cut `text` to at most `max` bytes on a character boundary
pub fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_screen_is_dirty_and_blank() {
        let screen = Screen::new();
        assert!(screen.is_dirty());
        assert!(screen.lines().all(str::is_empty));
    }

    #[test]
    fn test_unchanged_line_stays_clean() {
        let mut screen = Screen::new();
        screen.set_line(0, "NORMAL");
        screen.mark_clean();

        screen.set_line(0, "NORMAL");
        assert!(!screen.is_dirty());

        screen.set_line(0, "BACKLIGHT");
        assert!(screen.is_dirty());
        assert_eq!(screen.get_line(0), Some("BACKLIGHT"));
    }

    #[test]
    fn test_long_line_truncated() {
        let mut screen = Screen::new();
        screen.set_line(1, "This line is far too long for the screen");
        assert_eq!(screen.get_line(1), Some("This line is far too"));
    }

    #[test]
    fn test_out_of_range_row_ignored() {
        let mut screen = Screen::new();
        screen.mark_clean();
        screen.set_line(SCREEN_ROWS, "nope");
        assert!(!screen.is_dirty());
        assert_eq!(screen.get_line(SCREEN_ROWS), None);
    }

    #[test]
    fn test_truncate_char_boundary() {
        assert_eq!(truncate("abcé", 4), "abc");
        assert_eq!(truncate("abc", 10), "abc");
    }

    #[test]
    fn test_clear() {
        let mut screen = Screen::new();
        screen.set_line(2, "x");
        screen.mark_clean();
        screen.clear();
        assert!(screen.is_dirty());
        assert_eq!(screen.get_line(2), Some(""));
    }
}
