//! Character-row output for the status screen

pub use detent_core::traits::DisplayError;

/// A panel that can show rows of text
///
/// `StatusScreen` redraws every row after `clear` and then calls `flush`
/// once, so buffered panels only need to push pixels in `flush`.
pub trait DisplayBackend {
    /// Blank the frame
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Place `text` starting at character cell (`row`, `col`)
    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Push the frame to the panel
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Text grid size as `(cols, rows)`
    fn dimensions(&self) -> (u8, u8);
}
