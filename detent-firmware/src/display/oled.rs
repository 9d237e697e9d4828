//! SSD1306 OLED backend

use detent_display::{DisplayBackend, DisplayError};
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use embedded_hal::i2c::I2c;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

/// Concrete display driver type
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Text columns (6 px glyphs on 128 px)
const COLS: u8 = 20;

/// Text rows
const ROWS: u8 = 4;

const GLYPH_WIDTH: i32 = 6;

/// Baseline of the first row, then one row every `ROW_PITCH` pixels
const FIRST_BASELINE: i32 = 10;
const ROW_PITCH: i32 = 14;

/// Character-row backend drawing into the SSD1306 frame buffer
pub struct OledBackend<I2C> {
    display: Display<I2C>,
    style: MonoTextStyle<'static, BinaryColor>,
}

impl<I2C: I2c> OledBackend<I2C> {
    /// Initialise the panel and blank it
    pub fn new(i2c: I2C) -> Result<Self, DisplayError> {
        let interface = I2CDisplayInterface::new(i2c);
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        display.init().map_err(|_| DisplayError::NotReady)?;
        display.clear_buffer();
        display.flush().map_err(|_| DisplayError::Bus)?;

        let style = MonoTextStyleBuilder::new()
            .font(&FONT_6X10)
            .text_color(BinaryColor::On)
            .build();

        Ok(Self { display, style })
    }
}

impl<I2C: I2c> DisplayBackend for OledBackend<I2C> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.display.clear_buffer();
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        if row >= ROWS || col >= COLS {
            return Err(DisplayError::BufferOverflow);
        }

        let origin = Point::new(
            i32::from(col) * GLYPH_WIDTH,
            FIRST_BASELINE + i32::from(row) * ROW_PITCH,
        );
        Text::new(text, origin, self.style)
            .draw(&mut self.display)
            .map_err(|_| DisplayError::Bus)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.display.flush().map_err(|_| DisplayError::Bus)
    }

    fn dimensions(&self) -> (u8, u8) {
        (COLS, ROWS)
    }
}
