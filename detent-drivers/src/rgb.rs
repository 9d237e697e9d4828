//! RGB backlight driver
//!
//! Converts a hue into a fully saturated, full-brightness colour and drives
//! one common-cathode (or, inverted, common-anode) RGB LED through three PWM
//! channels.
//!
//! # Usage
//!
//! ```ignore
//! let mut led = RgbLed::new(red, green, blue, false);
//! led.set_hue(120); // pure green
//! ```

use detent_core::config::HUE_RANGE;
use detent_core::traits::BacklightDriver;
use embedded_hal::pwm::SetDutyCycle;

/// Full-scale channel value
pub const CHANNEL_MAX: u8 = 255;

/// Degrees per colour-wheel sector
const SECTOR_DEG: u16 = 60;

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Hue in degrees to RGB at full saturation and value
///
/// Hues at or above 360 wrap.
pub fn hue_to_rgb(hue: u16) -> Rgb {
    let hue = hue % HUE_RANGE;
    let sector = hue / SECTOR_DEG;
    let offset = u32::from(hue % SECTOR_DEG);

    let max = u32::from(CHANNEL_MAX);
    let rising = (offset * max / u32::from(SECTOR_DEG)) as u8;
    let falling = ((u32::from(SECTOR_DEG) - offset) * max / u32::from(SECTOR_DEG)) as u8;

    match sector {
        0 => Rgb::new(CHANNEL_MAX, rising, 0),
        1 => Rgb::new(falling, CHANNEL_MAX, 0),
        2 => Rgb::new(0, CHANNEL_MAX, rising),
        3 => Rgb::new(0, falling, CHANNEL_MAX),
        4 => Rgb::new(rising, 0, CHANNEL_MAX),
        _ => Rgb::new(CHANNEL_MAX, 0, falling),
    }
}

/// One RGB LED on three PWM channels
pub struct RgbLed<R, G, B> {
    red: R,
    green: G,
    blue: B,
    /// If true, full brightness = 0% duty (common anode)
    inverted: bool,
    /// Last colour written
    color: Rgb,
}

impl<R, G, B> RgbLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    /// Create a new RGB LED, initially dark
    pub fn new(red: R, green: G, blue: B, inverted: bool) -> Self {
        let mut led = Self {
            red,
            green,
            blue,
            inverted,
            color: Rgb::default(),
        };
        led.set_color(Rgb::default());
        led
    }

    /// Write a colour to the three channels
    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
        let inverted = self.inverted;
        // PWM duty writes on the target are infallible
        let _ = write_channel(&mut self.red, color.r, inverted);
        let _ = write_channel(&mut self.green, color.g, inverted);
        let _ = write_channel(&mut self.blue, color.b, inverted);
    }

    /// Last colour written
    pub fn color(&self) -> Rgb {
        self.color
    }
}

fn write_channel<P: SetDutyCycle>(pwm: &mut P, level: u8, inverted: bool) -> Result<(), P::Error> {
    let level = if inverted { CHANNEL_MAX - level } else { level };
    pwm.set_duty_cycle_fraction(u16::from(level), u16::from(CHANNEL_MAX))
}

impl<R, G, B> BacklightDriver for RgbLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    fn set_hue(&mut self, hue: u16) {
        self.set_color(hue_to_rgb(hue));
    }
}
