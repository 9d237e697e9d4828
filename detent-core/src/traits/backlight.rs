//! RGB backlight trait

/// Trait for the hue-driven backlight
pub trait BacklightDriver {
    /// Show a fully saturated colour at `hue` degrees (0-359)
    fn set_hue(&mut self, hue: u16);
}

/// Two backlights mirroring the same hue
impl<A: BacklightDriver, B: BacklightDriver> BacklightDriver for (A, B) {
    fn set_hue(&mut self, hue: u16) {
        self.0.set_hue(hue);
        self.1.set_hue(hue);
    }
}
