//! Buzzer button and indicator light traits

/// A team's buzzer button
pub trait BuzzerButton {
    /// Check whether the button is held down right now
    ///
    /// Read failures report "not pressed".
    fn is_pressed(&mut self) -> bool;
}

/// A team's indicator light
pub trait IndicatorLight {
    /// Switch the light on or off
    fn set_lit(&mut self, lit: bool);

    /// Check whether the light was last switched on
    fn is_lit(&self) -> bool;
}
