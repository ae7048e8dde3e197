//! Hardware abstraction traits
//!
//! These traits define the interface between the round logic and the
//! collaborators it drives: buttons, indicator lights, the speaker and
//! the local display.

pub mod audio;
pub mod buzzer;
pub mod display;

pub use audio::{Sound, SoundPlayer};
pub use buzzer::{BuzzerButton, IndicatorLight};
pub use display::TextDisplay;
