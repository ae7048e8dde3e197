//! GPIO buzzer buttons and indicator lights
//!
//! Both adapters work on any `embedded-hal` digital pin and take the
//! electrical polarity at construction, so the game logic only ever deals
//! in "pressed" and "lit".

use embedded_hal::digital::{InputPin, OutputPin};
use quizbuzz_core::traits::{BuzzerButton, IndicatorLight};

/// Buzzer button on an input pin
pub struct GpioButton<P> {
    pin: P,
    /// If true, pressed = pin LOW (button to ground with pull-up)
    active_low: bool,
}

impl<P: InputPin> GpioButton<P> {
    /// Create a new button
    ///
    /// # Arguments
    /// - `pin`: The input pin the button is wired to
    /// - `active_low`: If true, the button reads as pressed when the pin is LOW
    pub fn new(pin: P, active_low: bool) -> Self {
        Self { pin, active_low }
    }

    /// Button that pulls the pin high when pressed
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Button that pulls the pin to ground when pressed
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }
}

impl<P: InputPin> BuzzerButton for GpioButton<P> {
    fn is_pressed(&mut self) -> bool {
        match self.pin.is_high() {
            Ok(high) => high != self.active_low,
            Err(_) => false,
        }
    }
}

/// Indicator light on an output pin
pub struct GpioIndicator<P> {
    pin: P,
    /// If true, light ON = pin LOW (LED sinking into the pin)
    inverted: bool,
    /// Current logical state
    lit: bool,
}

impl<P: OutputPin> GpioIndicator<P> {
    /// Create a new indicator, switched off
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut light = Self {
            pin,
            inverted,
            lit: false,
        };
        light.set_lit(false);
        light
    }

    /// Indicator lit by driving the pin high
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Indicator lit by driving the pin low
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }
}

impl<P: OutputPin> IndicatorLight for GpioIndicator<P> {
    fn set_lit(&mut self, lit: bool) {
        self.lit = lit;

        // Write errors leave the LED as it was; the next poll retries
        let _ = if lit != self.inverted {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
    }

    fn is_lit(&self) -> bool {
        self.lit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::{Error, ErrorKind, ErrorType};

    /// Mock GPIO pin for testing
    struct MockPin {
        high: bool,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl InputPin for MockPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.high)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.high)
        }
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }
    }

    #[derive(Debug)]
    struct Fault;

    impl Error for Fault {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    /// Pin whose reads always fail
    struct BrokenPin;

    impl ErrorType for BrokenPin {
        type Error = Fault;
    }

    impl InputPin for BrokenPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Err(Fault)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Err(Fault)
        }
    }

    #[test]
    fn test_active_low_button() {
        let mut button = GpioButton::new_active_low(MockPin { high: true });
        assert!(!button.is_pressed());

        button.pin.high = false;
        assert!(button.is_pressed());
    }

    #[test]
    fn test_active_high_button() {
        let mut button = GpioButton::new_active_high(MockPin { high: false });
        assert!(!button.is_pressed());

        button.pin.high = true;
        assert!(button.is_pressed());
    }

    #[test]
    fn test_read_failure_is_not_pressed() {
        let mut button = GpioButton::new_active_low(BrokenPin);
        assert!(!button.is_pressed());

        let mut button = GpioButton::new_active_high(BrokenPin);
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_active_high_indicator() {
        let mut light = GpioIndicator::new_active_high(MockPin { high: true });

        // Starts off
        assert!(!light.is_lit());
        assert!(!light.pin.high);

        light.set_lit(true);
        assert!(light.is_lit());
        assert!(light.pin.high);
    }

    #[test]
    fn test_active_low_indicator() {
        let mut light = GpioIndicator::new_active_low(MockPin { high: false });

        // Off means the pin idles high
        assert!(!light.is_lit());
        assert!(light.pin.high);

        light.set_lit(true);
        assert!(light.is_lit());
        assert!(!light.pin.high);

        light.set_lit(false);
        assert!(light.pin.high);
    }
}
