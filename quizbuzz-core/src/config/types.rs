//! Configuration type definitions

use quizbuzz_protocol::DEFAULT_MAX_POINTS;

/// Score that ends the game, checked between rounds
pub const DEFAULT_WIN_THRESHOLD: u32 = 300;

/// Buzzer button poll period (ms)
pub const DEFAULT_BUZZER_POLL_MS: u32 = 100;

/// Display mirror refresh period (ms)
pub const DEFAULT_DISPLAY_REFRESH_MS: u32 = 500;

/// Judge console baud rate
pub const DEFAULT_CONSOLE_BAUD: u32 = 115_200;

/// Game settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GameConfig {
    /// A team at or above this score wins once the round ends
    pub win_threshold: u32,
    /// Largest award the judge may enter for one round
    pub max_points: u16,
    /// Buzzer poll period in milliseconds
    pub buzzer_poll_ms: u32,
    /// Display refresh period in milliseconds
    pub display_refresh_ms: u32,
    /// Console UART baud rate
    pub console_baud: u32,
}

impl GameConfig {
    /// Stock settings
    pub const DEFAULT: Self = Self {
        win_threshold: DEFAULT_WIN_THRESHOLD,
        max_points: DEFAULT_MAX_POINTS,
        buzzer_poll_ms: DEFAULT_BUZZER_POLL_MS,
        display_refresh_ms: DEFAULT_DISPLAY_REFRESH_MS,
        console_baud: DEFAULT_CONSOLE_BAUD,
    };

    /// Same settings with a different win threshold
    pub const fn with_win_threshold(mut self, win_threshold: u32) -> Self {
        self.win_threshold = win_threshold;
        self
    }

    /// Same settings with a different point ceiling
    pub const fn with_max_points(mut self, max_points: u16) -> Self {
        self.max_points = max_points;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
