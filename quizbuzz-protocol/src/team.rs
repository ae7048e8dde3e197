//! The two competing teams

use core::fmt;

/// One of the two buzzer teams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Team {
    A,
    B,
}

impl Team {
    /// Parse a console team token
    ///
    /// Only the single characters `A`, `a`, `B` and `b` are accepted.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "A" | "a" => Some(Team::A),
            "B" | "b" => Some(Team::B),
            _ => None,
        }
    }

    /// Upper-case letter used in prompts and on the display
    pub fn letter(self) -> char {
        match self {
            Team::A => 'A',
            Team::B => 'B',
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Team {}", self.letter())
    }
}
