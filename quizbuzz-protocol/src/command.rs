//! Judge command tokenizer
//!
//! A console line is classified once, independent of the round phase.
//! The round logic then decides whether the command means anything in
//! the phase it arrives in.

use crate::team::Team;

/// Token that requests a new round
pub const START_TOKEN: &str = "start";

/// Largest point award accepted from the judge
pub const DEFAULT_MAX_POINTS: u16 = 999;

/// A classified console line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Exactly `start`
    Start,
    /// A single-letter team token
    Team(Team),
    /// A point award in `1..=max_points`
    Points(u16),
    /// An all-digit value above `max_points`
    PointsTooBig,
    /// Anything else, including a zero award
    Unrecognized,
}

impl Command {
    /// Classify a line using [`DEFAULT_MAX_POINTS`]
    pub fn parse(line: &str) -> Self {
        Self::parse_with_limit(line, DEFAULT_MAX_POINTS)
    }

    /// Classify a line with an explicit point ceiling
    ///
    /// Matching is exact and case-sensitive for `start`. A zero award cannot
    /// be told apart from unparsable input and is reported as
    /// [`Command::Unrecognized`].
    pub fn parse_with_limit(line: &str, max_points: u16) -> Self {
        if line == START_TOKEN {
            return Command::Start;
        }

        if let Some(team) = Team::from_token(line) {
            return Command::Team(team);
        }

        match parse_points(line) {
            Some(Points::Value(0)) | None => Command::Unrecognized,
            Some(Points::Value(n)) if n <= u32::from(max_points) => Command::Points(n as u16),
            Some(_) => Command::PointsTooBig,
        }
    }
}

enum Points {
    Value(u32),
    Overflow,
}

/// Parse a plain run of ASCII digits
///
/// Signs, whitespace and empty input are rejected. Digit strings too long
/// for `u32` are still numbers, just huge ones.
fn parse_points(line: &str) -> Option<Points> {
    if line.is_empty() || !line.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut value: u32 = 0;
    for digit in line.bytes().map(|b| u32::from(b - b'0')) {
        value = match value.checked_mul(10).and_then(|v| v.checked_add(digit)) {
            Some(v) => v,
            None => return Some(Points::Overflow),
        };
    }
    Some(Points::Value(value))
}
