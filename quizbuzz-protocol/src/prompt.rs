//! Messages sent to the judge's console
//!
//! Every prompt renders to a bounded string ending in a newline, so the
//! transmit side can push it out byte by byte without framing.

use core::fmt::Write;

use heapless::String;

use crate::team::Team;

/// Maximum rendered prompt length in bytes
pub const MAX_PROMPT_LEN: usize = 96;

/// Rendered prompt text
pub type PromptText = String<MAX_PROMPT_LEN>;

/// Text of the rejection for an unknown team token
pub const INVALID_TEAM: &str = "Invalid team name!";

/// Text of the rejection for a zero or non-numeric award
pub const INVALID_INPUT: &str = "Invalid input!";

/// Text of the rejection for an award above the ceiling
pub const NUMBER_TOO_BIG: &str = "Number is too big!";

/// A message for the judge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Prompt {
    /// Invitation to start the given round
    AwaitingStart { round: u32 },
    /// The given round has started
    RoundStarted { round: u32 },
    /// Showdown is over, buzzers are live
    WaitingForBuzzer,
    /// A team buzzed in, ask who answered correctly
    WhichTeam { buzzed: Team },
    /// Ask for the award of the chosen team
    HowManyPoints { team: Team },
    /// Team token rejected, ask again
    InvalidTeam,
    /// Zero or non-numeric award rejected, ask again
    InvalidInput { team: Team },
    /// Award above the ceiling rejected, ask again
    NumberTooBig { team: Team },
    /// Scoreboard after a round
    Scores { score_a: u32, score_b: u32 },
    /// Final message
    Winner { team: Team },
}

impl Prompt {
    /// Render the prompt text, newline included
    pub fn render(&self) -> PromptText {
        let mut text = PromptText::new();
        // Capacity covers the longest prompt with u32::MAX scores
        let _ = self.write_to(&mut text);
        text
    }

    fn write_to(&self, out: &mut PromptText) -> core::fmt::Result {
        match *self {
            Prompt::AwaitingStart { round } => {
                writeln!(out, "Type start to begin round {}", round)
            }
            Prompt::RoundStarted { round } => writeln!(out, "Round {} started!", round),
            Prompt::WaitingForBuzzer => writeln!(out, "Waiting for buzzer..."),
            Prompt::WhichTeam { buzzed } => {
                writeln!(out, "{} buzzed! Which team won? (A/B)", buzzed)
            }
            Prompt::HowManyPoints { team } => writeln!(out, "How many points for {}?", team),
            Prompt::InvalidTeam => {
                writeln!(out, "{}", INVALID_TEAM)?;
                writeln!(out, "Which team won? (A/B)")
            }
            Prompt::InvalidInput { team } => {
                writeln!(out, "{}", INVALID_INPUT)?;
                writeln!(out, "How many points for {}?", team)
            }
            Prompt::NumberTooBig { team } => {
                writeln!(out, "{}", NUMBER_TOO_BIG)?;
                writeln!(out, "How many points for {}?", team)
            }
            Prompt::Scores { score_a, score_b } => {
                writeln!(out, "Score: Team A {} - Team B {}", score_a, score_b)
            }
            Prompt::Winner { team } => writeln!(out, "Winner: {}", team),
        }
    }
}
