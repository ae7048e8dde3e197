//! Phase definition
//!
//! Which judge input is meaningful, and which component the round is
//! waiting on, is a function of the current phase.

use super::events::Event;

/// Round phases, in the order a round visits them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Waiting for the judge to type `start`
    #[default]
    AwaitingStart,
    /// Round announced, showdown cue playing
    RoundStarted,
    /// Buzzers live, waiting for the first press
    AwaitingBuzz,
    /// Waiting for the judge to name the team that answered
    AwaitingTeamChoice,
    /// Waiting for the judge to enter the award
    AwaitingScore,
    /// Award booked, checking for a winner
    RoundComplete,
    /// A team reached the threshold; nothing runs any more
    GameOver,
}

impl Phase {
    /// Check if the buzzers are armed
    pub fn buzzers_open(&self) -> bool {
        matches!(self, Phase::AwaitingBuzz)
    }

    /// Check if this is the terminal phase
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::GameOver)
    }

    /// Short label for the local display
    pub fn label(&self) -> &'static str {
        match self {
            Phase::AwaitingStart => "Waiting for judge",
            Phase::RoundStarted => "Showdown!",
            Phase::AwaitingBuzz => "Buzzers open",
            Phase::AwaitingTeamChoice => "Judging answer",
            Phase::AwaitingScore => "Scoring",
            Phase::RoundComplete => "Round over",
            Phase::GameOver => "Game over",
        }
    }

    /// Process an event and return the next phase
    ///
    /// Phases advance strictly in order; an event that does not belong to
    /// the current phase leaves it unchanged.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use Phase::*;

        match (self, event) {
            (AwaitingStart, StartAccepted) => RoundStarted,
            (RoundStarted, ShowdownFinished) => AwaitingBuzz,
            (AwaitingBuzz, BuzzerHit) => AwaitingTeamChoice,
            (AwaitingTeamChoice, TeamChosen) => AwaitingScore,
            (AwaitingScore, PointsAwarded) => RoundComplete,
            (RoundComplete, NextRound) => AwaitingStart,
            (RoundComplete, ThresholdReached) => GameOver,

            // Default: stay in current phase
            _ => self,
        }
    }
}
