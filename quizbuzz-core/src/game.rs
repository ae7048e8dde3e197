//! Scores and per-round flags

use quizbuzz_protocol::Team;

/// Running totals for the whole game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GameState {
    /// Rounds started so far (the current round, once one is running)
    pub round_number: u32,
    /// Team A cumulative score
    pub score_a: u32,
    /// Team B cumulative score
    pub score_b: u32,
}

impl GameState {
    /// Fresh game: round 0, no points
    pub const fn new() -> Self {
        Self {
            round_number: 0,
            score_a: 0,
            score_b: 0,
        }
    }

    /// Score of one team
    pub fn score(&self, team: Team) -> u32 {
        match team {
            Team::A => self.score_a,
            Team::B => self.score_b,
        }
    }

    /// Add an award to a team's score
    ///
    /// Scores only ever grow; an award that would overflow saturates.
    pub fn award(&mut self, team: Team, points: u16) {
        let score = match team {
            Team::A => &mut self.score_a,
            Team::B => &mut self.score_b,
        };
        *score = score.saturating_add(u32::from(points));
    }

    /// Team that has reached the threshold, if any
    ///
    /// Only one team can score per round and the check runs between rounds,
    /// so at most one team crosses at a time. Should both be at or above the
    /// threshold anyway, the higher score wins and team A takes a tie.
    pub fn winner(&self, threshold: u32) -> Option<Team> {
        if self.score_a.max(self.score_b) < threshold {
            return None;
        }
        if self.score_b > self.score_a {
            Some(Team::B)
        } else {
            Some(Team::A)
        }
    }
}

/// Progress markers for the round in flight
///
/// Each flag only goes from false to true within a round; [`reset`]
/// clears them all at the round boundary.
///
/// [`reset`]: RoundFlags::reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RoundFlags {
    /// Judge sent `start`
    pub round_started: bool,
    /// A buzzer press was accepted
    pub buzzer_hit: bool,
    /// Judge picked the team that answered
    pub team_chosen: bool,
    /// Judge entered a valid award
    pub points_awarded: bool,
    /// Team the judge credited for this round
    pub winning_team: Option<Team>,
    /// Team whose buzzer fired first
    pub buzzed_team: Option<Team>,
}

impl RoundFlags {
    /// Initial pattern: nothing has happened yet
    pub const fn new() -> Self {
        Self {
            round_started: false,
            buzzer_hit: false,
            team_chosen: false,
            points_awarded: false,
            winning_team: None,
            buzzed_team: None,
        }
    }

    /// Return to the initial pattern
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
