//! Shared round state
//!
//! Everything the concurrent tasks share lives in one [`Session`]. The
//! coordinator keeps it behind a single lock, so each method here runs as
//! one atomic step no matter how many fields it touches.

use alloc::string::String;

use quizbuzz_protocol::{Command, LineBuffer, Prompt, PromptText, Team};

use crate::config::GameConfig;
use crate::game::{GameState, RoundFlags};
use crate::state::{Event, Phase};

/// Outcome of a judge line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reply {
    /// The line moved the round forward
    Accepted,
    /// The line was wrong for this phase; tell the judge and ask again
    Rejected(Prompt),
    /// The line means nothing in this phase
    Ignored,
    /// Same line as the one just handled in this phase
    Duplicate,
}

/// Single-slot outbox for the judge's console
#[derive(Debug, Clone)]
pub struct PromptSlot {
    text: PromptText,
    pending: bool,
}

impl PromptSlot {
    /// Empty outbox
    pub const fn new() -> Self {
        Self {
            text: PromptText::new(),
            pending: false,
        }
    }

    /// Queue a prompt
    ///
    /// Refuses (returns `false`) while the previous prompt has not been
    /// transmitted; a pending prompt is never overwritten.
    pub fn post(&mut self, prompt: Prompt) -> bool {
        if self.pending {
            return false;
        }
        self.text = prompt.render();
        self.pending = true;
        true
    }

    /// Rendered prompt waiting for transmission
    pub fn pending(&self) -> Option<&PromptText> {
        self.pending.then_some(&self.text)
    }

    /// Check whether a prompt is waiting for transmission
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Mark the pending prompt as transmitted
    pub fn clear(&mut self) {
        self.pending = false;
    }
}

impl Default for PromptSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy of the state the local display shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    /// Rounds started so far (0 before the first)
    pub round_number: u32,
    /// Team A's total
    pub score_a: u32,
    /// Team B's total
    pub score_b: u32,
    /// Where the round currently stands
    pub phase: Phase,
    /// First team to buzz this round, if any
    pub buzzed_team: Option<Team>,
    /// Set once the game is over
    pub winner: Option<Team>,
}

/// The shared round state
#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    game: GameState,
    flags: RoundFlags,
    phase: Phase,
    console: LineBuffer,
    prompt: PromptSlot,
}

impl Session {
    /// Fresh game waiting for the first `start`
    pub const fn new(config: GameConfig) -> Self {
        Self {
            config,
            game: GameState::new(),
            flags: RoundFlags::new(),
            phase: Phase::AwaitingStart,
            console: LineBuffer::new(),
            prompt: PromptSlot::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn flags(&self) -> &RoundFlags {
        &self.flags
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn console(&self) -> &LineBuffer {
        &self.console
    }

    pub fn prompt(&self) -> &PromptSlot {
        &self.prompt
    }

    pub fn prompt_mut(&mut self) -> &mut PromptSlot {
        &mut self.prompt
    }

    /// Feed received serial bytes into the line buffer
    ///
    /// Returns `true` if at least one line completed.
    pub fn receive(&mut self, bytes: &[u8]) -> bool {
        self.console.feed_bytes(bytes) > 0
    }

    /// Take the completed console line, if any
    pub fn take_line(&mut self) -> Option<String> {
        self.console.take_line()
    }

    /// Apply an event to the phase, with its side effects
    ///
    /// Returns the phase after the event. Events that do not belong to the
    /// current phase change nothing.
    pub fn apply(&mut self, event: Event) -> Phase {
        let next = self.phase.transition(event);
        if next == self.phase {
            return next;
        }

        if event.is_round_boundary() {
            self.flags.reset();
        } else if event == Event::StartAccepted {
            self.game.round_number = self.game.round_number.saturating_add(1);
        }

        self.phase = next;
        next
    }

    /// Close the round in [`Phase::RoundComplete`]
    ///
    /// This is the only place the win threshold is checked, so a score that
    /// crosses it mid-round only ends the game here. Returns the winner if
    /// the game is over.
    pub fn finish_round(&mut self) -> Option<Team> {
        if self.phase != Phase::RoundComplete {
            return None;
        }

        let winner = self.game.winner(self.config.win_threshold);
        let event = if winner.is_some() {
            Event::ThresholdReached
        } else {
            Event::NextRound
        };
        self.apply(event);
        winner
    }

    /// Register a buzzer poll
    ///
    /// Accepts a press only while the buzzers are open and nobody has
    /// buzzed yet this round. Team A is checked first, so it wins when both
    /// buttons are down in the same poll.
    pub fn try_buzz(&mut self, a_pressed: bool, b_pressed: bool) -> Option<Team> {
        if !self.phase.buzzers_open() || self.flags.buzzer_hit {
            return None;
        }

        let team = if a_pressed {
            Team::A
        } else if b_pressed {
            Team::B
        } else {
            return None;
        };

        self.flags.buzzer_hit = true;
        self.flags.buzzed_team = Some(team);
        Some(team)
    }

    /// Interpret one judge line against the current phase
    pub fn interpret_line(&mut self, line: &str) -> Reply {
        let command = Command::parse_with_limit(line, self.config.max_points);
        self.interpret(command)
    }

    /// Interpret a classified judge command against the current phase
    pub fn interpret(&mut self, command: Command) -> Reply {
        match self.phase {
            Phase::AwaitingStart => match command {
                Command::Start if !self.flags.round_started => {
                    self.flags.round_started = true;
                    Reply::Accepted
                }
                _ => Reply::Ignored,
            },
            Phase::AwaitingTeamChoice if !self.flags.team_chosen => match command {
                Command::Team(team) => {
                    self.flags.winning_team = Some(team);
                    self.flags.team_chosen = true;
                    Reply::Accepted
                }
                _ => Reply::Rejected(Prompt::InvalidTeam),
            },
            Phase::AwaitingScore if !self.flags.points_awarded => {
                let Some(team) = self.flags.winning_team else {
                    return Reply::Ignored;
                };
                match command {
                    Command::Points(points) => {
                        self.game.award(team, points);
                        self.flags.points_awarded = true;
                        Reply::Accepted
                    }
                    Command::PointsTooBig => Reply::Rejected(Prompt::NumberTooBig { team }),
                    _ => Reply::Rejected(Prompt::InvalidInput { team }),
                }
            }
            _ => Reply::Ignored,
        }
    }

    /// Copy out what the display needs
    pub fn snapshot(&self) -> Snapshot {
        let winner = if self.phase.is_terminal() {
            self.game.winner(self.config.win_threshold)
        } else {
            None
        };

        Snapshot {
            round_number: self.game.round_number,
            score_a: self.game.score_a,
            score_b: self.game.score_b,
            phase: self.phase,
            buzzed_team: self.flags.buzzed_team,
            winner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn session() -> Session {
        Session::new(GameConfig::default())
    }

    /// Walk a session up to the phase where the judge enters points
    fn session_awaiting_score(team: Team) -> Session {
        let mut s = session();
        assert_eq!(s.interpret_line("start"), Reply::Accepted);
        s.apply(Event::StartAccepted);
        s.apply(Event::ShowdownFinished);
        assert_eq!(s.try_buzz(team == Team::A, team == Team::B), Some(team));
        s.apply(Event::BuzzerHit);
        assert_eq!(s.interpret(Command::Team(team)), Reply::Accepted);
        s.apply(Event::TeamChosen);
        assert_eq!(s.phase(), Phase::AwaitingScore);
        s
    }

    #[test]
    fn test_start_increments_round() {
        let mut s = session();
        assert_eq!(s.game().round_number, 0);

        assert_eq!(s.interpret_line("start"), Reply::Accepted);
        assert!(s.flags().round_started);

        assert_eq!(s.apply(Event::StartAccepted), Phase::RoundStarted);
        assert_eq!(s.game().round_number, 1);
    }

    #[test]
    fn test_start_only_once_per_round() {
        let mut s = session();
        assert_eq!(s.interpret_line("start"), Reply::Accepted);
        assert_eq!(s.interpret_line("start"), Reply::Ignored);

        s.apply(Event::StartAccepted);
        assert_eq!(s.interpret_line("start"), Reply::Ignored);
        assert_eq!(s.game().round_number, 1);
    }

    #[test]
    fn test_other_lines_ignored_before_start() {
        let mut s = session();
        for line in ["Start", "A", "50", "", "hello"] {
            assert_eq!(s.interpret_line(line), Reply::Ignored);
        }
        assert_eq!(s.flags(), &RoundFlags::new());
    }

    #[test]
    fn test_buzz_requires_open_window() {
        let mut s = session();
        assert_eq!(s.try_buzz(true, false), None);

        s.interpret_line("start");
        s.apply(Event::StartAccepted);
        // Showdown still playing
        assert_eq!(s.try_buzz(true, true), None);
        assert!(!s.flags().buzzer_hit);

        s.apply(Event::ShowdownFinished);
        assert_eq!(s.try_buzz(false, false), None);
        assert_eq!(s.try_buzz(false, true), Some(Team::B));
        assert!(s.flags().buzzer_hit);
    }

    #[test]
    fn test_same_tick_tie_goes_to_a() {
        let mut s = session();
        s.interpret_line("start");
        s.apply(Event::StartAccepted);
        s.apply(Event::ShowdownFinished);

        assert_eq!(s.try_buzz(true, true), Some(Team::A));
        assert_eq!(s.flags().buzzed_team, Some(Team::A));
    }

    #[test]
    fn test_second_press_never_changes_winner() {
        let mut s = session();
        s.interpret_line("start");
        s.apply(Event::StartAccepted);
        s.apply(Event::ShowdownFinished);

        assert_eq!(s.try_buzz(false, true), Some(Team::B));
        assert_eq!(s.try_buzz(true, false), None);
        assert_eq!(s.try_buzz(true, true), None);
        assert_eq!(s.flags().buzzed_team, Some(Team::B));
    }

    #[test]
    fn test_invalid_team_rejected() {
        let mut s = session();
        s.interpret_line("start");
        s.apply(Event::StartAccepted);
        s.apply(Event::ShowdownFinished);
        s.try_buzz(true, false);
        s.apply(Event::BuzzerHit);

        assert_eq!(s.interpret_line("c"), Reply::Rejected(Prompt::InvalidTeam));
        assert_eq!(s.interpret_line("50"), Reply::Rejected(Prompt::InvalidTeam));
        assert!(!s.flags().team_chosen);
        assert_eq!(s.phase(), Phase::AwaitingTeamChoice);

        assert_eq!(s.interpret_line("b"), Reply::Accepted);
        assert_eq!(s.flags().winning_team, Some(Team::B));
        assert_eq!(s.interpret_line("a"), Reply::Ignored);
        assert_eq!(s.flags().winning_team, Some(Team::B));
    }

    #[test]
    fn test_award_goes_to_chosen_team() {
        let mut s = session_awaiting_score(Team::A);

        assert_eq!(s.interpret_line("50"), Reply::Accepted);
        assert_eq!(s.game().score_a, 50);
        assert_eq!(s.game().score_b, 0);
        assert!(s.flags().points_awarded);

        // Only one award per round
        assert_eq!(s.interpret_line("50"), Reply::Ignored);
        assert_eq!(s.game().score_a, 50);
    }

    #[test]
    fn test_award_rejections() {
        let mut s = session_awaiting_score(Team::B);

        assert_eq!(
            s.interpret_line("1000"),
            Reply::Rejected(Prompt::NumberTooBig { team: Team::B })
        );
        assert_eq!(
            s.interpret_line("0"),
            Reply::Rejected(Prompt::InvalidInput { team: Team::B })
        );
        assert_eq!(
            s.interpret_line("ten"),
            Reply::Rejected(Prompt::InvalidInput { team: Team::B })
        );
        assert_eq!(s.game(), &GameState { round_number: 1, ..GameState::new() });
        assert!(!s.flags().points_awarded);
    }

    #[test]
    fn test_custom_point_ceiling() {
        let mut s = Session::new(GameConfig::DEFAULT.with_max_points(100));
        s.interpret_line("start");
        s.apply(Event::StartAccepted);
        s.apply(Event::ShowdownFinished);
        s.try_buzz(true, false);
        s.apply(Event::BuzzerHit);
        s.interpret_line("A");
        s.apply(Event::TeamChosen);

        assert_eq!(
            s.interpret_line("101"),
            Reply::Rejected(Prompt::NumberTooBig { team: Team::A })
        );
        assert_eq!(s.interpret_line("100"), Reply::Accepted);
    }

    #[test]
    fn test_finish_round_resets_flags() {
        let mut s = session_awaiting_score(Team::A);
        s.interpret_line("120");
        s.apply(Event::PointsAwarded);

        assert_eq!(s.finish_round(), None);
        assert_eq!(s.phase(), Phase::AwaitingStart);
        assert_eq!(s.flags(), &RoundFlags::new());
        assert_eq!(s.game().score_a, 120);
        assert_eq!(s.game().round_number, 1);
    }

    #[test]
    fn test_finish_round_only_when_complete() {
        let mut s = session_awaiting_score(Team::A);
        s.interpret_line("999");
        // Threshold crossed, but the round is not closed yet
        assert_eq!(s.finish_round(), None);
        assert_eq!(s.phase(), Phase::AwaitingScore);

        s.apply(Event::PointsAwarded);
        assert_eq!(s.finish_round(), Some(Team::A));
        assert_eq!(s.phase(), Phase::GameOver);
        assert_eq!(s.snapshot().winner, Some(Team::A));
    }

    #[test]
    fn test_prompt_slot_never_overwrites() {
        let mut slot = PromptSlot::new();
        assert!(slot.post(Prompt::WaitingForBuzzer));
        assert!(!slot.post(Prompt::InvalidTeam));
        assert_eq!(
            slot.pending().map(|text| text.as_str()),
            Some("Waiting for buzzer...\n")
        );

        slot.clear();
        assert!(!slot.is_pending());
        assert_eq!(slot.pending(), None);
        assert!(slot.post(Prompt::InvalidTeam));
    }

    #[test]
    fn test_receive_feeds_line_buffer() {
        let mut s = session();
        assert!(!s.receive(b"sta"));
        assert!(s.receive(b"rt\n"));
        assert_eq!(s.take_line().as_deref(), Some("start"));
        assert_eq!(s.take_line(), None);
    }

    proptest! {
        #[test]
        fn prop_valid_award_applied_once(points in 1u16..=999, team_b in any::<bool>()) {
            let (team, other) = if team_b { (Team::B, Team::A) } else { (Team::A, Team::B) };
            let mut s = session_awaiting_score(team);

            prop_assert_eq!(s.interpret_line(&points.to_string()), Reply::Accepted);
            prop_assert_eq!(s.game().score(team), u32::from(points));
            prop_assert_eq!(s.game().score(other), 0);

            prop_assert_eq!(s.interpret_line(&points.to_string()), Reply::Ignored);
            prop_assert_eq!(s.game().score(team), u32::from(points));
        }

        #[test]
        fn prop_invalid_award_leaves_scores(line in "[1-9][0-9]{3,11}|0|[a-z ]{1,8}") {
            let mut s = session_awaiting_score(Team::A);
            let reply = s.interpret_line(&line);
            let rejected = matches!(
                reply,
                Reply::Rejected(Prompt::InvalidInput { .. } | Prompt::NumberTooBig { .. })
            );
            prop_assert!(rejected);
            prop_assert_eq!(s.game().score_a, 0);
            prop_assert!(!s.flags().points_awarded);
        }

        #[test]
        fn prop_rounds_count_up_by_one(awards in proptest::collection::vec(1u16..=99, 1..20)) {
            let mut s = session();
            for (i, points) in awards.iter().enumerate() {
                prop_assert_eq!(s.interpret_line("start"), Reply::Accepted);
                s.apply(Event::StartAccepted);
                prop_assert_eq!(s.game().round_number, i as u32 + 1);
                s.apply(Event::ShowdownFinished);
                s.try_buzz(true, false);
                s.apply(Event::BuzzerHit);
                s.interpret_line("A");
                s.apply(Event::TeamChosen);
                s.interpret(Command::Points(*points));
                s.apply(Event::PointsAwarded);
                prop_assert_eq!(s.finish_round(), None);
            }
            prop_assert_eq!(s.game().round_number, awards.len() as u32);
        }
    }
}
