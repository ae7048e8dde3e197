//! Round driver
//!
//! Walks the phase machine through each round: announces it, plays the
//! showdown cue, then waits for the buzzer and for each judge decision in
//! turn. Every wait is a predicate on the session re-checked after each
//! driver wakeup. The game ends once a team reaches the win threshold at a
//! round boundary.

use embassy_sync::blocking_mutex::raw::RawMutex;
use quizbuzz_protocol::{Prompt, Team};

use crate::coordinator::{Coordinator, Halted};
use crate::state::Event;
use crate::traits::{Sound, SoundPlayer};

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RoundOutcome {
    /// No winner yet, play another round
    Continue,
    /// A team reached the threshold
    GameOver(Team),
}

/// Drives rounds until the game ends
pub struct RoundDriver<P> {
    player: P,
}

impl<P: SoundPlayer> RoundDriver<P> {
    pub fn new(player: P) -> Self {
        Self { player }
    }

    /// Play rounds until a team wins
    ///
    /// Announces the winner, waits until the announcement has left the
    /// console and then shuts the game down. Returns `Err(Halted)` if
    /// something else shut the game down first.
    pub async fn run<M: RawMutex>(&mut self, coord: &Coordinator<M>) -> Result<Team, Halted> {
        loop {
            if let RoundOutcome::GameOver(team) = self.play_round(coord).await? {
                coord.issue(Prompt::Winner { team }).await?;
                let sent = coord.wait_until(|s| !s.prompt().is_pending()).await;
                coord.shut_down();
                sent?;
                return Ok(team);
            }
        }
    }

    /// Play one round, from the start invitation to the round boundary
    pub async fn play_round<M: RawMutex>(
        &mut self,
        coord: &Coordinator<M>,
    ) -> Result<RoundOutcome, Halted> {
        let next_round = coord.with(|s| s.game().round_number.saturating_add(1));
        coord.issue(Prompt::AwaitingStart { round: next_round }).await?;
        coord.wait_until(|s| s.flags().round_started).await?;

        let round = coord.with(|s| {
            s.apply(Event::StartAccepted);
            s.game().round_number
        });
        coord.issue(Prompt::RoundStarted { round }).await?;

        self.player.play(Sound::Showdown).await;
        coord.with(|s| s.apply(Event::ShowdownFinished));
        coord.issue(Prompt::WaitingForBuzzer).await?;

        coord.wait_until(|s| s.flags().buzzer_hit).await?;
        let buzzed = coord.with(|s| {
            s.apply(Event::BuzzerHit);
            s.flags().buzzed_team
        });
        if let Some(buzzed) = buzzed {
            coord.issue(Prompt::WhichTeam { buzzed }).await?;
        }

        coord.wait_until(|s| s.flags().team_chosen).await?;
        let chosen = coord.with(|s| {
            s.apply(Event::TeamChosen);
            s.flags().winning_team
        });
        if let Some(team) = chosen {
            coord.issue(Prompt::HowManyPoints { team }).await?;
        }

        coord.wait_until(|s| s.flags().points_awarded).await?;
        let (score_a, score_b) = coord.with(|s| {
            s.apply(Event::PointsAwarded);
            (s.game().score_a, s.game().score_b)
        });
        coord.issue(Prompt::Scores { score_a, score_b }).await?;

        Ok(match coord.with(|s| s.finish_round()) {
            Some(team) => RoundOutcome::GameOver(team),
            None => RoundOutcome::Continue,
        })
    }
}
