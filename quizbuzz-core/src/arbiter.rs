//! Buzzer arbiter
//!
//! Polled at a fixed cadence. Reads both buttons, lets the session decide
//! whether a press wins the round, and keeps the indicator lights in line
//! with the recorded winner: exactly the buzzed team's light is on, and
//! both are off between rounds.

use embassy_sync::blocking_mutex::raw::RawMutex;
use quizbuzz_protocol::Team;

use crate::coordinator::Coordinator;
use crate::traits::{BuzzerButton, IndicatorLight, Sound, SoundPlayer};

/// Two buttons and their lights
pub struct BuzzerArbiter<BA, BB, LA, LB> {
    button_a: BA,
    button_b: BB,
    light_a: LA,
    light_b: LB,
}

impl<BA, BB, LA, LB> BuzzerArbiter<BA, BB, LA, LB>
where
    BA: BuzzerButton,
    BB: BuzzerButton,
    LA: IndicatorLight,
    LB: IndicatorLight,
{
    /// Create an arbiter with both lights off
    pub fn new(button_a: BA, button_b: BB, mut light_a: LA, mut light_b: LB) -> Self {
        light_a.set_lit(false);
        light_b.set_lit(false);
        Self {
            button_a,
            button_b,
            light_a,
            light_b,
        }
    }

    /// One polling tick
    ///
    /// Returns the team whose press was accepted on this tick, if any.
    pub fn poll<M: RawMutex>(&mut self, coord: &Coordinator<M>) -> Option<Team> {
        let a_pressed = self.button_a.is_pressed();
        let b_pressed = self.button_b.is_pressed();

        let accepted = coord.try_buzz(a_pressed, b_pressed);
        self.show(coord.buzzed_team());
        accepted
    }

    /// One polling tick, sounding the buzzer for an accepted press
    ///
    /// The buzzer clip plays to completion before this returns, so no
    /// further polls happen while it sounds.
    pub async fn poll_and_sound<M, P>(&mut self, coord: &Coordinator<M>, player: &mut P) -> Option<Team>
    where
        M: RawMutex,
        P: SoundPlayer,
    {
        let accepted = self.poll(coord);
        if accepted.is_some() {
            player.play(Sound::Buzzer).await;
        }
        accepted
    }

    /// Light exactly the given team's indicator
    pub fn show(&mut self, team: Option<Team>) {
        self.light_a.set_lit(team == Some(Team::A));
        self.light_b.set_lit(team == Some(Team::B));
    }

    /// Check one team's indicator
    pub fn is_lit(&self, team: Team) -> bool {
        match team {
            Team::A => self.light_a.is_lit(),
            Team::B => self.light_b.is_lit(),
        }
    }
}
