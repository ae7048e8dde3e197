//! Round driver task

use defmt::*;
use quizbuzz_core::rounds::RoundDriver;

use crate::audio::SharedSpeaker;
use crate::game::GAME;

/// Round task - runs the game from round 1 to the winner
#[embassy_executor::task]
pub async fn rounds_task(speaker: SharedSpeaker) {
    info!("Round driver started");

    let mut driver = RoundDriver::new(speaker);
    match driver.run(&GAME).await {
        Ok(team) => {
            let snapshot = GAME.snapshot();
            info!(
                "Game over after {} rounds: {} wins ({} - {})",
                snapshot.round_number, team, snapshot.score_a, snapshot.score_b
            );
        }
        Err(_) => warn!("Game halted before a winner"),
    }
}
