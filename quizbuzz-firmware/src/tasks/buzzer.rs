//! Buzzer polling task
//!
//! Polls both buttons on a fixed ticker. The first accepted press lights
//! its team's indicator and sounds the buzzer before polling resumes.

use defmt::*;
use embassy_rp::gpio::{Input, Output};
use embassy_time::{Duration, Ticker};
use quizbuzz_core::arbiter::BuzzerArbiter;
use quizbuzz_drivers::gpio::{GpioButton, GpioIndicator};

use crate::audio::SharedSpeaker;
use crate::game::GAME;

/// Buttons and lights as wired on the board
pub type Arbiter = BuzzerArbiter<
    GpioButton<Input<'static>>,
    GpioButton<Input<'static>>,
    GpioIndicator<Output<'static>>,
    GpioIndicator<Output<'static>>,
>;

/// Buzzer task - arbitrates the first press of each round
#[embassy_executor::task]
pub async fn buzzer_task(mut arbiter: Arbiter, mut speaker: SharedSpeaker, poll_ms: u32) {
    info!("Buzzer task started ({} ms poll)", poll_ms);

    let mut ticker = Ticker::every(Duration::from_millis(u64::from(poll_ms)));

    while !GAME.is_shutdown() {
        if let Some(team) = arbiter.poll_and_sound(&GAME, &mut speaker).await {
            info!("{} buzzed first", team);
        }
        ticker.next().await;
    }

    info!("Buzzer task stopped");
}
