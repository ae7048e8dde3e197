//! Scoreboard display task
//!
//! Mirrors the round state to the OLED on a fixed cadence. The last frame
//! is drawn after shutdown so the winner stays on screen.

use defmt::*;
use embassy_futures::select::select;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Ticker};
use quizbuzz_core::mirror;
use quizbuzz_core::traits::TextDisplay;
use quizbuzz_drivers::display::Sh1106;

use crate::game::GAME;

/// The board's OLED
pub type Oled = Sh1106<I2c<'static, I2C0, Async>>;

/// Display task - renders the scoreboard until the game ends
#[embassy_executor::task]
pub async fn display_task(mut display: Oled, refresh_ms: u32) {
    info!("Display task started");

    if let Err(e) = display.init().await {
        error!("Failed to initialize display: {:?}", e);
    } else {
        info!("OLED initialized");
    }
    display.clear();

    let mut ticker = Ticker::every(Duration::from_millis(u64::from(refresh_ms)));

    loop {
        // Read before rendering, so a frame drawn after shutdown is the last
        let finished = GAME.is_shutdown();
        let snapshot = GAME.snapshot();

        // Rendering only fills the frame buffer
        let _ = mirror::render(&snapshot, &mut display);
        if let Err(e) = display.flush().await {
            warn!("Display flush failed: {:?}", e);
        }
        trace!("Display updated");

        if finished {
            break;
        }
        select(ticker.next(), GAME.halted()).await;
    }

    info!("Display task stopped");
}
