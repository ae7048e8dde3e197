//! Judge console task
//!
//! Sends prompts and interprets judge lines. Serial write failures are
//! logged; the console keeps serving.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use quizbuzz_core::console::ConsoleHandler;

use crate::game::GAME;

/// Console task - speaks the judge protocol until the game ends
#[embassy_executor::task]
pub async fn console_task(mut tx: BufferedUartTx) {
    info!("Console task started");

    let mut console = ConsoleHandler::new();

    loop {
        match console.run(&GAME, &mut tx).await {
            Ok(()) => break,
            Err(e) => warn!("Console write error: {:?}", e),
        }
    }

    info!("Console task stopped");
}
