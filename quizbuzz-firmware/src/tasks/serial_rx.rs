//! Console UART receive task
//!
//! Feeds every received byte into the shared line buffer. A completed
//! line wakes the console task.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use crate::game::GAME;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Serial RX task - reads judge input until the game ends
#[embassy_executor::task]
pub async fn serial_rx_task(mut rx: BufferedUartRx) {
    info!("Serial RX task started");

    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match select(rx.read(&mut buf), GAME.halted()).await {
            Either::First(Ok(n)) => {
                trace!("RX: {} bytes", n);
                GAME.receive(&buf[..n]);
            }
            Either::First(Err(e)) => {
                warn!("UART read error: {:?}", e);
            }
            Either::Second(()) => break,
        }
    }

    info!("Serial RX task stopped");
}
