//! Quizbuzz - Two-Team Quiz Buzzer Firmware
//!
//! Main firmware binary for RP2040-based buzzer controllers. Two teams race
//! on their buttons, a judge drives the rounds from a phone over a
//! Bluetooth serial module, and an OLED mirrors the scoreboard.

#![no_std]
#![no_main]

extern crate alloc;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C0, UART0};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::Delay;
use embedded_alloc::LlffHeap as Heap;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use quizbuzz_core::arbiter::BuzzerArbiter;
use quizbuzz_drivers::display::Sh1106;
use quizbuzz_drivers::gpio::{GpioButton, GpioIndicator};
use quizbuzz_drivers::speaker::ToneSpeaker;

use crate::audio::{PwmTone, SharedSpeaker, Speaker};
use crate::config::GAME_CONFIG;
use crate::game::GAME;

// Heap allocator for console lines
#[global_allocator]
static HEAP: Heap = Heap::empty();

// Heap size: 16KB
const HEAP_SIZE: usize = 16 * 1024;

mod audio;
mod config;
mod game;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

// Speaker shared by the round driver and the buzzer task
static SPEAKER: StaticCell<Mutex<CriticalSectionRawMutex, Speaker>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Quizbuzz firmware starting...");

    init_heap();

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = GAME_CONFIG;
    info!(
        "Game config: first to {} points, max {} per round",
        config.win_threshold, config.max_points
    );

    // Judge console: Bluetooth serial module on UART0 (GPIO0 TX, GPIO1 RX)
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config.console_baud;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized at {} baud", config.console_baud);

    // Scoreboard OLED on I2C0 (GPIO4 SDA, GPIO5 SCL)
    let i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c::Config::default());
    let display = Sh1106::new(i2c);

    // Speaker on GPIO26 (PWM slice 5, channel A)
    let pwm = Pwm::new_output_a(p.PWM_SLICE5, p.PIN_26, PwmConfig::default());
    let speaker = SPEAKER.init(Mutex::new(ToneSpeaker::new(PwmTone::new(pwm), Delay)));
    let speaker = SharedSpeaker::new(speaker);

    // Buzzer buttons to ground (GPIO14 team A, GPIO15 team B),
    // indicator LEDs driven high (GPIO16 team A, GPIO17 team B)
    let arbiter = BuzzerArbiter::new(
        GpioButton::new_active_low(Input::new(p.PIN_14, Pull::Up)),
        GpioButton::new_active_low(Input::new(p.PIN_15, Pull::Up)),
        GpioIndicator::new_active_high(Output::new(p.PIN_16, Level::Low)),
        GpioIndicator::new_active_high(Output::new(p.PIN_17, Level::Low)),
    );

    info!("Buttons, lights and speaker initialized");

    // Spawn tasks
    spawner.spawn(tasks::serial_rx_task(rx)).unwrap();
    spawner.spawn(tasks::console_task(tx)).unwrap();
    spawner
        .spawn(tasks::buzzer_task(arbiter, speaker, config.buzzer_poll_ms))
        .unwrap();
    spawner
        .spawn(tasks::display_task(display, config.display_refresh_ms))
        .unwrap();
    spawner.spawn(tasks::rounds_task(speaker)).unwrap();

    info!("All tasks spawned, game running");

    GAME.halted().await;
    info!("Game over, controller idle");
}

/// Initialize the heap allocator
fn init_heap() {
    use core::mem::MaybeUninit;
    static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
    #[allow(static_mut_refs)]
    unsafe {
        HEAP.init(HEAP_MEM.as_ptr() as usize, HEAP_SIZE)
    }
}
