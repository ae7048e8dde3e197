//! The shared game
//!
//! One coordinator for the whole firmware. Every task reaches the round
//! state through it; the critical-section mutex makes it safe to share
//! between the executor and interrupt-driven peripherals.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use quizbuzz_core::Coordinator;

use crate::config::GAME_CONFIG;

/// Round state, prompt slot and wakeups shared by all tasks
pub static GAME: Coordinator<CriticalSectionRawMutex> = Coordinator::new(GAME_CONFIG);
