//! Board-agnostic core logic for the quiz buzzer controller
//!
//! This crate contains all game logic that does not depend on specific
//! hardware:
//!
//! - Hardware abstraction traits (buttons, lights, speaker, text display)
//! - Round phase machine and the shared session it drives
//! - Coordinator: the lock and wakeups the concurrent tasks share
//! - Buzzer arbiter, console handler, round driver and display mirror
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod arbiter;
pub mod config;
pub mod console;
pub mod coordinator;
pub mod game;
pub mod mirror;
pub mod rounds;
pub mod session;
pub mod state;
pub mod traits;

pub use coordinator::{Coordinator, Halted};
pub use session::{Reply, Session, Snapshot};
