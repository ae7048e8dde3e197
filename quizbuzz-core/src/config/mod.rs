//! Configuration types
//!
//! Board-agnostic game settings. The firmware fills these in from its
//! build-time `game.toml`.

pub mod types;

pub use types::*;
