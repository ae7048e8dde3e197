//! Game settings
//!
//! game.toml is validated by build.rs and baked in as [`GAME_CONFIG`].
//! Edit game.toml and rebuild to change the rules.

use quizbuzz_core::config::GameConfig;

include!(concat!(env!("OUT_DIR"), "/game_config.rs"));
