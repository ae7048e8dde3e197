//! Judge Console Protocol
//!
//! This crate defines the text protocol spoken between the buzzer controller
//! and the judge's remote console (a Bluetooth UART terminal in practice).
//!
//! # Protocol Overview
//!
//! The link is plain, line-oriented text with no framing or checksums:
//! ```text
//! judge → controller:   start\n      A\n      50\n
//! controller → judge:   Round 1 started!\n   Which team won? (A/B)\n
//! ```
//!
//! - [`LineBuffer`] turns the inbound byte stream into complete lines.
//! - [`Command`] tokenizes a line without knowing which round phase will
//!   interpret it.
//! - [`Prompt`] renders every message the controller sends to the judge.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod command;
pub mod line;
pub mod prompt;
pub mod team;

pub use command::{Command, DEFAULT_MAX_POINTS};
pub use line::{LineBuffer, LINE_TERMINATOR};
pub use prompt::{Prompt, PromptText, MAX_PROMPT_LEN};
pub use team::Team;
