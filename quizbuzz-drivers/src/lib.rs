//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in quizbuzz-core:
//!
//! - Buzzer buttons and indicator lights over `embedded-hal` pins
//! - Tone speaker that renders clips as note sequences
//! - SH1106 OLED text display

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod display;
pub mod gpio;
pub mod speaker;
