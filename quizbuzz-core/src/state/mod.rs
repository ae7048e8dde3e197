//! Round state machine
//!
//! Defines how a round progresses from the judge's `start` to the award.
//! The machine is explicit, finite, and deterministic; the shared session
//! applies its side effects.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::Phase;
