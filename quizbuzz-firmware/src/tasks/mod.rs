//! Embassy async tasks
//!
//! Each task runs independently and talks to the others only through the
//! shared game coordinator.

pub mod buzzer;
pub mod console;
pub mod display;
pub mod rounds;
pub mod serial_rx;

pub use buzzer::{buzzer_task, Arbiter};
pub use console::console_task;
pub use display::{display_task, Oled};
pub use rounds::rounds_task;
pub use serial_rx::serial_rx_task;
