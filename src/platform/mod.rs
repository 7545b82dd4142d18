//! Platform layer
//!
//! Terminal-facing pieces kept out of the simulation:
//! - Keyboard event reading
//! - Held-key tracking and translation into `TickInput`

pub mod event;
pub mod input;

pub use event::{Event, EventHandler};
pub use input::{Action, KeyTracker, action_for};
