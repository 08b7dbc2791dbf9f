//! Background tasks module
//!
//! This module contains the tick scheduler that drives the countdown and the
//! event loop that feeds ticks, keys and signals into the state machine.

pub mod event_loop;
pub mod ticker;

// Re-export main types
pub use event_loop::{run, Exit};
pub use ticker::{TickEvent, TickHandle, TickScheduler, TICK_PERIOD};
