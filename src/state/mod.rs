//! State management module
//!
//! This module contains the countdown data and the state machine that drives
//! media and rendering around it.

pub mod app_state;
pub mod phase;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, SHUTDOWN_GRACE};
pub use phase::{Phase, BREAK_SECONDS, WORK_SECONDS};
pub use timer_state::{format_clock, DisplayFrame, TimerState};
