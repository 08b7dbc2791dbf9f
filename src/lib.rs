//! Pomodoro Player - a terminal Pomodoro timer that drives your music
//!
//! This library provides the work/break state machine and the per-platform
//! media controllers that pause music during breaks, resume it for work and
//! play a chime at every phase change.

pub mod assets;
pub mod config;
pub mod services;
pub mod state;
pub mod tasks;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use assets::NotificationAsset;
pub use config::Config;
pub use services::{create_controller, MediaController, MediaError, Platform};
pub use state::{AppState, DisplayFrame, Phase, TimerState};
pub use tasks::{TickEvent, TickScheduler};
pub use ui::RenderSink;
pub use utils::signals::shutdown_signal;
