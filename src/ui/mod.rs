//! Terminal user interface
//!
//! The state machine only knows the `RenderSink` trait; the ratatui renderer
//! and the key bindings live here.

pub mod input;
pub mod terminal;

use crate::state::DisplayFrame;

pub use input::{map_key, Command};
pub use terminal::TerminalRenderer;

/// Receives the display after every state change and redraws
pub trait RenderSink {
    fn render(&mut self, frame: &DisplayFrame);
}
