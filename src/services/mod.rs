//! External command services
//!
//! This module contains the media controllers for each platform, the command
//! runner they share and the startup dependency checks.

pub mod command;
pub mod linux;
pub mod macos;
pub mod media;
pub mod preflight;
pub mod windows;

// Re-export main types
pub use command::{run_chain, CommandRunner, CommandSpec, SystemRunner};
pub use linux::LinuxController;
pub use macos::MacosController;
pub use media::{create_controller, MediaController, MediaError, Platform};
pub use preflight::{validate_dependencies, PreflightError, PreflightReport};
pub use windows::WindowsController;
