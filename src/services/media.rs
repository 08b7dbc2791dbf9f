//! Media controller interface and platform selection

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::command::{run_chain, CommandRunner, CommandSpec};
use super::linux::PLAYERCTL;
use super::{LinuxController, MacosController, PreflightReport, WindowsController};

/// Failure of a best-effort media command
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("failed to execute {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} failed ({status}): {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("{command} did not finish within {after:?}")]
    TimedOut {
        command: String,
        after: Duration,
    },

    #[error("{0} is not available")]
    Unavailable(String),

    #[error("all {attempts} fallback commands failed")]
    Exhausted { attempts: usize },
}

/// Capability set for controlling the user's music and playing the chime.
///
/// Every operation is a single best-effort attempt with the variant's own
/// fallback chain. Callers treat the result as advisory.
#[async_trait]
pub trait MediaController: Send + Sync {
    async fn play_music(&self) -> Result<(), MediaError>;
    async fn pause_music(&self) -> Result<(), MediaError>;
    async fn stop_music(&self) -> Result<(), MediaError>;
    async fn play_beep(&self, path: &Path) -> Result<(), MediaError>;
}

/// Operating systems with a dedicated controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
}

impl Platform {
    /// Detect the platform this binary runs on
    pub fn detect() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map an OS name to a platform, falling back to Linux for unknown systems
    pub fn from_os(os: &str) -> Self {
        match os {
            "linux" => Platform::Linux,
            "macos" => Platform::MacOs,
            "windows" => Platform::Windows,
            other => {
                warn!(
                    "Operating system {} is not officially supported, using Linux commands",
                    other
                );
                Platform::Linux
            }
        }
    }
}

/// Build the controller for a platform.
///
/// When the dependency check already ran, its findings are reused instead of
/// checking the tools again.
pub async fn create_controller(
    platform: Platform,
    runner: Arc<dyn CommandRunner>,
    preflight: Option<&PreflightReport>,
) -> Arc<dyn MediaController> {
    info!("Using {:?} media controller", platform);

    match platform {
        Platform::Linux => match preflight {
            Some(report) => {
                let playerctl_available = !report.is_missing(PLAYERCTL);
                Arc::new(LinuxController::new(runner, playerctl_available))
            }
            None => Arc::new(LinuxController::detect(runner).await),
        },
        Platform::MacOs => Arc::new(MacosController::new(runner)),
        Platform::Windows => Arc::new(WindowsController::new(runner)),
    }
}

/// Play the chime with the first working player, then the synthesized fallback
pub(crate) async fn play_with_fallback(
    runner: &dyn CommandRunner,
    players: &[CommandSpec],
    fallback: &[CommandSpec],
) -> Result<(), MediaError> {
    match run_chain(runner, players).await {
        Ok(player) => {
            debug!("Chime played with {}", player.program);
            Ok(())
        }
        Err(e) => {
            debug!("No audio player could play the chime ({}), trying fallback", e);
            let used = run_chain(runner, fallback)
                .await
                .map_err(|_| MediaError::Exhausted {
                    attempts: players.len() + fallback.len(),
                })?;
            debug!("Notification played with {}", used.program);
            Ok(())
        }
    }
}
