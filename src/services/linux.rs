//! Linux media control through playerctl and command-line audio players

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::command::{CommandRunner, CommandSpec};
use super::media::{play_with_fallback, MediaController, MediaError};

/// MPRIS command-line controller
pub const PLAYERCTL: &str = "playerctl";

/// Controls MPRIS players with playerctl and plays the chime with the first
/// working audio player
pub struct LinuxController {
    runner: Arc<dyn CommandRunner>,
    playerctl_available: bool,
}

impl LinuxController {
    pub fn new(runner: Arc<dyn CommandRunner>, playerctl_available: bool) -> Self {
        Self {
            runner,
            playerctl_available,
        }
    }

    /// Look up playerctl once and build the controller
    pub async fn detect(runner: Arc<dyn CommandRunner>) -> Self {
        let playerctl_available = runner.is_installed(PLAYERCTL).await;
        if playerctl_available {
            info!("playerctl found, music control enabled");
        } else {
            warn!("playerctl not found, music control disabled");
        }
        Self::new(runner, playerctl_available)
    }

    async fn playerctl(&self, action: &str) -> Result<(), MediaError> {
        if !self.playerctl_available {
            return Err(MediaError::Unavailable(PLAYERCTL.to_string()));
        }
        debug!("playerctl {}", action);
        self.runner.run(&CommandSpec::new(PLAYERCTL, &[action])).await
    }

    fn players(path: &str) -> Vec<CommandSpec> {
        vec![
            CommandSpec::new("paplay", &[path]),
            CommandSpec::new("aplay", &["-q", path]),
            CommandSpec::new(
                "mpv",
                &["--no-video", "--really-quiet", "--volume=50", path],
            ),
            CommandSpec::new(
                "ffplay",
                &[
                    "-nodisp", "-autoexit", "-loglevel", "quiet", "-volume", "50", path,
                ],
            ),
        ]
    }

    fn spoken_fallback() -> Vec<CommandSpec> {
        vec![CommandSpec::new("spd-say", &["--wait", "Pomodoro finished"])]
    }
}

#[async_trait]
impl MediaController for LinuxController {
    async fn play_music(&self) -> Result<(), MediaError> {
        self.playerctl("play").await
    }

    async fn pause_music(&self) -> Result<(), MediaError> {
        self.playerctl("pause").await
    }

    async fn stop_music(&self) -> Result<(), MediaError> {
        self.playerctl("stop").await
    }

    async fn play_beep(&self, path: &Path) -> Result<(), MediaError> {
        let path = path.to_string_lossy();
        play_with_fallback(
            self.runner.as_ref(),
            &Self::players(&path),
            &Self::spoken_fallback(),
        )
        .await
    }
}
