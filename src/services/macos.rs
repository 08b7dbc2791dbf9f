//! macOS media control through AppleScript

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use super::command::{run_chain, CommandRunner, CommandSpec};
use super::media::{play_with_fallback, MediaController, MediaError};

/// Scripts Music.app, with Spotify as the backup application
pub struct MacosController {
    runner: Arc<dyn CommandRunner>,
}

impl MacosController {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    fn tell(app: &str, action: &str) -> CommandSpec {
        let script = format!("tell application \"{}\" to {}", app, action);
        CommandSpec::new("osascript", &["-e", script.as_str()])
    }

    async fn control(&self, music_action: &str, spotify_action: &str) -> Result<(), MediaError> {
        let chain = [
            Self::tell("Music", music_action),
            Self::tell("Spotify", spotify_action),
        ];
        run_chain(self.runner.as_ref(), &chain).await.map(|_| ())
    }
}

#[async_trait]
impl MediaController for MacosController {
    async fn play_music(&self) -> Result<(), MediaError> {
        self.control("play", "play").await
    }

    async fn pause_music(&self) -> Result<(), MediaError> {
        self.control("pause", "pause").await
    }

    async fn stop_music(&self) -> Result<(), MediaError> {
        // Spotify has no stop verb
        self.control("stop", "pause").await
    }

    async fn play_beep(&self, path: &Path) -> Result<(), MediaError> {
        let path = path.to_string_lossy();
        play_with_fallback(
            self.runner.as_ref(),
            &[CommandSpec::new("afplay", &[&*path])],
            &[CommandSpec::new("say", &["Pomodoro finished"])],
        )
        .await
    }
}
