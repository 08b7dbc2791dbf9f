//! Windows media control through PowerShell

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use super::command::{CommandRunner, CommandSpec};
use super::media::{play_with_fallback, MediaController, MediaError};

const VK_MEDIA_STOP: u8 = 178;
const VK_MEDIA_PLAY_PAUSE: u8 = 179;

/// Sends media keys and plays the chime through PowerShell
pub struct WindowsController {
    runner: Arc<dyn CommandRunner>,
}

impl WindowsController {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    fn powershell(script: &str) -> CommandSpec {
        CommandSpec::new("powershell", &["-NoProfile", "-NonInteractive", "-Command", script])
    }

    async fn send_media_key(&self, key: u8) -> Result<(), MediaError> {
        let script = format!("(New-Object -ComObject WScript.Shell).SendKeys([char]{})", key);
        self.runner.run(&Self::powershell(&script)).await
    }
}

#[async_trait]
impl MediaController for WindowsController {
    // Play and pause share the same toggle key
    async fn play_music(&self) -> Result<(), MediaError> {
        self.send_media_key(VK_MEDIA_PLAY_PAUSE).await
    }

    async fn pause_music(&self) -> Result<(), MediaError> {
        self.send_media_key(VK_MEDIA_PLAY_PAUSE).await
    }

    async fn stop_music(&self) -> Result<(), MediaError> {
        self.send_media_key(VK_MEDIA_STOP).await
    }

    async fn play_beep(&self, path: &Path) -> Result<(), MediaError> {
        // Single quotes are escaped by doubling inside a PowerShell literal
        let path = path.to_string_lossy().replace('\'', "''");
        let player = format!("(New-Object Media.SoundPlayer '{}').PlaySync()", path);
        play_with_fallback(
            self.runner.as_ref(),
            &[Self::powershell(&player)],
            &[Self::powershell("[console]::beep(800,500)")],
        )
        .await
    }
}
