//! Notification chime asset

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

/// Two short beeps, 16 kHz mono PCM
pub const BEEP_WAV: &[u8] = include_bytes!("../assets/beep-beep.wav");

/// The chime file the media controller plays at phase transitions
#[derive(Debug)]
pub struct NotificationAsset {
    path: PathBuf,
    /// Whether the file was written by us and must be removed at shutdown
    owned: bool,
}

impl NotificationAsset {
    /// Write the embedded chime into `dir` under a per-process name
    pub fn materialize(dir: &Path) -> io::Result<Self> {
        let path = dir.join(format!("pomodoro-player-{}.wav", std::process::id()));
        fs::write(&path, BEEP_WAV)?;
        info!("Notification sound written to {}", path.display());
        Ok(Self { path, owned: true })
    }

    /// Use an existing audio file; it is left in place at shutdown
    pub fn external(path: PathBuf) -> io::Result<Self> {
        if !path.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("notification sound {} does not exist", path.display()),
            ));
        }
        Ok(Self { path, owned: false })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the materialized file. Failures are ignored.
    pub fn remove(&self) {
        if !self.owned {
            return;
        }
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed {}", self.path.display()),
            Err(e) => debug!("Could not remove {}: {}", self.path.display(), e),
        }
    }
}
