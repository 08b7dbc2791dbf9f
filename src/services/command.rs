//! External command execution

use std::fmt;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::{process::Command, time::timeout};
use tracing::debug;

use super::MediaError;

/// Longest any single external command may run before it is killed
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(10);

/// A program and its arguments, ready to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<S: AsRef<str>>(program: &str, args: &[S]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.as_ref().to_string()).collect(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Runs external commands on behalf of the media controllers
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run a command to completion. Non-zero exit is an error.
    async fn run(&self, command: &CommandSpec) -> Result<(), MediaError>;

    /// Whether the program can be spawned at all
    async fn is_installed(&self, program: &str) -> bool;
}

/// Runs commands as real child processes
#[derive(Debug, Clone, Copy)]
pub struct SystemRunner {
    timeout: Duration,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::with_timeout(COMMAND_TIMEOUT)
    }

    /// Kill commands that run longer than `timeout`
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, command: &CommandSpec) -> Result<(), MediaError> {
        debug!("Running {}", command);

        // Output is captured so child processes never draw over the UI.
        // Dropping the future on timeout kills the child.
        let output = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = timeout(self.timeout, output)
            .await
            .map_err(|_| MediaError::TimedOut {
                command: command.to_string(),
                after: self.timeout,
            })?
            .map_err(|source| MediaError::Spawn {
                command: command.to_string(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MediaError::Failed {
                command: command.to_string(),
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(())
    }

    async fn is_installed(&self, program: &str) -> bool {
        let available = Command::new(program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status();
        let available = matches!(timeout(self.timeout, available).await, Ok(Ok(_)));

        let verdict = if available { "available" } else { "missing" };
        debug!("{} is {}", program, verdict);
        available
    }
}

/// Try each command in order, stopping at the first success.
///
/// Returns the command that succeeded.
pub async fn run_chain<'a>(
    runner: &dyn CommandRunner,
    chain: &'a [CommandSpec],
) -> Result<&'a CommandSpec, MediaError> {
    for command in chain {
        match runner.run(command).await {
            Ok(()) => return Ok(command),
            Err(e) => debug!("{}", e),
        }
    }

    Err(MediaError::Exhausted {
        attempts: chain.len(),
    })
}
