//! Dependency checks run once before the timer starts

use thiserror::Error;
use tracing::{info, warn};

use super::command::CommandRunner;
use super::Platform;

/// An external tool, or a group of interchangeable tools, the app relies on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub name: &'static str,
    /// Any one of these programs satisfies the dependency
    pub candidates: &'static [&'static str],
    /// Missing optional tools only disable music control
    pub required: bool,
}

/// Result of a successful check
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PreflightReport {
    pub missing_optional: Vec<&'static str>,
}

impl PreflightReport {
    /// Whether the check found the named optional dependency missing
    pub fn is_missing(&self, name: &str) -> bool {
        self.missing_optional.iter().any(|missing| *missing == name)
    }
}

#[derive(Debug, Error)]
pub enum PreflightError {
    #[error("missing required dependencies: {}", missing.join(", "))]
    MissingRequired {
        missing: Vec<&'static str>,
        hint: &'static str,
    },
}

/// Dependencies to check on a platform
pub fn dependencies_for(platform: Platform) -> Vec<Dependency> {
    match platform {
        Platform::Linux => vec![
            Dependency {
                name: "playerctl",
                candidates: &["playerctl"],
                required: false,
            },
            Dependency {
                name: "audio player (paplay, aplay, mpv or ffplay)",
                candidates: &["paplay", "aplay", "mpv", "ffplay"],
                required: true,
            },
        ],
        Platform::MacOs => vec![
            Dependency {
                name: "afplay",
                candidates: &["afplay"],
                required: true,
            },
            Dependency {
                name: "osascript",
                candidates: &["osascript"],
                required: false,
            },
        ],
        Platform::Windows => vec![Dependency {
            name: "powershell",
            candidates: &["powershell"],
            required: false,
        }],
    }
}

/// Installation guidance printed when a required tool is missing
pub fn install_hint(platform: Platform) -> &'static str {
    match platform {
        Platform::Linux => concat!(
            "To install the dependencies on Ubuntu/Debian:\n",
            "  sudo apt install playerctl pulseaudio-utils"
        ),
        Platform::MacOs => "afplay ships with macOS; make sure /usr/bin is on your PATH",
        Platform::Windows => "PowerShell ships with Windows; make sure it is on your PATH",
    }
}

/// Look up every dependency of the platform.
///
/// Missing optional tools are reported and logged; missing required tools
/// fail the check.
pub async fn validate_dependencies(
    platform: Platform,
    runner: &dyn CommandRunner,
) -> Result<PreflightReport, PreflightError> {
    info!("Checking dependencies");

    let mut report = PreflightReport::default();
    let mut missing_required = Vec::new();

    for dependency in dependencies_for(platform) {
        let mut found = false;
        for candidate in dependency.candidates {
            if runner.is_installed(candidate).await {
                found = true;
                break;
            }
        }

        if found {
            continue;
        }

        if dependency.required {
            missing_required.push(dependency.name);
        } else {
            warn!("Optional dependency not found: {} (music control disabled)", dependency.name);
            report.missing_optional.push(dependency.name);
        }
    }

    if !missing_required.is_empty() {
        return Err(PreflightError::MissingRequired {
            missing: missing_required,
            hint: install_hint(platform),
        });
    }

    info!("All required dependencies found");
    Ok(report)
}
