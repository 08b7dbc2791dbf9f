//! Work/break phase definitions

use std::fmt;

/// Length of a work phase in seconds
pub const WORK_SECONDS: u64 = 1500;
/// Length of a break phase in seconds
pub const BREAK_SECONDS: u64 = 300;

/// The two phases of a Pomodoro cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    /// Starting duration of the phase in seconds
    pub fn duration(self) -> u64 {
        match self {
            Phase::Work => WORK_SECONDS,
            Phase::Break => BREAK_SECONDS,
        }
    }

    /// Label shown in the main display block
    pub fn label(self) -> &'static str {
        match self {
            Phase::Work => "WORK",
            Phase::Break => "BREAK",
        }
    }

    /// The phase that follows this one
    pub fn next(self) -> Self {
        match self {
            Phase::Work => Phase::Break,
            Phase::Break => Phase::Work,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
