//! Timer state structure and management

use super::Phase;

/// Help line shown under the countdown
pub const HELP_TEXT: &str = "Space: start/pause | R: reset | Q/Esc: quit";

/// Countdown data for the single timer session.
///
/// This is plain data: it never touches the scheduler or media. `AppState`
/// drives it and performs the side effects around each transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    pub phase: Phase,
    pub remaining_seconds: u64,
    pub running: bool,
    pub cycle_count: u64,
}

/// Strings handed to the render sink after every mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFrame {
    /// Running/paused indicator for the status line
    pub status: String,
    pub phase_label: &'static str,
    /// Countdown as `MM:SS`
    pub clock: String,
    pub cycles: String,
    pub help: &'static str,
    pub running: bool,
    pub phase: Phase,
}

impl TimerState {
    /// Create the initial state: paused at the start of a work phase
    pub fn new() -> Self {
        Self {
            phase: Phase::Work,
            remaining_seconds: Phase::Work.duration(),
            running: false,
            cycle_count: 0,
        }
    }

    /// Take one second off the countdown.
    ///
    /// Returns true when the countdown has reached zero and the phase must
    /// switch. Zero is never a resting state, so callers switch immediately.
    pub fn decrement(&mut self) -> bool {
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        self.remaining_seconds == 0
    }

    /// Flip to the next phase and reset the countdown to its full duration.
    ///
    /// Leaving a work phase completes a cycle. Returns the new phase.
    pub fn advance_phase(&mut self) -> Phase {
        if self.phase == Phase::Work {
            self.cycle_count += 1;
        }
        self.phase = self.phase.next();
        self.remaining_seconds = self.phase.duration();
        self.phase
    }

    /// Return to the start of a work phase, paused. The cycle count is kept.
    pub fn reset_cycle(&mut self) {
        self.phase = Phase::Work;
        self.remaining_seconds = Phase::Work.duration();
        self.running = false;
    }

    pub fn display(&self) -> DisplayFrame {
        let status = if self.running {
            "▶ RUNNING"
        } else {
            "⏸ PAUSED"
        };

        DisplayFrame {
            status: status.to_string(),
            phase_label: self.phase.label(),
            clock: format_clock(self.remaining_seconds),
            cycles: format!("Cycles: {}", self.cycle_count),
            help: HELP_TEXT,
            running: self.running,
            phase: self.phase,
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Format seconds as two-digit zero-padded `MM:SS`
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_paused_at_full_work_phase() {
        let state = TimerState::new();
        assert_eq!(state.phase, Phase::Work);
        assert_eq!(state.remaining_seconds, 1500);
        assert!(!state.running);
        assert_eq!(state.cycle_count, 0);
    }

    #[test]
    fn decrement_signals_switch_exactly_at_zero() {
        let mut state = TimerState::new();
        state.remaining_seconds = 2;
        assert!(!state.decrement());
        assert_eq!(state.remaining_seconds, 1);
        assert!(state.decrement());
        assert_eq!(state.remaining_seconds, 0);
    }

    #[test]
    fn decrement_never_goes_below_zero() {
        let mut state = TimerState::new();
        state.remaining_seconds = 0;
        assert!(state.decrement());
        assert_eq!(state.remaining_seconds, 0);
    }

    #[test]
    fn leaving_work_counts_a_cycle() {
        let mut state = TimerState::new();
        assert_eq!(state.advance_phase(), Phase::Break);
        assert_eq!(state.remaining_seconds, 300);
        assert_eq!(state.cycle_count, 1);

        assert_eq!(state.advance_phase(), Phase::Work);
        assert_eq!(state.remaining_seconds, 1500);
        assert_eq!(state.cycle_count, 1);
    }

    #[test]
    fn reset_keeps_cycle_count() {
        let mut state = TimerState::new();
        state.advance_phase();
        state.running = true;
        state.remaining_seconds = 42;

        state.reset_cycle();
        assert_eq!(state, TimerState {
            phase: Phase::Work,
            remaining_seconds: 1500,
            running: false,
            cycle_count: 1,
        });
    }

    #[test]
    fn clock_is_zero_padded() {
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(300), "05:00");
        assert_eq!(format_clock(61), "01:01");
        assert_eq!(format_clock(9), "00:09");
    }

    #[test]
    fn display_reflects_state() {
        let mut state = TimerState::new();
        let frame = state.display();
        assert_eq!(frame.status, "⏸ PAUSED");
        assert_eq!(frame.phase_label, "WORK");
        assert_eq!(frame.clock, "25:00");
        assert_eq!(frame.cycles, "Cycles: 0");

        state.running = true;
        state.advance_phase();
        let frame = state.display();
        assert_eq!(frame.status, "▶ RUNNING");
        assert_eq!(frame.phase_label, "BREAK");
        assert_eq!(frame.clock, "05:00");
        assert_eq!(frame.cycles, "Cycles: 1");
    }
}
