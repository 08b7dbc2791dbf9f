//! ratatui renderer

use std::io;

use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph},
    DefaultTerminal, Frame,
};
use tracing::warn;

use super::RenderSink;
use crate::state::{DisplayFrame, Phase};

const STATUS_WIDTH: u16 = 20;
const STATUS_HEIGHT: u16 = 3;
const MAIN_WIDTH: u16 = 60;
const MAIN_HEIGHT: u16 = 9;

/// Draws the timer on the terminal's alternate screen.
///
/// The terminal is restored when the renderer is dropped.
pub struct TerminalRenderer {
    terminal: DefaultTerminal,
}

impl TerminalRenderer {
    /// Enter raw mode and the alternate screen
    pub fn init() -> io::Result<Self> {
        let terminal = ratatui::try_init()?;
        Ok(Self { terminal })
    }
}

impl RenderSink for TerminalRenderer {
    fn render(&mut self, display: &DisplayFrame) {
        if let Err(e) = self.terminal.draw(|frame| draw(frame, display)) {
            warn!("Failed to draw the timer: {}", e);
        }
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        ratatui::restore();
    }
}

/// Status line in the top-left corner, timer box in the centre
pub fn draw(frame: &mut Frame, display: &DisplayFrame) {
    let area = frame.area();

    let status_area = Rect {
        width: STATUS_WIDTH.min(area.width),
        height: STATUS_HEIGHT.min(area.height),
        ..area
    };
    let status_color = if display.running { Color::Green } else { Color::Yellow };
    frame.render_widget(
        Paragraph::new(display.status.as_str()).style(Style::default().fg(status_color)),
        status_area,
    );

    let phase_color = match display.phase {
        Phase::Work => Color::Red,
        Phase::Break => Color::Green,
    };
    let lines = vec![
        Line::styled(
            display.phase_label,
            Style::default().fg(phase_color).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled(display.clock.as_str(), Style::default().add_modifier(Modifier::BOLD)),
        Line::raw(""),
        Line::raw(display.cycles.as_str()),
        Line::raw(""),
        Line::styled(display.help, Style::default().fg(Color::DarkGray)),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" POMODORO ");

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        centered(area, MAIN_WIDTH, MAIN_HEIGHT),
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TimerState;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(display: &DisplayFrame) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| draw(frame, display)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn draws_the_initial_timer() {
        let text = screen(&TimerState::new().display());
        assert!(text.contains("POMODORO"));
        assert!(text.contains("WORK"));
        assert!(text.contains("25:00"));
        assert!(text.contains("Cycles: 0"));
        assert!(text.contains("PAUSED"));
    }

    #[test]
    fn draws_a_running_break() {
        let mut state = TimerState::new();
        state.advance_phase();
        state.running = true;
        state.remaining_seconds = 61;

        let text = screen(&state.display());
        assert!(text.contains("BREAK"));
        assert!(text.contains("01:01"));
        assert!(text.contains("Cycles: 1"));
        assert!(text.contains("RUNNING"));
    }

    #[test]
    fn survives_a_tiny_terminal() {
        let mut terminal = Terminal::new(TestBackend::new(10, 4)).unwrap();
        terminal
            .draw(|frame| draw(frame, &TimerState::new().display()))
            .unwrap();
    }
}
