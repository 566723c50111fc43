//! TUI module for interval-trainer
//!
//! Settings bar, keyboard, answer list and a help bar.

mod answers;
mod keyboard;
mod transport;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

use answers::render_answers;
use keyboard::render_keyboard;
use transport::render_transport;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Main layout: transport, keyboard, answers, status, help
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Settings bar
            Constraint::Length(6), // Keyboard
            Constraint::Min(8),    // Answers + stats
            Constraint::Length(1), // Status line
            Constraint::Length(1), // Help bar
        ])
        .split(area);

    render_transport(frame, chunks[0], app);
    render_keyboard(frame, chunks[1], app);
    render_answers(frame, chunks[2], app);

    let status = Paragraph::new(format!(" {}", app.status)).style(Style::default().fg(Color::White));
    frame.render_widget(status, chunks[3]);

    let help = Paragraph::new(
        " [Space] Play  [1-0 - =] Answer  [N] Next  [[ ]] Notes  [← → K] Keys  [M]ode [D]ir [R]ange [L]ength [P]reset [S]fx [C]lear  [Q] Quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[4]);
}
