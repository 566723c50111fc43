//! Keyboard widget - the practice range, labelled in scale degrees once a round is answered

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use interval_trainer::pitch::{is_black_key, note_name, scale_degree_label, MAX_PITCH, MIN_PITCH};

use crate::app::App;

const KEY_WIDTH: usize = 3;

#[derive(Clone, Copy)]
enum KeyRole {
    Reference,
    Target,
    Other,
}

/// Render the keyboard
pub fn render_keyboard(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(format!(" {} - {} ", note_name(MIN_PITCH), note_name(MAX_PITCH)))
        .borders(Borders::ALL);

    // Only reveal the notes after the answer is in
    let revealed = app
        .session
        .peek_round()
        .filter(|_| app.session.is_answered())
        .copied();

    let mut keys = Vec::new();
    let mut labels = Vec::new();

    for pitch in MIN_PITCH..=MAX_PITCH {
        let role = revealed.map(|round| {
            if pitch == round.note1_pitch {
                KeyRole::Reference
            } else if pitch == round.note2_pitch {
                KeyRole::Target
            } else {
                KeyRole::Other
            }
        });

        let style = match (role, is_black_key(pitch)) {
            (Some(KeyRole::Reference), _) => Style::default().bg(Color::Blue),
            (Some(KeyRole::Target), _) => Style::default().bg(Color::Green),
            (_, true) => Style::default().bg(Color::DarkGray),
            (_, false) => Style::default().bg(Color::White),
        };
        keys.push(Span::styled(" ".repeat(KEY_WIDTH - 1), style));
        keys.push(Span::raw(" "));

        // Every key is labelled relative to the first note
        let label = match revealed {
            Some(round) => format!(
                "{:<width$}",
                scale_degree_label(round.note1_pitch, pitch),
                width = KEY_WIDTH
            ),
            None => " ".repeat(KEY_WIDTH),
        };
        let label_style = match role {
            Some(KeyRole::Reference) => Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            Some(KeyRole::Target) => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            _ => Style::default().fg(Color::Gray),
        };
        let label_style = if revealed.is_some() && pitch == app.cursor {
            label_style.add_modifier(Modifier::REVERSED)
        } else {
            label_style
        };
        labels.push(Span::styled(label, label_style));
    }

    let names = match revealed {
        Some(round) => format!(
            " {} → {}   ([ ] replay each note, ← → pick a key, K plays {})",
            note_name(round.note1_pitch),
            note_name(round.note2_pitch),
            note_name(app.cursor)
        ),
        None => String::new(),
    };

    let lines = vec![
        Line::from(keys.clone()),
        Line::from(keys),
        Line::from(labels),
        Line::from(Span::styled(names, Style::default().fg(Color::DarkGray))),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
