//! Settings bar widget - shows preset, mode, direction, range, note length and score

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use interval_trainer::practice::{DirectionSetting, MaxRange, TrainingMode};

use crate::app::App;

/// Render the settings bar
pub fn render_transport(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(format!(" interval-trainer ({}) ", app.player.backend().label()))
        .borders(Borders::ALL);

    let config = app.session.config();

    let preset = app
        .session
        .active_preset()
        .map(|preset| preset.label())
        .unwrap_or("Custom");
    let mode = match config.training_mode {
        TrainingMode::Melodic => "Melodic",
        TrainingMode::Harmony => "Harmony",
    };
    let direction = match config.direction {
        DirectionSetting::Ascending => "Up",
        DirectionSetting::Descending => "Down",
        DirectionSetting::Random => "Up/Down",
    };
    let range = match config.max_range {
        MaxRange::OneOctave => "1 oct",
        MaxRange::TwoOctaves => "2 oct",
    };

    let mut spans = vec![
        Span::styled(format!(" {preset}  "), Style::default().fg(Color::Cyan)),
        Span::styled(format!("{mode}  "), Style::default().fg(Color::Green)),
        Span::styled(format!("{direction}  "), Style::default().fg(Color::Yellow)),
        Span::styled(format!("{range}  "), Style::default().fg(Color::White)),
        Span::styled(
            format!("{:.1}s  ", config.note_seconds()),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("Score: {}/{} ({:.0}%)  ", app.session.correct(), app.session.total(), app.session.accuracy_percent()),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(
            format!("SFX: {}  ", if app.player.sound_effects() { "on" } else { "off" }),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(format!("Seed: {}", app.seed), Style::default().fg(Color::DarkGray)),
    ];

    if let Some(peak) = app.last_peak {
        spans.push(Span::styled(
            format!("  Peak: {peak:.2}"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
