//! Answer list widget - one row per interval with its key and running stats

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use interval_trainer::Interval;

use crate::app::{App, ANSWER_KEYS};

/// Render the answer list
pub fn render_answers(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Intervals ")
        .borders(Borders::ALL);

    let config = app.session.config();

    let lines: Vec<Line> = Interval::ALL
        .iter()
        .zip(ANSWER_KEYS)
        .map(|(&interval, key)| {
            let selected = config.is_selected(interval);
            let stats = app.session.interval_stats(interval);

            let style = match app.last_outcome {
                _ if !selected => Style::default().fg(Color::DarkGray),
                Some(outcome) if outcome.answer == interval => Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
                Some(outcome) if outcome.submitted == interval => {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                }
                _ => Style::default().fg(Color::White),
            };

            let accuracy = if stats.answered > 0 {
                format!("{:>3.0}%", stats.correct as f64 * 100.0 / stats.answered as f64)
            } else {
                String::from("   -")
            };

            Line::from(vec![
                Span::styled(format!(" [{key}] "), Style::default().fg(Color::Cyan)),
                Span::styled(format!("{:<8}", interval.display_label()), style),
                Span::styled(
                    format!(
                        "asked {:>3}  answered {:>3}  correct {:>3}  {}",
                        stats.asked, stats.answered, stats.correct, accuracy
                    ),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
