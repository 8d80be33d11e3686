//! Stage table and progress bar.
//!
//! Shows one row per stage with its badge, plus the overall progress gauge.

use crate::animation;
use crate::labels::{label, stage_action, stage_title, Label};
use crate::projection::{StageBadge, ViewModel};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Gauge, Row, Table};
use ratatui::Frame;
use sc_protocol::config_models::Locale;
use std::time::Duration;

/// Renders the stage table and the progress gauge below it.
///
/// # Arguments
/// * `frame` - The frame to render into
/// * `area` - The area to render in
/// * `view` - Projection of the current run
/// * `locale` - Language for stage names and status words
/// * `active_for` - How long the active stage has been working, for its spinner
pub fn render_stages(
    frame: &mut Frame,
    area: Rect,
    view: &ViewModel,
    locale: Locale,
    active_for: Duration,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    let rows: Vec<Row> = view
        .stages
        .iter()
        .map(|(stage, badge)| {
            let (marker, status, style) = match badge {
                StageBadge::Waiting => (
                    " ".to_string(),
                    label(locale, Label::Waiting).to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                StageBadge::Active => (
                    animation::descriptor(*stage).frame_at(active_for).to_string(),
                    stage_action(locale, *stage).to_string(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                StageBadge::Completed => (
                    "✓".to_string(),
                    label(locale, Label::Completed).to_string(),
                    Style::default().fg(Color::Green),
                ),
                StageBadge::Failed => (
                    "✗".to_string(),
                    label(locale, Label::Failed).to_string(),
                    Style::default().fg(Color::Red),
                ),
            };

            Row::new(vec![
                Cell::from(marker),
                Cell::from(stage_title(locale, *stage)),
                Cell::from(status),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Length(12),
        Constraint::Min(10),
    ];
    let table = Table::new(rows, widths).block(
        Block::default()
            .borders(Borders::ALL)
            .title(label(locale, Label::AppTitle))
            .style(Style::default().fg(Color::White)),
    );
    frame.render_widget(table, chunks[0]);

    let gauge_color = if view.error_banner.is_some() && view.active_stage.is_none() {
        Color::Red
    } else {
        Color::Cyan
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(gauge_color))
        .percent(u16::from(view.progress));
    frame.render_widget(gauge, chunks[1]);
}
