//! Terminal transcript panel with preview and download links.

use crate::labels::{label, Label};
use crate::projection::ViewModel;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use sc_protocol::config_models::Locale;
use sc_protocol::terminal_models::TerminalEntry;

/// Render deployment links followed by the tail of the terminal transcript.
pub fn render_terminal(
    frame: &mut Frame,
    area: Rect,
    view: &ViewModel,
    entries: &[TerminalEntry],
    locale: Locale,
) {
    let mut lines: Vec<Line> = Vec::new();

    if let Some(url) = view.preview_url.as_deref().filter(|_| view.show_preview) {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}: ", label(locale, Label::WebsitePreview)),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(url.to_string()),
        ]));
    }
    if view.show_download {
        let target = view.download_url.as_deref().unwrap_or("-");
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}: ", label(locale, Label::Download)),
                Style::default().fg(Color::Green),
            ),
            Span::raw(target.to_string()),
        ]));
    }

    let visible = area.height.saturating_sub(2) as usize;
    let transcript_room = visible.saturating_sub(lines.len());
    let skip = entries.len().saturating_sub(transcript_room);
    for entry in &entries[skip..] {
        let line = match entry {
            TerminalEntry::Command(text) => Line::from(Span::styled(
                format!("$ {text}"),
                Style::default().fg(Color::Yellow),
            )),
            TerminalEntry::Output(text) => Line::from(text.as_str()),
            TerminalEntry::Error(text) => {
                Line::from(Span::styled(text.as_str(), Style::default().fg(Color::Red)))
            }
        };
        lines.push(line);
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(label(locale, Label::Terminal)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
