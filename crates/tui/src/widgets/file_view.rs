//! Generated files: a list of names beside the selected file's contents.
//!
//! The content pane scrolls with PageUp/PageDown and shows a scrollbar once
//! the file is longer than the viewport.

use crate::labels::{label, Label};
use crate::projection::ViewModel;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{
        Block, Borders, List, ListItem, ListState, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState,
    },
    Frame,
};
use sc_protocol::config_models::Locale;
use sc_protocol::run_models::GeneratedFile;

/// Scroll state of the content pane.
#[derive(Debug, Default)]
pub struct FileView {
    /// Current scroll offset (number of lines scrolled from the top).
    pub scroll_offset: usize,
}

impl FileView {
    pub fn new() -> Self {
        Self { scroll_offset: 0 }
    }

    /// Render the file list and the selected file.
    ///
    /// # Arguments
    ///
    /// * `frame` - The ratatui frame to render to
    /// * `area` - The area to render within
    /// * `view` - Projection of the current run
    /// * `selected` - The selected file, if any
    /// * `locale` - Language for titles
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        view: &ViewModel,
        selected: Option<&GeneratedFile>,
        locale: Locale,
    ) {
        let title = label(locale, Label::GeneratedFiles);

        if !view.show_files {
            let paragraph = Paragraph::new(label(locale, Label::NoFiles))
                .block(Block::default().borders(Borders::ALL).title(title))
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(paragraph, area);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(area);

        let items: Vec<ListItem> = view
            .file_names
            .iter()
            .map(|name| ListItem::new(name.as_str()))
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        let mut list_state = ListState::default();
        list_state.select(view.selected_file);
        frame.render_stateful_widget(list, chunks[0], &mut list_state);

        let (name, content) = match selected {
            Some(file) => (file.name.as_str(), file.content.as_str()),
            None => ("", ""),
        };
        let paragraph = Paragraph::new(content)
            .block(Block::default().borders(Borders::ALL).title(name))
            .scroll((self.scroll_offset as u16, 0));
        frame.render_widget(paragraph, chunks[1]);

        let total_lines = content.lines().count();
        let visible_lines = chunks[1].height.saturating_sub(2) as usize;
        if total_lines > visible_lines {
            let mut scrollbar_state = ScrollbarState::default()
                .content_length(total_lines)
                .viewport_content_length(visible_lines)
                .position(self.scroll_offset);
            let scrollbar = Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));
            frame.render_stateful_widget(scrollbar, chunks[1], &mut scrollbar_state);
        }
    }

    /// Scroll up by a page.
    pub fn page_up(&mut self, page_size: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(page_size);
    }

    /// Scroll down by a page, never past `max`.
    pub fn page_down(&mut self, page_size: usize, max: usize) {
        self.scroll_offset = (self.scroll_offset + page_size).min(max);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{project, FileSelection};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use sc_core::state::run::{create_run, merge_artifact};
    use sc_protocol::run_models::Artifact;

    fn render(file_view: &FileView, run: &sc_protocol::run_models::PipelineRun) -> String {
        let selection = FileSelection::new();
        let view = project(run, &selection, None);
        let backend = TestBackend::new(80, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                file_view.render(frame, area, &view, selection.selected_file(run), Locale::En);
            })
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_renders_empty_state() {
        let run = create_run(0, String::new(), String::new());
        let content = render(&FileView::new(), &run);
        assert!(content.contains("No files yet"));
    }

    #[test]
    fn test_renders_first_file_by_default() {
        let mut run = create_run(1, "portfolio site".to_string(), "k1".to_string());
        merge_artifact(
            &mut run,
            Artifact::Files(vec![
                GeneratedFile::new("index.html", "<h1>Portfolio</h1>"),
                GeneratedFile::new("style.css", "body {}"),
            ]),
        );

        let content = render(&FileView::new(), &run);

        assert!(content.contains("index.html"));
        assert!(content.contains("style.css"));
        assert!(content.contains("<h1>Portfolio</h1>"));
    }

    #[test]
    fn test_paging_is_bounded() {
        let mut file_view = FileView::new();
        file_view.page_down(10, 15);
        file_view.page_down(10, 15);
        assert_eq!(file_view.scroll_offset, 15);
        file_view.page_up(20);
        assert_eq!(file_view.scroll_offset, 0);
    }
}
