//! TUI application state and event loop.
//!
//! This module defines the main `App` struct that mirrors the core's run
//! and drives the event loop using `tokio::select!`.

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};
use sc_protocol::{Event, Op};
use std::time::Duration;
use tokio::select;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio_stream::StreamExt;

use crate::animation;
use crate::event_handler::{self, CoreEventEffect, UiState};
use crate::labels::{label, Label};
use crate::projection::{project, FileSelection, ViewModel};
use crate::tui::{Tui, TuiEvent};
use crate::widgets::{render_stages, render_terminal, CommandComposer, FileView};

/// Main TUI application state.
pub struct App {
    /// Mirror of the core's state.
    pub state: UiState,
    /// Input line at the bottom of the screen.
    pub composer: CommandComposer,
    /// Which generated file is shown.
    pub selection: FileSelection,
    pub file_view: FileView,
    /// Channel to send operations to the core.
    op_tx: Sender<Op>,
    /// Channel to receive events from the core.
    event_rx: Receiver<Event>,
    /// Flag to indicate if the application should exit.
    pub should_exit: bool,
}

impl App {
    /// Create a new App with communication channels.
    pub fn new(state: UiState, op_tx: Sender<Op>, event_rx: Receiver<Event>) -> Self {
        Self {
            state,
            composer: CommandComposer::new(),
            selection: FileSelection::new(),
            file_view: FileView::new(),
            op_tx,
            event_rx,
            should_exit: false,
        }
    }

    /// Main event loop.
    ///
    /// Exits on a quit key or when the core closes its event channel.
    pub async fn run(&mut self, tui: &mut Tui) -> Result<()> {
        let mut tui_events = tui.event_stream();
        let frames = tui.frame_requester();

        frames.schedule_frame();

        while !self.should_exit {
            select! {
                event = self.event_rx.recv() => {
                    match event {
                        Some(event) => {
                            self.handle_core_event(event);
                            frames.schedule_frame();
                        }
                        None => self.should_exit = true,
                    }
                }
                Some(tui_event) = tui_events.next() => {
                    match tui_event {
                        TuiEvent::Key(key_event) => {
                            self.handle_key_event(key_event);
                            frames.schedule_frame();
                        }
                        TuiEvent::Paste(text) => {
                            for c in text.chars().filter(|c| !c.is_control()) {
                                self.composer.insert_char(c);
                            }
                            frames.schedule_frame();
                        }
                        TuiEvent::Draw => {
                            tui.draw(|frame| self.render(frame))?;
                            if let Some(stage) = self.state.run.active_stage() {
                                frames.schedule_frame_in(animation::frame_interval(stage));
                            }
                        }
                    }
                }
            }
        }

        Ok(())
    }

    fn handle_core_event(&mut self, event: Event) {
        let effect = event_handler::handle_core_event(&mut self.state, event);
        self.selection.sync(&self.state.run);
        if let CoreEventEffect::PrefillComposer(text) = effect {
            self.composer.set_input(text);
        }
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        if event_handler::handle_keyboard_event(
            key_event,
            &mut self.state,
            &mut self.composer,
            &mut self.selection,
            &mut self.file_view,
            &self.op_tx,
        ) {
            self.should_exit = true;
        }
    }

    fn view(&self) -> ViewModel {
        project(
            &self.state.run,
            &self.selection,
            self.state.validation_error.as_deref(),
        )
    }

    /// Render the TUI.
    fn render(&self, frame: &mut Frame) {
        let view = self.view();
        let locale = self.state.locale;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(10), // Stages
                Constraint::Min(6),     // Files
                Constraint::Length(8),  // Terminal
                Constraint::Length(1),  // Banner
                Constraint::Length(3),  // Command input
            ])
            .split(frame.area());

        let active_for = self
            .state
            .active_since
            .map(|since| since.elapsed())
            .unwrap_or(Duration::ZERO);
        render_stages(frame, chunks[0], &view, locale, active_for);

        self.file_view.render(
            frame,
            chunks[1],
            &view,
            self.selection.selected_file(&self.state.run),
            locale,
        );

        render_terminal(frame, chunks[2], &view, &self.state.terminal, locale);

        self.render_banner(frame, chunks[3], &view);

        let composer_title = if self.state.has_api_key {
            format!("{} (Esc to quit)", label(locale, Label::Command))
        } else {
            format!("{} - /key <api_key>", label(locale, Label::ApiKeyMissing))
        };
        self.composer
            .render(chunks[4], frame.buffer_mut(), &composer_title);

        self.render_popup(frame, chunks[4]);
    }

    /// Error banner, falling back to the last notice.
    fn render_banner(&self, frame: &mut Frame, area: Rect, view: &ViewModel) {
        let (text, color) = match (&view.error_banner, &self.state.notice) {
            (Some(error), _) => (error.as_str(), Color::Red),
            (None, Some(notice)) => (notice.as_str(), Color::Cyan),
            (None, None) => return,
        };
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    /// Autocomplete popup, drawn above the composer.
    fn render_popup(&self, frame: &mut Frame, composer_area: Rect) {
        if !self.composer.should_show_popup() {
            return;
        }
        let rows = self.composer.suggestions().len() as u16 + 2;
        let height = rows.min(composer_area.y);
        if height < 3 {
            return;
        }
        let area = Rect {
            x: composer_area.x,
            y: composer_area.y - height,
            width: composer_area.width,
            height,
        };
        frame.render_widget(Clear, area);
        self.composer.render_popup(area, frame.buffer_mut());
    }
}
