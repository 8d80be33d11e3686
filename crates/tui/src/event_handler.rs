//! Event handling utilities for the TUI.
//!
//! This module provides functions for handling different types of events:
//! - Core events, applied to a local mirror of the run
//! - Keyboard events (user input)
//! - Command parsing and submission

use crate::event::EventStatus;
use crate::projection::FileSelection;
use crate::widgets::{CommandComposer, FileView};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use sc_core::state::run::{create_run, idle_run, merge_artifact};
use sc_protocol::config_models::Locale;
use sc_protocol::run_models::{PipelineRun, RunStatus};
use sc_protocol::stage_models::StageStatus;
use sc_protocol::terminal_models::TerminalEntry;
use sc_protocol::{Event, Op};
use std::time::Instant;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::mpsc::Sender;
use tracing::warn;

/// Lines moved by PageUp/PageDown in the file view.
const PAGE_SIZE: usize = 10;

/// Everything the UI knows about the core, rebuilt from events.
#[derive(Debug, Clone)]
pub struct UiState {
    pub run: PipelineRun,
    pub locale: Locale,
    pub has_api_key: bool,
    /// Last client-side validation message, cleared when a run starts.
    pub validation_error: Option<String>,
    pub terminal: Vec<TerminalEntry>,
    /// One-line status message (push results, composer errors).
    pub notice: Option<String>,
    /// When the current stage started working, for animations.
    pub active_since: Option<Instant>,
}

impl UiState {
    pub fn new(locale: Locale, has_api_key: bool) -> Self {
        Self {
            run: idle_run(0),
            locale,
            has_api_key,
            validation_error: None,
            terminal: Vec::new(),
            notice: None,
            active_since: None,
        }
    }
}

/// What the caller should do after a core event was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreEventEffect {
    None,
    /// Put this text into the composer.
    PrefillComposer(&'static str),
}

/// Apply an event received from the core to the mirror.
///
/// Run-scoped events for a run other than the mirrored one are dropped.
pub fn handle_core_event(state: &mut UiState, event: Event) -> CoreEventEffect {
    match event {
        Event::RunStarted { run_id, idea } => {
            let mut run = create_run(0, idea, String::new());
            run.id = run_id;
            run.status = RunStatus::Running;
            run.is_active = true;
            state.run = run;
            state.validation_error = None;
            state.active_since = None;
        }
        Event::RunReset { run_id } => {
            let mut run = idle_run(0);
            run.id = run_id;
            state.run = run;
            state.validation_error = None;
            state.active_since = None;
        }
        Event::StageStatusUpdate {
            run_id,
            stage,
            status,
        } => {
            if run_id != state.run.id {
                return CoreEventEffect::None;
            }
            state.run.statuses.insert(stage, status);
            match status {
                StageStatus::Working => state.active_since = Some(Instant::now()),
                StageStatus::Completed => {
                    if !state.run.completed.contains(&stage) {
                        state.run.completed.push(stage);
                    }
                    state.active_since = None;
                }
                StageStatus::Failed | StageStatus::Waiting => state.active_since = None,
            }
        }
        Event::ProgressUpdate { run_id, progress } => {
            if run_id == state.run.id {
                state.run.progress = state.run.progress.max(progress);
            }
        }
        Event::ArtifactReady { run_id, artifact } => {
            if run_id == state.run.id {
                merge_artifact(&mut state.run, artifact);
            }
        }
        Event::RunCompleted { run_id } => {
            if run_id == state.run.id {
                state.run.status = RunStatus::Completed;
                state.run.is_active = false;
            }
        }
        Event::RunFailed {
            run_id,
            stage: _,
            error,
        } => {
            if run_id == state.run.id {
                state.run.status = RunStatus::Failed;
                state.run.is_active = false;
                state.run.error = Some(error);
                state.active_since = None;
            }
        }
        Event::ValidationFailed {
            message,
            prompt_api_key,
        } => {
            state.validation_error = Some(message);
            if prompt_api_key {
                return CoreEventEffect::PrefillComposer("/key ");
            }
        }
        Event::ApiKeyUpdated { has_key } => {
            state.has_api_key = has_key;
            if has_key {
                state.validation_error = None;
            }
        }
        Event::LocaleChanged { locale } => state.locale = locale,
        Event::TerminalEntryAppended { entry } => state.terminal.push(entry),
        Event::TerminalCleared => state.terminal.clear(),
        Event::GithubPushSucceeded { repo } => {
            state.notice = Some(format!("Pushed to github.com/{repo}"));
        }
        Event::GithubPushFailed { message } => {
            state.notice = Some(message);
        }
    }
    CoreEventEffect::None
}

/// Handle a keyboard event from the user.
///
/// Returns `true` if the application should exit, `false` otherwise.
pub fn handle_keyboard_event(
    key_event: KeyEvent,
    state: &mut UiState,
    composer: &mut CommandComposer,
    selection: &mut FileSelection,
    file_view: &mut FileView,
    op_tx: &Sender<Op>,
) -> bool {
    if key_event.kind != KeyEventKind::Press {
        return false;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return true;
    }

    if handle_popup_key(key_event, composer) == EventStatus::Consumed {
        return false;
    }

    match key_event.code {
        KeyCode::Esc => {
            if composer.is_empty() {
                return true;
            }
            composer.clear();
        }
        KeyCode::Up => {
            selection.select_previous(&state.run);
            file_view.scroll_to_top();
        }
        KeyCode::Down => {
            selection.select_next(&state.run);
            file_view.scroll_to_top();
        }
        KeyCode::PageUp => file_view.page_up(PAGE_SIZE),
        KeyCode::PageDown => {
            let max = selection
                .selected_file(&state.run)
                .map(|file| file.content.lines().count().saturating_sub(1))
                .unwrap_or(0);
            file_view.page_down(PAGE_SIZE, max);
        }
        KeyCode::Left => composer.move_cursor_left(),
        KeyCode::Right => composer.move_cursor_right(),
        KeyCode::Char(c) => composer.insert_char(c),
        KeyCode::Backspace => composer.delete_char(),
        KeyCode::Enter => return submit_command(state, composer, op_tx),
        _ => {}
    }

    false
}

/// Keys the autocomplete popup takes while it is open.
fn handle_popup_key(key_event: KeyEvent, composer: &mut CommandComposer) -> EventStatus {
    if !composer.should_show_popup() {
        return EventStatus::NotConsumed;
    }
    match key_event.code {
        KeyCode::Up => composer.move_selection_up(),
        KeyCode::Down => composer.move_selection_down(),
        KeyCode::Tab => composer.complete_with_selection(),
        _ => return EventStatus::NotConsumed,
    }
    EventStatus::Consumed
}

/// Submit the current command input.
///
/// Returns `true` when the input asked to quit.
fn submit_command(state: &mut UiState, composer: &mut CommandComposer, op_tx: &Sender<Op>) -> bool {
    let op = match composer.parse_command() {
        Ok(Some(op)) => op,
        Ok(None) => return false,
        Err(message) => {
            state.notice = Some(message);
            return false;
        }
    };
    composer.clear();
    state.notice = None;

    let quit = matches!(op, Op::Shutdown);
    send_op(op_tx, op);
    quit
}

fn send_op(op_tx: &Sender<Op>, op: Op) {
    match op_tx.try_send(op) {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => warn!("Core is busy, dropping operation"),
        Err(TrySendError::Closed(_)) => warn!("Core has shut down, dropping operation"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::project;
    use sc_protocol::run_models::{Artifact, GeneratedFile};
    use sc_protocol::stage_models::StageId;
    use tokio::sync::mpsc::{channel, Receiver};
    use uuid::Uuid;

    struct Harness {
        state: UiState,
        composer: CommandComposer,
        selection: FileSelection,
        file_view: FileView,
        op_tx: Sender<Op>,
        op_rx: Receiver<Op>,
    }

    impl Harness {
        fn new() -> Self {
            let (op_tx, op_rx) = channel(16);
            Self {
                state: UiState::new(Locale::En, true),
                composer: CommandComposer::new(),
                selection: FileSelection::new(),
                file_view: FileView::new(),
                op_tx,
                op_rx,
            }
        }

        fn key(&mut self, code: KeyCode) -> bool {
            handle_keyboard_event(
                KeyEvent::from(code),
                &mut self.state,
                &mut self.composer,
                &mut self.selection,
                &mut self.file_view,
                &self.op_tx,
            )
        }

        fn type_text(&mut self, text: &str) {
            for c in text.chars() {
                self.key(KeyCode::Char(c));
            }
        }
    }

    fn started(state: &mut UiState) -> Uuid {
        let run_id = Uuid::new_v4();
        handle_core_event(
            state,
            Event::RunStarted {
                run_id,
                idea: "portfolio site".to_string(),
            },
        );
        run_id
    }

    #[test]
    fn test_mirror_follows_stage_events() {
        let mut state = UiState::new(Locale::En, true);
        let run_id = started(&mut state);
        assert!(state.run.is_active);

        handle_core_event(
            &mut state,
            Event::StageStatusUpdate {
                run_id,
                stage: StageId::Thinker,
                status: StageStatus::Working,
            },
        );
        assert_eq!(state.run.active_stage(), Some(StageId::Thinker));
        assert!(state.active_since.is_some());

        handle_core_event(
            &mut state,
            Event::StageStatusUpdate {
                run_id,
                stage: StageId::Thinker,
                status: StageStatus::Completed,
            },
        );
        handle_core_event(&mut state, Event::ProgressUpdate { run_id, progress: 20 });

        assert_eq!(state.run.completed, vec![StageId::Thinker]);
        assert_eq!(state.run.progress, 20);
        assert!(state.active_since.is_none());
    }

    #[test]
    fn test_events_for_other_runs_are_ignored() {
        let mut state = UiState::new(Locale::En, true);
        let old_run = started(&mut state);
        let run_id = started(&mut state);
        assert_ne!(old_run, run_id);

        handle_core_event(
            &mut state,
            Event::ArtifactReady {
                run_id: old_run,
                artifact: Artifact::Files(vec![GeneratedFile::new("old.html", "")]),
            },
        );
        handle_core_event(&mut state, Event::ProgressUpdate { run_id: old_run, progress: 60 });

        assert!(state.run.artifacts.files.is_empty());
        assert_eq!(state.run.progress, 0);
    }

    #[test]
    fn test_run_failed_sets_error() {
        let mut state = UiState::new(Locale::En, true);
        let run_id = started(&mut state);

        handle_core_event(
            &mut state,
            Event::RunFailed {
                run_id,
                stage: StageId::Coder,
                error: "Gemini API error".to_string(),
            },
        );

        assert_eq!(state.run.status, RunStatus::Failed);
        assert!(!state.run.is_active);
        assert_eq!(state.run.error.as_deref(), Some("Gemini API error"));
    }

    #[test]
    fn test_newer_validation_error_replaces_run_error_banner() {
        let mut state = UiState::new(Locale::En, true);
        let run_id = started(&mut state);
        handle_core_event(
            &mut state,
            Event::RunFailed {
                run_id,
                stage: StageId::Thinker,
                error: "Gemini API error".to_string(),
            },
        );
        let view = project(&state.run, &FileSelection::new(), state.validation_error.as_deref());
        assert_eq!(view.error_banner.as_deref(), Some("Gemini API error"));

        let effect = handle_core_event(
            &mut state,
            Event::ValidationFailed {
                message: "Please enter a website idea to continue".to_string(),
                prompt_api_key: false,
            },
        );

        assert_eq!(effect, CoreEventEffect::None);
        let view = project(&state.run, &FileSelection::new(), state.validation_error.as_deref());
        assert_eq!(
            view.error_banner.as_deref(),
            Some("Please enter a website idea to continue")
        );
    }

    #[test]
    fn test_missing_key_prefills_composer() {
        let mut state = UiState::new(Locale::En, false);
        let effect = handle_core_event(
            &mut state,
            Event::ValidationFailed {
                message: "API key is required to continue".to_string(),
                prompt_api_key: true,
            },
        );

        assert_eq!(effect, CoreEventEffect::PrefillComposer("/key "));
        assert_eq!(
            state.validation_error.as_deref(),
            Some("API key is required to continue")
        );

        handle_core_event(&mut state, Event::ApiKeyUpdated { has_key: true });
        assert!(state.has_api_key);
        assert!(state.validation_error.is_none());
    }

    #[test]
    fn test_enter_submits_idea() {
        let mut harness = Harness::new();
        harness.type_text("portfolio site");

        let should_exit = harness.key(KeyCode::Enter);

        assert!(!should_exit);
        assert_eq!(harness.composer.input(), "");
        match harness.op_rx.try_recv() {
            Ok(Op::StartBuild { idea }) => assert_eq!(idea, "portfolio site"),
            other => panic!("Expected StartBuild, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_command_sets_notice() {
        let mut harness = Harness::new();
        harness.type_text("/nope");

        harness.key(KeyCode::Enter);

        assert!(harness.op_rx.try_recv().is_err());
        assert_eq!(harness.state.notice.as_deref(), Some("Unknown command: /nope"));
        assert_eq!(harness.composer.input(), "/nope");
    }

    #[test]
    fn test_quit_keys() {
        let mut harness = Harness::new();
        assert!(!harness.key(KeyCode::Char('q')));
        assert!(!harness.key(KeyCode::Esc));
        assert_eq!(harness.composer.input(), "");
        assert!(harness.key(KeyCode::Esc));

        let mut harness = Harness::new();
        assert!(handle_keyboard_event(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut harness.state,
            &mut harness.composer,
            &mut harness.selection,
            &mut harness.file_view,
            &harness.op_tx,
        ));

        let mut harness = Harness::new();
        harness.type_text("/quit");
        harness.key(KeyCode::Esc);
        harness.type_text("/quit");
        // The popup is open while typing a bare command; Enter still submits
        assert!(harness.key(KeyCode::Enter));
        assert!(matches!(harness.op_rx.try_recv(), Ok(Op::Shutdown)));
    }

    #[test]
    fn test_arrows_move_file_selection() {
        let mut harness = Harness::new();
        let run_id = started(&mut harness.state);
        handle_core_event(
            &mut harness.state,
            Event::ArtifactReady {
                run_id,
                artifact: Artifact::Files(vec![
                    GeneratedFile::new("index.html", ""),
                    GeneratedFile::new("style.css", ""),
                ]),
            },
        );

        harness.key(KeyCode::Down);
        assert_eq!(harness.selection.selected_index(&harness.state.run), Some(1));
        harness.key(KeyCode::Down);
        assert_eq!(harness.selection.selected_index(&harness.state.run), Some(1));
        harness.key(KeyCode::Up);
        assert_eq!(harness.selection.selected_index(&harness.state.run), Some(0));
    }

    #[test]
    fn test_popup_takes_arrow_keys() {
        let mut harness = Harness::new();
        harness.type_text("/");
        harness.key(KeyCode::Down);
        harness.key(KeyCode::Tab);
        assert_eq!(harness.composer.input(), "/reset");
    }
}
