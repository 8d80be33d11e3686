//! The session actor.
//!
//! A Session owns the orchestrator, the stored settings and the terminal
//! transcript, and is the only place any of them is mutated. It consumes
//! `Op`s from the UI, stage completions from the orchestrator and results of
//! one-shot utility calls, and reports every change as an `Event`.

use crate::client::BackendClient;
use crate::config::settings::SettingsStore;
use crate::engine::PipelineOrchestrator;
use crate::github::{self, GithubCredentials, GithubError};
use crate::terminal::{self, TerminalSession};
use sc_protocol::config_models::{Settings, StageTimings};
use sc_protocol::ipc::{Event, Op};
use sc_protocol::terminal_models::TerminalEntry;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Result of a terminal command or GitHub push finishing in the background.
#[derive(Debug)]
enum UtilityResult {
    Terminal(TerminalEntry),
    Github(Result<String, GithubError>),
}

pub struct Session {
    orchestrator: PipelineOrchestrator,
    backend: Arc<dyn BackendClient>,
    settings: Settings,
    store: Option<SettingsStore>,
    terminal: TerminalSession,
    events_tx: mpsc::Sender<Event>,
    utility_tx: mpsc::UnboundedSender<UtilityResult>,
    utility_rx: mpsc::UnboundedReceiver<UtilityResult>,
}

impl Session {
    /// Create a session.
    ///
    /// # Arguments
    ///
    /// * `backend` - Client shared by the pipeline, terminal and GitHub push
    /// * `timings` - Simulated working time per stage
    /// * `settings` - Settings loaded at startup
    /// * `store` - Where settings changes are persisted; `None` keeps them in memory
    /// * `events_tx` - Channel for sending events to the UI
    pub fn new(
        backend: Arc<dyn BackendClient>,
        timings: StageTimings,
        settings: Settings,
        store: Option<SettingsStore>,
        events_tx: mpsc::Sender<Event>,
    ) -> Self {
        let orchestrator =
            PipelineOrchestrator::new(Arc::clone(&backend), timings, events_tx.clone());
        let (utility_tx, utility_rx) = mpsc::unbounded_channel();

        Self {
            orchestrator,
            backend,
            settings,
            store,
            terminal: TerminalSession::new(),
            events_tx,
            utility_tx,
            utility_rx,
        }
    }

    pub fn orchestrator(&self) -> &PipelineOrchestrator {
        &self.orchestrator
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn terminal(&self) -> &TerminalSession {
        &self.terminal
    }

    /// Run until a `Shutdown` op arrives or the op channel closes.
    pub async fn run(mut self, mut op_rx: mpsc::Receiver<Op>) {
        info!("Session started");
        loop {
            tokio::select! {
                op = op_rx.recv() => match op {
                    Some(op) => {
                        if !self.handle_op(op).await {
                            break;
                        }
                    }
                    None => break,
                },
                Some(completion) = self.orchestrator.next_completion() => {
                    self.orchestrator.handle_completion(completion).await;
                }
                Some(result) = self.utility_rx.recv() => {
                    self.handle_utility(result).await;
                }
            }
        }
        info!("Session stopped");
    }

    /// Apply a single op. Returns `false` when the session should stop.
    pub async fn handle_op(&mut self, op: Op) -> bool {
        match op {
            Op::StartBuild { idea } => {
                let api_key = self.settings.api_key_or_empty().to_string();
                // Rejections are already reported as events
                let _ = self.orchestrator.start_build(&idea, &api_key).await;
            }
            Op::Reset => self.orchestrator.reset().await,
            Op::SetApiKey { api_key } => {
                let api_key = api_key.trim().to_string();
                self.settings.api_key = (!api_key.is_empty()).then_some(api_key);
                self.persist_settings();
                let _ = self
                    .events_tx
                    .send(Event::ApiKeyUpdated {
                        has_key: self.settings.api_key.is_some(),
                    })
                    .await;
            }
            Op::SetLocale { locale } => {
                self.settings.locale = locale;
                self.persist_settings();
                let _ = self.events_tx.send(Event::LocaleChanged { locale }).await;
            }
            Op::ExecuteCommand { command } => self.execute_command(command).await,
            Op::ClearTerminal => {
                self.terminal.clear();
                let _ = self.events_tx.send(Event::TerminalCleared).await;
            }
            Op::PushToGithub {
                username,
                repo,
                token,
            } => {
                self.push_to_github(GithubCredentials {
                    username,
                    repo,
                    token,
                })
                .await
            }
            Op::Shutdown => return false,
        }
        true
    }

    async fn execute_command(&mut self, command: String) {
        let command = command.trim().to_string();
        if command.is_empty() {
            return;
        }
        self.append_terminal(TerminalEntry::Command(command.clone()))
            .await;

        let backend = Arc::clone(&self.backend);
        let api_key = self.settings.api_key_or_empty().to_string();
        let utility_tx = self.utility_tx.clone();
        tokio::spawn(async move {
            let entry = terminal::run_command(backend.as_ref(), command, api_key).await;
            let _ = utility_tx.send(UtilityResult::Terminal(entry));
        });
    }

    async fn push_to_github(&mut self, credentials: GithubCredentials) {
        let files = &self.orchestrator.current_run().artifacts.files;
        let request = match github::prepare_push(credentials, files) {
            Ok(request) => request,
            Err(err) => {
                warn!(error = %err, "GitHub push rejected");
                let _ = self
                    .events_tx
                    .send(Event::GithubPushFailed {
                        message: err.to_string(),
                    })
                    .await;
                return;
            }
        };

        let backend = Arc::clone(&self.backend);
        let utility_tx = self.utility_tx.clone();
        tokio::spawn(async move {
            let result = github::push(backend.as_ref(), request).await;
            let _ = utility_tx.send(UtilityResult::Github(result));
        });
    }

    async fn handle_utility(&mut self, result: UtilityResult) {
        match result {
            UtilityResult::Terminal(entry) => self.append_terminal(entry).await,
            UtilityResult::Github(Ok(repo)) => {
                let _ = self
                    .events_tx
                    .send(Event::GithubPushSucceeded { repo })
                    .await;
            }
            UtilityResult::Github(Err(err)) => {
                let _ = self
                    .events_tx
                    .send(Event::GithubPushFailed {
                        message: err.to_string(),
                    })
                    .await;
            }
        }
    }

    async fn append_terminal(&mut self, entry: TerminalEntry) {
        self.terminal.push(entry.clone());
        let _ = self
            .events_tx
            .send(Event::TerminalEntryAppended { entry })
            .await;
    }

    fn persist_settings(&self) {
        if let Some(store) = &self.store {
            if let Err(err) = store.save(&self.settings) {
                warn!(error = %err, "Failed to persist settings");
            }
        }
    }
}
