//! Backend-backed command terminal.
//!
//! The transcript is append-only: a command entry is recorded as soon as the
//! command is submitted, followed later by its output or error. It is only
//! emptied by an explicit clear.

use crate::client::BackendClient;
use sc_protocol::api_models::ExecuteCommandRequest;
use sc_protocol::terminal_models::TerminalEntry;
use tracing::{debug, warn};

/// Ordered transcript of terminal commands and their results.
#[derive(Debug, Clone, Default)]
pub struct TerminalSession {
    entries: Vec<TerminalEntry>,
}

impl TerminalSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[TerminalEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, entry: TerminalEntry) {
        self.entries.push(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Run `command` on the backend and turn the result into a transcript entry.
///
/// Never fails: a backend error becomes a [`TerminalEntry::Error`] carrying
/// the normalized message.
pub async fn run_command(
    backend: &dyn BackendClient,
    command: String,
    api_key: String,
) -> TerminalEntry {
    debug!(%command, "Executing terminal command");
    let request = ExecuteCommandRequest { command, api_key };

    match backend.execute_command(&request).await {
        Ok(output) => TerminalEntry::Output(output),
        Err(err) => {
            warn!(command = %request.command, error = %err, "Terminal command failed");
            TerminalEntry::Error(err.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{BackendError, MockBackend};
    use sc_protocol::stage_models::BackendOperation;

    #[test]
    fn test_session_is_append_only_until_cleared() {
        let mut session = TerminalSession::new();
        session.push(TerminalEntry::Command("ls".to_string()));
        session.push(TerminalEntry::Output("index.html".to_string()));

        assert_eq!(session.entries().len(), 2);
        assert_eq!(session.entries()[0].text(), "ls");

        session.clear();
        assert!(session.is_empty());
    }

    #[tokio::test]
    async fn test_run_command_output() {
        let backend = MockBackend::new();
        let entry = run_command(&backend, "ls".to_string(), "k1".to_string()).await;
        assert!(matches!(entry, TerminalEntry::Output(ref text) if text.contains("ls")));
    }

    #[tokio::test]
    async fn test_run_command_error() {
        let backend = MockBackend::new().with_failure(
            BackendOperation::ExecuteCommand,
            BackendError::fallback(BackendOperation::ExecuteCommand, None),
        );

        let entry = run_command(&backend, "ls".to_string(), "k1".to_string()).await;

        assert_eq!(
            entry,
            TerminalEntry::Error("Command execution failed".to_string())
        );
    }
}
