//! Command terminal transcript models.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One line of the command terminal transcript.
///
/// Serialized as `{"type": "command", "text": "ls"}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(tag = "type", content = "text", rename_all = "lowercase")]
pub enum TerminalEntry {
    /// A command as typed by the user.
    Command(String),
    /// Output returned by the backend.
    Output(String),
    /// Failure message for a command.
    Error(String),
}

impl TerminalEntry {
    pub fn text(&self) -> &str {
        match self {
            TerminalEntry::Command(text) | TerminalEntry::Output(text) | TerminalEntry::Error(text) => {
                text
            }
        }
    }
}
