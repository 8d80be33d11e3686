//! Configuration models for `.sitecraft/config.toml` and `.sitecraft/settings.toml`.
//!
//! `config.toml` holds project-wide client configuration that is read at
//! startup. `settings.toml` holds the small amount of user state persisted
//! across sessions (the API key and the interface locale).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::stage_models::StageId;

/// Fixed key under which the API key is persisted.
pub const API_KEY_SETTING: &str = "geminiApiKey";

/// Default backend location when nothing else is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";

/// Simulated working time per stage, in milliseconds.
///
/// # Example
///
/// ```toml
/// [stages]
/// thinker = 3000
/// coder = 5000
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, TS)]
#[serde(default)]
pub struct StageTimings {
    pub thinker: u64,
    pub planner: u64,
    pub coder: u64,
    pub tester: u64,
    pub deployer: u64,
}

impl StageTimings {
    /// The same duration for every stage. Handy for tests and demos.
    pub fn uniform(ms: u64) -> Self {
        Self {
            thinker: ms,
            planner: ms,
            coder: ms,
            tester: ms,
            deployer: ms,
        }
    }

    pub fn duration_ms(&self, stage: StageId) -> u64 {
        match stage {
            StageId::Thinker => self.thinker,
            StageId::Planner => self.planner,
            StageId::Coder => self.coder,
            StageId::Tester => self.tester,
            StageId::Deployer => self.deployer,
        }
    }
}

impl Default for StageTimings {
    fn default() -> Self {
        Self {
            thinker: StageId::Thinker.default_duration_ms(),
            planner: StageId::Planner.default_duration_ms(),
            coder: StageId::Coder.default_duration_ms(),
            tester: StageId::Tester.default_duration_ms(),
            deployer: StageId::Deployer.default_duration_ms(),
        }
    }
}

/// Client configuration from `.sitecraft/config.toml`.
///
/// # Example
///
/// ```toml
/// backend_url = "https://builder.example.com"
/// request_timeout_secs = 120
///
/// [stages]
/// coder = 8000
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct ClientConfig {
    /// Origin of the backend; requests go to `{backend_url}/api/...`.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Optional per-request timeout. Unset means requests may block a stage
    /// indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    #[serde(default)]
    pub stages: StageTimings,
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            request_timeout_secs: None,
            stages: StageTimings::default(),
        }
    }
}

/// Interface language.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ar,
    En,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::Ar => "ar",
            Locale::En => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "ar" => Some(Locale::Ar),
            "en" => Some(Locale::En),
            _ => None,
        }
    }
}

/// User state persisted across sessions in `.sitecraft/settings.toml`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, TS)]
pub struct Settings {
    #[serde(rename = "geminiApiKey", default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default)]
    pub locale: Locale,
}

impl Settings {
    /// The stored key, or an empty string when none is set.
    pub fn api_key_or_empty(&self) -> &str {
        self.api_key.as_deref().unwrap_or("")
    }
}
