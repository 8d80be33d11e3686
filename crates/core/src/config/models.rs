//! Configuration models that aggregate all settings.
//!
//! This module provides the unified `AppConfig` structure that combines the
//! client configuration and the persisted user settings into a single
//! object handed to the session at startup.

use sc_protocol::config_models::{ClientConfig, Settings};

/// Unified application configuration loaded from the `.sitecraft/` directory.
///
/// This structure aggregates:
/// - `config.toml`: backend location, request timeout and stage timings
/// - `settings.toml`: stored API key and interface locale
///
/// # Example
///
/// ```rust,no_run
/// use sc_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("Backend at {}", config.client.backend_url);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Client settings from `config.toml`.
    pub client: ClientConfig,

    /// User state from `settings.toml`.
    pub settings: Settings,
}
