//! Configuration file loader for the `.sitecraft/` directory.
//!
//! This module loads:
//! - `config.toml`: backend location, request timeout and stage timings
//! - `settings.toml`: stored API key and interface locale
//!
//! Missing files fall back to defaults. The backend URL can be overridden
//! from the environment (`SITECRAFT_BACKEND_URL`) and, by the binary, from
//! the command line.

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::models::AppConfig;
use crate::config::settings::SettingsStore;
use crate::config::{BACKEND_URL_ENV, CONFIG_DIR};
use reqwest::Url;
use sc_protocol::config_models::ClientConfig;
use std::path::Path;
use tracing::{debug, info};

/// Loads all configuration from the `.sitecraft/` directory.
///
/// # Arguments
///
/// * `root` - Root directory containing the `.sitecraft/` folder
///
/// # Returns
///
/// An `AppConfig` with the client configuration and user settings. If the
/// directory or files are missing, defaults are returned rather than an
/// error. Environment overrides are not applied; see [`load_config_from_env`].
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - Files exist but cannot be read
/// - Files have invalid TOML syntax
/// - `backend_url` is not an http(s) URL
///
/// # Example
///
/// ```rust,no_run
/// use sc_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("Coder stage runs for {} ms", config.client.stages.coder);
/// # Ok(())
/// # }
/// ```
pub async fn load_config(root: &Path) -> ConfigResult<AppConfig> {
    let client = load_client_config(root)?;
    let settings = SettingsStore::in_root(root).load()?;

    Ok(AppConfig { client, settings })
}

/// Loads configuration and applies overrides from the process environment.
pub async fn load_config_from_env(root: &Path) -> ConfigResult<AppConfig> {
    let mut config = load_config(root).await?;
    apply_env_overrides(&mut config.client, |key| std::env::var(key).ok())?;
    Ok(config)
}

/// Loads client configuration from `config.toml`.
fn load_client_config(root: &Path) -> ConfigResult<ClientConfig> {
    let config_path = root.join(CONFIG_DIR).join("config.toml");

    // If config.toml doesn't exist, return default
    if !config_path.exists() {
        debug!(path = %config_path.display(), "No config.toml, using defaults");
        return Ok(ClientConfig::default());
    }

    let content =
        std::fs::read_to_string(&config_path).map_err(|source| ConfigError::FileRead {
            path: config_path.clone(),
            source,
        })?;

    let config: ClientConfig =
        toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
            path: config_path.clone(),
            source,
        })?;

    validate_backend_url(&config.backend_url).map_err(|reason| ConfigError::InvalidConfig {
        path: config_path,
        reason,
    })?;

    Ok(config)
}

/// Applies environment overrides using `lookup` to read variables.
///
/// An empty variable is treated as unset.
pub fn apply_env_overrides<F>(config: &mut ClientConfig, lookup: F) -> ConfigResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(BACKEND_URL_ENV).filter(|url| !url.trim().is_empty()) {
        info!(%url, "Backend URL overridden from {}", BACKEND_URL_ENV);
        override_backend_url(config, &url)?;
    }
    Ok(())
}

/// Replaces the backend URL after validating it.
pub fn override_backend_url(config: &mut ClientConfig, url: &str) -> ConfigResult<()> {
    let url = url.trim();
    validate_backend_url(url).map_err(|reason| ConfigError::InvalidBackendUrl {
        url: url.to_string(),
        reason,
    })?;
    config.backend_url = url.to_string();
    Ok(())
}

fn validate_backend_url(url: &str) -> Result<(), String> {
    let parsed = Url::parse(url).map_err(|e| e.to_string())?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme `{}`", parsed.scheme()));
    }
    if parsed.host_str().is_none() {
        return Err("missing host".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sc_protocol::config_models::Locale;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_load_config_acceptance() {
        let dir = tempdir().expect("Failed to create temp dir");
        let root = dir.path();
        let sc_dir = root.join(CONFIG_DIR);
        fs::create_dir_all(&sc_dir).expect("Failed to create .sitecraft");

        let config_toml = r#"
backend_url = "https://builder.example.com"
request_timeout_secs = 120

[stages]
coder = 8000
"#;
        fs::write(sc_dir.join("config.toml"), config_toml).expect("Failed to write config.toml");
        fs::write(
            sc_dir.join("settings.toml"),
            "geminiApiKey = \"k1\"\nlocale = \"en\"\n",
        )
        .expect("Failed to write settings.toml");

        let config = load_config(root).await.expect("Failed to load config");

        assert_eq!(config.client.backend_url, "https://builder.example.com");
        assert_eq!(config.client.request_timeout_secs, Some(120));
        assert_eq!(config.client.stages.coder, 8000);
        // Unset stages keep their defaults
        assert_eq!(config.client.stages.thinker, 3000);
        assert_eq!(config.settings.api_key.as_deref(), Some("k1"));
        assert_eq!(config.settings.locale, Locale::En);
    }

    #[tokio::test]
    async fn test_load_config_empty_directory() {
        let dir = tempdir().expect("Failed to create temp dir");

        let config = load_config(dir.path())
            .await
            .expect("Should handle missing .sitecraft");

        assert_eq!(config, AppConfig::default());
    }

    #[tokio::test]
    async fn test_load_config_invalid_toml() {
        let dir = tempdir().expect("Failed to create temp dir");
        let sc_dir = dir.path().join(CONFIG_DIR);
        fs::create_dir_all(&sc_dir).expect("Failed to create .sitecraft");
        fs::write(sc_dir.join("config.toml"), "backend_url = [invalid toml")
            .expect("Failed to write config.toml");

        let result = load_config(dir.path()).await;

        if let Err(ConfigError::TomlParse { path, .. }) = result {
            assert!(path.ends_with("config.toml"));
        } else {
            panic!("Expected TomlParse error");
        }
    }

    #[tokio::test]
    async fn test_load_config_rejects_bad_backend_url() {
        let dir = tempdir().expect("Failed to create temp dir");
        let sc_dir = dir.path().join(CONFIG_DIR);
        fs::create_dir_all(&sc_dir).expect("Failed to create .sitecraft");
        fs::write(sc_dir.join("config.toml"), "backend_url = \"ftp://example.com\"")
            .expect("Failed to write config.toml");

        let result = load_config(dir.path()).await;

        assert!(matches!(result, Err(ConfigError::InvalidConfig { .. })));
    }

    #[test]
    fn test_env_override() {
        let mut config = ClientConfig::default();

        apply_env_overrides(&mut config, |key| {
            (key == BACKEND_URL_ENV).then(|| "http://10.0.0.5:9000".to_string())
        })
        .unwrap();

        assert_eq!(config.backend_url, "http://10.0.0.5:9000");
    }

    #[test]
    fn test_env_override_ignores_empty_value() {
        let mut config = ClientConfig::default();
        apply_env_overrides(&mut config, |_| Some(String::new())).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_override_rejects_garbage() {
        let mut config = ClientConfig::default();

        let err = override_backend_url(&mut config, "not a url").unwrap_err();

        assert!(matches!(err, ConfigError::InvalidBackendUrl { .. }));
        assert_eq!(config, ClientConfig::default());
    }
}
