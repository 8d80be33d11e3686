//! Error types for configuration and settings.
//!
//! This module defines all errors that can occur while reading, parsing or
//! persisting files under `.sitecraft/`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and saving.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read a configuration file from disk.
    #[error("Failed to read config file at {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write a settings file to disk.
    #[error("Failed to write file at {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("Failed to parse TOML file at {path}: {source}")]
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Failed to serialize settings to TOML.
    #[error("Failed to serialize settings for {path}: {source}")]
    TomlSerialize {
        path: PathBuf,
        source: toml::ser::Error,
    },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration in {path}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    /// A backend URL from the environment or command line is unusable.
    #[error("Invalid backend URL `{url}`: {reason}")]
    InvalidBackendUrl { url: String, reason: String },
}

/// Type alias for Result with ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;
