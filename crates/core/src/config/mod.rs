//! Configuration loading and management.
//!
//! This module loads client configuration from the `.sitecraft/` directory
//! and persists user settings back to it.

pub mod error;
pub mod loader;
pub mod models;
pub mod settings;

/// Directory under the project root holding all sitecraft files.
pub const CONFIG_DIR: &str = ".sitecraft";

/// Environment variable overriding `backend_url`.
pub const BACKEND_URL_ENV: &str = "SITECRAFT_BACKEND_URL";
