//! Tracing subscriber setup.

use sc_core::config::CONFIG_DIR;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn,sitecraft=info,sc_core=info,sc_tui=info";
const LOG_FILE: &str = "sitecraft.log";

/// Install the global subscriber.
///
/// The TUI owns the terminal, so interactive sessions log to
/// `.sitecraft/sitecraft.log`. Headless commands log to stderr. `RUST_LOG`
/// replaces the default filter.
pub fn init(root: &Path, interactive: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    if !interactive {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
        return;
    }

    let dir = root.join(CONFIG_DIR);
    let file = std::fs::create_dir_all(&dir).and_then(|()| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(LOG_FILE))
    });
    // Without a log file the TUI runs unlogged rather than writing over the screen
    if let Ok(file) = file {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init();
    }
}
