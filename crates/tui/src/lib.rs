//! # sc-tui
//!
//! Terminal User Interface for sitecraft.
//!
//! The UI talks to `sc-core` only through channels carrying the `Op` and
//! `Event` types from `sc-protocol`. It keeps a mirror of the current run,
//! rebuilt from events, and renders a projection of that mirror.

pub mod animation;
pub mod app;
pub mod event;
pub mod event_handler;
pub mod labels;
pub mod projection;
pub mod tui;
pub mod widgets;

pub use app::App;
pub use tui::Tui;

use anyhow::Result;
use event_handler::UiState;
use sc_core::client::BackendClient;
use sc_core::config::models::AppConfig;
use sc_core::config::settings::SettingsStore;
use sc_core::session::Session;
use sc_protocol::Op;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::warn;

/// Capacity of the op and event channels.
const CHANNEL_CAPACITY: usize = 100;

/// Run the interactive builder until the user quits.
///
/// Spawns the core [`Session`] on the current runtime and drives the UI on
/// this task. The session is shut down before returning.
pub async fn run_app(
    backend: Arc<dyn BackendClient>,
    config: AppConfig,
    store: SettingsStore,
) -> Result<()> {
    let AppConfig { client, settings } = config;
    let state = UiState::new(settings.locale, settings.api_key.is_some());

    let (op_tx, op_rx) = mpsc::channel::<Op>(CHANNEL_CAPACITY);
    let (event_tx, event_rx) = mpsc::channel(CHANNEL_CAPACITY);

    let session = Session::new(
        backend,
        client.stages,
        settings,
        Some(store),
        event_tx,
    );
    let core = tokio::spawn(session.run(op_rx));

    let mut tui = Tui::init()?;
    let mut app = App::new(state, op_tx.clone(), event_rx);
    let result = app.run(&mut tui).await;
    tui.restore()?;

    drop(app);
    let _ = op_tx.send(Op::Shutdown).await;
    drop(op_tx);
    if let Err(e) = core.await {
        warn!(error = %e, "Session task ended abnormally");
    }

    result
}
