//! `sitecraft` binary.
//!
//! Without a subcommand the interactive TUI is launched. `build` runs the
//! pipeline headless and prints each transition.

mod headless;
mod logging;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result};
use colored::Colorize;
use sc_core::client::{BackendClient, HttpBackendClient, MockBackend};
use sc_core::config::loader::{load_config_from_env, override_backend_url};
use sc_core::config::models::AppConfig;
use sc_core::config::settings::SettingsStore;
use sc_protocol::stage_models::StageId;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "sitecraft", version, about = "Build a website from an idea")]
struct Cli {
    /// Directory containing the `.sitecraft/` folder
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Backend origin, overriding config.toml and SITECRAFT_BACKEND_URL
    #[arg(long, global = true)]
    backend_url: Option<String>,

    /// Answer every request from canned data instead of the backend
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the pipeline for an idea without the TUI
    Build {
        idea: String,

        /// Use this key instead of the stored one
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Store the API key in settings.toml
    SetKey { key: String },

    /// Print the effective configuration
    ShowConfig,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let root = cli.root.clone().unwrap_or_else(|| PathBuf::from("."));
    logging::init(&root, cli.command.is_none());

    let mut config = load_config_from_env(&root).await?;
    if let Some(url) = &cli.backend_url {
        override_backend_url(&mut config.client, url)?;
    }
    let store = SettingsStore::in_root(&root);

    match cli.command {
        None => {
            let backend = backend(&config, cli.offline)?;
            sc_tui::run_app(backend, config, store)
                .await
                .map_err(|e| eyre!(e))?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Build { idea, api_key }) => {
            let backend = backend(&config, cli.offline)?;
            let succeeded = headless::build(backend, config, &idea, api_key).await;
            Ok(if succeeded {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Some(Commands::SetKey { key }) => {
            let mut settings = store.load()?;
            let key = key.trim();
            settings.api_key = (!key.is_empty()).then(|| key.to_string());
            store.save(&settings)?;
            let action = if settings.api_key.is_some() {
                "saved to"
            } else {
                "cleared from"
            };
            println!(
                "{} API key {action} {}",
                "✓".green(),
                store.path().display()
            );
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::ShowConfig) => {
            print_config(&config, cli.offline);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn backend(config: &AppConfig, offline: bool) -> Result<Arc<dyn BackendClient>> {
    if offline {
        return Ok(Arc::new(MockBackend::new()));
    }
    Ok(Arc::new(HttpBackendClient::from_config(&config.client)?))
}

fn print_config(config: &AppConfig, offline: bool) {
    let client = &config.client;
    let backend = if offline {
        "offline".to_string()
    } else {
        client.backend_url.clone()
    };
    println!("{} {}", "backend:".bold(), backend);
    match client.request_timeout_secs {
        Some(secs) => println!("{} {secs}s", "timeout:".bold()),
        None => println!("{} none", "timeout:".bold()),
    }
    println!("{}", "stages:".bold());
    for stage in StageId::ALL {
        println!("  {:<10} {} ms", stage.as_str(), client.stages.duration_ms(stage));
    }
    let key = if config.settings.api_key.is_some() {
        "set".green()
    } else {
        "not set".yellow()
    };
    println!("{} {}", "api key:".bold(), key);
    println!("{} {}", "locale:".bold(), config.settings.locale.code());
}
