mod action;
mod app;
mod app_state;
mod bootstrap;
mod component;
mod components;
mod container;
mod focus;
mod theme;
mod widgets;

use seedlist_core::api::ApiClient;
use seedlist_core::config::{Config, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = seedlist_core::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = seedlist_core::platform::log_path();

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; keep HTTP client internals quiet by default.
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    eprintln!("seedlist log: {}", log_path.display());
    tracing::info!("seedlist starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let base_config = Config::for_build()?;
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("failed to load {}: {:#}", Settings::config_path().display(), e);
            Settings::default()
        }
    };
    let config = settings.apply(base_config.clone());
    tracing::info!("api {} app {}", config.api_url, config.app_url);

    let api = ApiClient::new(&config, &settings.api, settings.session.cookie.as_deref())?;

    // ── Run TUI ──────────────────────────────────────────────────────────────
    app::App::new(base_config, settings, api, log_path).run().await
}
