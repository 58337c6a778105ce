use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use shakespeare_pokemon::config::Config;
use shakespeare_pokemon::routes;
use shakespeare_pokemon::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("shakespeare_pokemon=debug,tower_http=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = load_config()?;
    config.apply_env_overrides()?;

    let addr = config.listen_addr()?;
    let app_state = AppState::new(config)?;
    let app = routes::create_app(app_state);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// `CONFIG_PATH` must load if set; otherwise the first of `conf.yaml` and
/// `conf.json` that exists is used, falling back to built-in defaults.
fn load_config() -> Result<Config> {
    if let Ok(path) = std::env::var("CONFIG_PATH") {
        let config = Config::load(&path)?;
        info!("Loaded configuration from: {}", path);
        return Ok(config);
    }

    for path in ["conf.yaml", "conf.json"] {
        if std::path::Path::new(path).exists() {
            let config = Config::load(path)?;
            info!("Loaded configuration from: {}", path);
            return Ok(config);
        }
    }

    warn!("No configuration file found, using defaults");
    Ok(Config::default())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
