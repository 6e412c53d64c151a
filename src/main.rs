use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use filedrop_core::CoreConfig;
use filedrop_core::constants::{
    ENV_DATA_DIR, ENV_LISTEN_ADDR, ENV_LOG_DIR, ENV_MAX_UPLOAD_BYTES,
};

/// Main entry point for the FileDrop server
///
/// Resolves configuration once, opens the operational log and serves the REST router until the
/// process is stopped.
///
/// # Environment Variables
/// - `FILEDROP_ADDR`: listen address (default: "0.0.0.0:8080")
/// - `FILEDROP_DATA_DIR`: storage root (default: "data")
/// - `FILEDROP_LOG_DIR`: directory holding `server.log` (default: "log")
/// - `FILEDROP_MAX_UPLOAD_BYTES`: upload body limit in bytes (default: 512 MiB)
///
/// # Returns
/// * `Ok(())` - If the server shuts down cleanly
/// * `Err(anyhow::Error)` - If configuration, the log file, the data directory or the listener
///   cannot be set up
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cfg = CoreConfig::from_env_values(
        std::env::var(ENV_LISTEN_ADDR).ok(),
        std::env::var(ENV_DATA_DIR).ok(),
        std::env::var(ENV_LOG_DIR).ok(),
        std::env::var(ENV_MAX_UPLOAD_BYTES).ok(),
    )?;

    std::fs::create_dir_all(cfg.log_dir())?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(cfg.log_file())
        .map_err(|e| anyhow::anyhow!("cannot open log file {}: {}", cfg.log_file().display(), e))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("filedrop_run=info".parse()?)
                .add_directive("filedrop_core=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .init();

    let state = AppState::from_config(&cfg)?;

    tracing::info!("++ Starting FileDrop on {}", cfg.listen_addr());
    tracing::info!("++ Storing archives under {}", cfg.data_dir().display());

    let listener = tokio::net::TcpListener::bind(cfg.listen_addr()).await?;
    axum::serve(listener, api_rest::router(state)).await?;

    Ok(())
}
