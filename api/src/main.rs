use anyhow::{Context, bail};
use clap::Parser;
use server::queue_manager::QueueManager;
use std::path::PathBuf;
use std::sync::Arc;
use walkin::config::{self, ConfigLoadResult};
use walkin::{logger, startup};

#[derive(Parser)]
#[command(name = "walkin")]
#[command(about = "Walk-in counter queue service")]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {e}");
        return;
    }
    log::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let app_config = match config::load_config(&cli.config) {
        ConfigLoadResult::Success(config) => config,
        ConfigLoadResult::LoadError(e) | ConfigLoadResult::DeserializeError(e) => bail!(e),
    };

    if let Err(errors) = app_config.validate() {
        for error in &errors {
            eprintln!("{}\n", error.user_message());
        }
        bail!("Invalid configuration ({} problem(s))", errors.len());
    }

    logger::setup_logger(app_config.logging()).context("Failed to initialize logger")?;

    let store = startup::connect_store(&app_config).await?;
    let manager = Arc::new(QueueManager::new(store, app_config.queue().clone()));

    let address = app_config.server().bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    startup::serve(
        listener,
        manager,
        app_config.server().cors_permissive(),
        shutdown_signal(),
    )
    .await?;

    log::info!("Walk-in queue API stopped");
    Ok(())
}
