mod config;
mod services;

use clap::Parser;
use config::ServerConfig;
use joblib::{JobRegistry, Launcher, ProcessLauncher};
use services::jobservice;
use std::{error::Error, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = ServerConfig::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    serve(config).await
}

async fn serve(config: ServerConfig) -> Result<(), Box<dyn Error>> {
    let launcher: Arc<dyn Launcher> = match &config.interpreter {
        Some(interpreter) => {
            info!("Running jobs through interpreter {}", interpreter.display());
            Arc::new(ProcessLauncher::with_interpreter(interpreter))
        }
        None => Arc::new(ProcessLauncher::new()),
    };
    let registry = JobRegistry::spawn(launcher, &config.script_path, config.registry_capacity);

    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!(
        "Server running on http://localhost:{}",
        listener.local_addr()?.port()
    );

    axum::serve(listener, jobservice::router(registry))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for ctrl-c: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
