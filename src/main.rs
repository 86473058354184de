use anyhow::Context;
use clap::Parser;
use media_catalog::{api, Config, MediaStore};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_file_loaded = dotenvy::dotenv().is_ok();
    let config = Config::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if env_file_loaded {
        info!("loaded .env file");
    }
    config.validate().context("invalid configuration")?;

    let store = MediaStore::builder(&config.data_file)
        .pretty(!config.compact)
        .open()
        .with_context(|| format!("opening catalog at {}", config.data_file.display()))?;
    // Leave a valid snapshot behind even if the old one was unreadable.
    store.flush().context("writing initial snapshot")?;

    let addr = config.listen_addr();
    let app = api::router(Arc::new(store));

    info!("Starting media catalog on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("media catalog stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
