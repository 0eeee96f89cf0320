use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cineflix_core::{
    load_config, validate_config, Announcer, Catalog, PersistentStore, SqliteKvStore,
    TelegramMessenger, TmdbClient, Watchlist,
};
use cineflix_server::{api::create_router, state::AppState};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = std::env::var("CINEFLIX_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Storage path: {:?}", config.storage.path);

    let backend = SqliteKvStore::new(&config.storage.path)
        .context("Failed to open persistent store")?;
    let store = PersistentStore::new(Arc::new(backend));
    info!("Persistent store initialized");

    let watchlist = Watchlist::load(store.clone());
    info!("Watchlist loaded ({} titles)", watchlist.len());

    let catalog: Arc<dyn Catalog> = Arc::new(
        TmdbClient::new(config.catalog.clone()).context("Failed to create TMDB client")?,
    );
    info!("TMDB client initialized");

    let state = Arc::new(AppState::new(
        config.clone(),
        Arc::clone(&catalog),
        watchlist,
    ));

    let announcer = match config.announcer.as_ref().filter(|a| a.enabled) {
        Some(announcer_config) => {
            let messenger = TelegramMessenger::new(
                &announcer_config.bot_token,
                &announcer_config.chat_id,
                announcer_config.api_url.clone(),
            )
            .context("Failed to create Telegram messenger")?;
            let announcer = Announcer::new(
                announcer_config.clone(),
                Arc::clone(&catalog),
                Arc::new(messenger),
                store.clone(),
                state.image_base_url(),
            );
            announcer.start();
            info!("Announcer started for {}", announcer_config.chat_id);
            Some(announcer)
        }
        None => {
            info!("Announcer disabled");
            None
        }
    };

    let app = create_router(state);

    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    if let Some(ref announcer) = announcer {
        info!("Stopping announcer...");
        announcer.stop();
    }

    info!("Server shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
