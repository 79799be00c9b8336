use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cardex_core::{
    create_authenticator, load_config, validate_config, Authenticator, CardExtractor,
    CatalogManager, HttpFetcher, JsonCatalogStore, PageFetcher, SyncOrchestrator,
};
use cardex_server::{api::create_router, state::AppState};

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

    // Determine config path
    let config_path = std::env::var("CARDEX_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    let config_json = serde_json::to_string(&config).unwrap_or_default();
    let config_hash = format!("{:x}", Sha256::digest(config_json.as_bytes()));
    info!(config_hash = &config_hash[..16], "Configuration loaded successfully");
    info!("Auth method: {:?}", config.auth.method);
    info!("Catalog path: {:?}", config.storage.catalog_path);
    info!("Set registry path: {:?}", config.storage.sets_path);

    // Create authenticator
    let authenticator: Arc<dyn Authenticator> = Arc::from(
        create_authenticator(&config.auth).context("Failed to create authenticator")?,
    );
    info!("Using authenticator: {}", authenticator.method_name());

    // Load catalog and set registry
    let store = JsonCatalogStore::new(
        config.storage.catalog_path.clone(),
        config.storage.sets_path.clone(),
    );
    let catalog =
        Arc::new(CatalogManager::open(Box::new(store)).context("Failed to load catalog")?);

    // Create scrape orchestrator
    let fetcher: Arc<dyn PageFetcher> =
        Arc::new(HttpFetcher::new(&config.scraper).context("Failed to create HTTP fetcher")?);
    let orchestrator = Arc::new(SyncOrchestrator::new(
        Arc::clone(&catalog),
        fetcher,
        CardExtractor::new(config.scraper.base_origin.clone()),
        config.scraper.page_suffix.clone(),
        config.sync.max_concurrent_sets,
    ));
    info!(
        max_concurrent_sets = config.sync.max_concurrent_sets,
        rate_limit_rpm = config.scraper.rate_limit_rpm,
        "Scrape orchestrator ready"
    );

    // Create app state
    let state = Arc::new(AppState::new(
        config.clone(),
        authenticator,
        catalog,
        orchestrator,
    ));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
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
