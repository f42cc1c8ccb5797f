use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wedplan_app::budget_store::{BudgetStore, LocalStorage};
use wedplan_app::config::AppConfig;
use wedplan_app::navigator::Navigator;
use wedplan_app::router::build_app_router;
use wedplan_app::session::SessionStore;
use wedplan_app::state::AppState;
use wedplan_db::storage::LocalBlobStore;
use wedplan_db::{DataStore, MemoryStore, PgStore};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wedplan_app=debug,wedplan_db=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = AppConfig::from_env()?;
    tracing::info!(host = %config.host, port = %config.port, "Loaded configuration");

    // --- Data store ---
    let store: Arc<dyn DataStore> = match &config.database_url {
        Some(url) => {
            let pool = wedplan_db::create_pool(url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Database connection pool created");

            wedplan_db::health_check(&pool)
                .await
                .context("Database health check failed")?;
            tracing::info!("Database health check passed");

            wedplan_db::run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");

            Arc::new(PgStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using an in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    // --- Object storage and local state ---
    let blobs = Arc::new(LocalBlobStore::new(
        config.storage_root.clone(),
        config.storage_public_url.clone(),
    ));
    let local = LocalStorage::new(config.local_state_dir.clone());
    tracing::info!(dir = %local.dir().display(), "Budget kept in local storage");

    // --- App state ---
    let state = AppState {
        store,
        blobs,
        session: Arc::new(SessionStore::new()),
        navigator: Arc::new(Navigator::new()),
        budget: Arc::new(BudgetStore::new(local)),
        config: Arc::new(config.clone()),
    };

    let app = build_app_router(state)?;

    // --- Start server ---
    let host: IpAddr = config
        .host
        .parse()
        .with_context(|| format!("Invalid HOST address '{}'", config.host))?;
    let addr = SocketAddr::new(host, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
