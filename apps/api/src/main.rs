mod analytics;
mod auth;
mod config;
mod db;
mod errors;
mod models;
mod planning;
mod progress;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::analytics::spawn_analytics_worker;
use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::planning::matcher::KeywordCareerMatcher;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{CareerStore, MemoryCareerStore, PgCareerStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerSpark API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the store: Postgres when configured, seeded memory otherwise
    let store: Arc<dyn CareerStore> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url, config.db_max_connections).await?;
            if config.run_migrations {
                run_migrations(&pool).await?;
            }
            Arc::new(PgCareerStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set; using the in-memory store with sample data");
            Arc::new(MemoryCareerStore::seeded())
        }
    };

    // Analytics worker (best-effort, drained on shutdown)
    let (analytics, analytics_worker) =
        spawn_analytics_worker(store.clone(), config.analytics_buffer);

    let matcher = Arc::new(KeywordCareerMatcher::new(config.salary_currency.clone()));
    info!("Career matcher initialized (currency: {})", config.salary_currency);

    // Build app state
    let state = AppState {
        store,
        matcher,
        analytics,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()), // TODO: restrict origins once the web client's domain is fixed
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router (and every AnalyticsSender it held) is gone; let the worker drain.
    if let Err(e) = analytics_worker.await {
        warn!("Analytics worker ended abnormally: {e}");
    }
    info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
