use std::error::Error;

use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use travel_server::config::AppConfig;
use travel_server::email::Mailer;
use travel_server::store::{AnyStore, MemoryStore, PgStore, SeedData, apply_seed};
use travel_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let seed = match &config.seed_file {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading seed data");
            SeedData::from_path(path)?
        }
        None => SeedData::builtin()?,
    };

    let store = match &config.database {
        Some(db) => {
            let store = PgStore::connect(&db.url, db.max_connections).await?;
            store.migrate().await?;
            if store.is_empty().await? {
                apply_seed(&store, &seed).await?;
            } else {
                tracing::info!("database already populated, skipping seed");
            }
            AnyStore::Postgres(store)
        }
        None => AnyStore::Memory(MemoryStore::seeded(&seed).await?),
    };
    tracing::info!(backend = store.backend_name(), "storage ready");

    let mailer = Mailer::from_config(config.sendgrid.clone())?;
    if !mailer.is_enabled() {
        tracing::warn!("SENDGRID_API_KEY not set, confirmation emails will be simulated");
    }

    let state = AppState::new(store, mailer, config.session_ttl);
    let app = create_router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Travel planner listening on http://{}", config.bind_addr);
    tracing::info!("API Endpoints:");
    tracing::info!("  GET  /api/cities          - All cities");
    tracing::info!("  GET  /api/transport-modes - All transport modes");
    tracing::info!("  GET  /api/routes/search   - Search routes");
    tracing::info!("  GET  /api/routes/:id      - Route by id");
    tracing::info!("  POST /api/routes/confirm  - Email a route confirmation");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

/// Resolves on Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
