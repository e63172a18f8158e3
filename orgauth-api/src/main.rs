//! # OrgAuth API Server
//!
//! Multi-tenant authentication service: users register, log in with a
//! bearer token and manage the organisations they belong to.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/orgauth \
//! JWT_SECRET=$(openssl rand -hex 32) \
//! cargo run -p orgauth-api
//! ```

use std::sync::Arc;

use orgauth_api::{
    app::{build_router, AppState},
    config::{Config, LogFormat},
};
use orgauth_shared::{
    db::{
        migrations::{ensure_database_exists, run_migrations},
        pool::{close_pool, create_pool},
    },
    store::PgStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    init_tracing(config.logging.format);

    tracing::info!(
        "OrgAuth API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    ensure_database_exists(&config.database.url).await?;

    let pool = create_pool(&config.database.url, config.database.max_connections).await?;

    run_migrations(&pool).await?;

    let store = Arc::new(PgStore::new(pool.clone()));
    let bind_address = config.bind_address();
    let app = build_router(AppState::new(store, config));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    close_pool(pool).await;
    tracing::info!("Shutdown complete");

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "orgauth_api=debug,orgauth_shared=debug,tower_http=debug".into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}
