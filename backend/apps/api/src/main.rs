//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors are the
//! domain crates' own enums.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use api::config::Settings;
use api::{build_app, with_http_layers};
use auth::{PgUserRepository, RedisSessionStore};
use profile::S3BlobStore;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,profile=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;
    tracing::info!(?settings, "Configuration loaded");

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(25)
        .connect_with(settings.database.connect_options()?)
        .await
        .context("failed to connect to PostgreSQL")?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Session store
    let redis_client = redis::Client::open(settings.redis.connection_info())?;
    let redis = redis::aio::ConnectionManager::new(redis_client)
        .await
        .context("failed to connect to Redis")?;
    let sessions = RedisSessionStore::new(redis);
    sessions.ping().await.context("Redis PING failed")?;

    tracing::info!("Connected to Redis");

    // Object storage
    let blobs = S3BlobStore::new(settings.storage.clone())?;
    blobs
        .probe()
        .await
        .with_context(|| format!("bucket {} is not reachable", settings.storage.bucket))?;

    tracing::info!(bucket = %settings.storage.bucket, "Connected to object storage");

    // Build router
    let app = build_app(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(sessions),
        Arc::new(blobs),
        Arc::new(settings.auth.clone()),
    );
    let app = with_http_layers(app, &settings.frontend_origins);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves on SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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

    tracing::info!("Shutting down server...");
}
