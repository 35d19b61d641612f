//! `sociallens-api` -- engagement analytics dashboard server.
//!
//! Loads configuration, pushes mock engagement data to the store, and
//! serves the HTML dashboard plus the JSON API. Insight requests are
//! forwarded to the hosted Langflow flow.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sociallens_api::config::ServerConfig;
use sociallens_api::router::build_app_router;
use sociallens_api::seed;
use sociallens_api::session::SessionStore;
use sociallens_api::state::AppState;
use sociallens_langflow::insight::InsightClient;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sociallens_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
        tracing::error!("DATABASE_URL environment variable is required");
        std::process::exit(1);
    });

    let pool = sociallens_db::create_pool(&database_url)
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to connect to database");
            std::process::exit(1);
        });
    tracing::info!("Database connection pool created");

    if let Err(e) = sociallens_db::run_migrations(&pool).await {
        tracing::error!(error = %e, "Failed to run database migrations");
        std::process::exit(1);
    }
    tracing::info!("Database migrations applied");

    // --- Mock data ---
    if config.seed_on_start {
        match seed::seed_if_empty(&pool, config.seed_record_count).await {
            Ok(inserted) => tracing::info!(inserted, "Startup seeding finished"),
            Err(e) => tracing::warn!(error = %e, "Startup seeding failed"),
        }
    }

    // --- Insight flow ---
    let insights = InsightClient::from_env(reqwest::Client::new());
    match insights.config_error() {
        Some(e) => tracing::warn!(error = %e, "Langflow credentials unavailable; insight requests will fail"),
        None => tracing::info!("Langflow client configured"),
    }

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        insights: Arc::new(insights),
        sessions: Arc::new(SessionStore::new()),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
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
