mod api;
mod config;
mod storage;

use crate::api::{status_handler, AppState};
use crate::config::AppConfig;
use crate::storage::MongoStore;
use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("🚀 Starting Relief Chain API Server");

    // Load configuration
    let config = AppConfig::load()?;
    info!("📋 Configuration loaded");
    info!("   - Database: {}", config.database.name);
    info!("   - Token expiry: {}s", config.auth.token_expiry_secs);
    info!("   - Empty-list policy: {:?}", config.api.empty_list_policy);
    info!("   - Server port: {}", config.server.port);

    // Connect to the document store
    info!("💾 Connecting to MongoDB...");
    let store = MongoStore::connect(&config.database.uri, &config.database.name).await?;
    store.ensure_indexes().await?;
    info!("✅ Document store ready");

    // CORS for the browser client
    let cors = CorsLayer::new()
        .allow_origin(config.server.allowed_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    let port = config.server.port;

    // Create application state
    let state = AppState {
        store: Arc::new(store),
        config: Arc::new(config),
    };

    // Build router with modular routes
    let app = Router::new()
        .route("/", get(status_handler))
        .merge(api::auth::routes())
        .merge(api::users::routes())
        .merge(api::supplies::routes())
        .merge(api::donors::routes())
        .merge(api::volunteers::routes())
        .merge(api::reviews::routes())
        .merge(api::gratitude::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📡 Available endpoints:");
    info!("   GET    /                            - Status probe");
    info!("   POST   /api/v1/register             - Register user");
    info!("   POST   /api/v1/login                - Login, returns token");
    info!("   GET    /api/v1/users                - List users");
    info!("   GET    /api/v1/supplies             - List supplies");
    info!("   POST   /api/v1/create-supply        - Create supply");
    info!("   PUT    /api/v1/update-supply/{{id}}   - Update supply");
    info!("   DELETE /api/v1/delete-supply/{{id}}   - Delete supply");
    info!("   POST   /api/v1/donor-collection     - Record donation");
    info!("   GET    /api/v1/allDonors            - List donors by amount");
    info!("   POST   /api/v1/create-volunteer     - Volunteer sign up");
    info!("   GET    /api/v1/volunteers           - List volunteers");
    info!("   GET    /api/v1/reviews              - List reviews");
    info!("   POST   /api/v1/create-reviews       - Post review");
    info!("   POST   /api/v1/gratitude            - Post gratitude message");
    info!("   GET    /api/v1/gratitude            - List gratitude messages");
    info!("");
    info!("✨ Server is ready to accept requests!");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutting down gracefully");

    Ok(())
}

/// Graceful shutdown handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Shutdown signal received");
}
