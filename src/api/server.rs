//! HTTP server implementation

use std::sync::Arc;

use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing::warn;

use crate::api::handlers::AppState;
use crate::api::routes;
use crate::bot::MoodBot;
use crate::config::AppConfig;
use crate::Result;

/// Upper bound on requests handled at once
const MAX_IN_FLIGHT_REQUESTS: usize = 256;

/// Build the application router around a bot
pub fn build_app(bot: Arc<MoodBot>, enable_cors: bool) -> Router {
    let state = AppState { bot };

    let mut app = Router::new()
        .nest("/api", routes::api_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(ConcurrencyLimitLayer::new(MAX_IN_FLIGHT_REQUESTS));

    if enable_cors {
        info!("✅ CORS enabled");
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

/// Start the API server and run until Ctrl-C
pub async fn serve_api(
    config: &AppConfig,
    host: String,
    port: u16,
    enable_cors: bool,
) -> Result<()> {
    info!("🚀 Starting moodmap API server...");

    let bot = Arc::new(MoodBot::from_config(config)?);
    info!("🎭 Tone provider: {}", bot.tone().provider());

    if let Some(path) = &config.state.snapshot_path {
        if std::path::Path::new(path).exists() {
            bot.store().load_from_path(path).await?;
        } else {
            info!("No state snapshot at {}, starting empty", path);
        }
    }

    let app = build_app(bot.clone(), enable_cors);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 API server listening on http://{}", addr);
    info!("Available endpoints:");
    info!("  GET    /api/health                     - Health check");
    info!("  POST   /api/messages                   - Send a chat message");
    info!("  GET    /api/conversations              - List conversations");
    info!("  GET    /api/conversations/:id          - Conversation state");
    info!("  DELETE /api/conversations/:id          - Forget a conversation");
    info!("  GET    /api/conversations/:id/series   - Mood series and chart");
    info!("  POST   /api/project                    - Project emotion scores");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(path) = &config.state.snapshot_path {
        bot.store().save_to_path(path).await?;
    }
    info!("👋 Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
