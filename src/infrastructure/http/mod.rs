pub mod request_id;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::controllers::{
    audio::AudioController,
    content::ContentController,
    health::{self, HealthState},
};
use crate::infrastructure::config::Config;

pub use request_id::{request_id_middleware, RequestId};

/// Build the application router with all routes configured
pub fn build_router(
    config: &Config,
    health_state: HealthState,
    content_controller: Arc<ContentController>,
    audio_controller: Arc<AudioController>,
) -> Router {
    let content_routes = Router::new()
        .route(
            "/api/topics",
            get(ContentController::list_topics).post(ContentController::create_topic),
        )
        .route("/api/topics/:topic_id", get(ContentController::get_topic))
        .route("/api/faqs", post(ContentController::create_faq))
        .route("/api/faqs/:faq_id", get(ContentController::get_faq))
        .with_state(content_controller);

    // Maintenance
    let audio_routes = Router::new()
        .route("/api/admin/audio/purge", post(AudioController::purge_generated))
        .with_state(audio_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(health_state)
        .merge(content_routes)
        .merge(audio_routes)
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Serve the router until Ctrl-C
pub async fn start_http_server(
    config: &Config,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
