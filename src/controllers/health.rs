use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use crate::infrastructure::db::{check_connection, DbPool};

/// State for the readiness probe
#[derive(Clone)]
pub struct HealthState {
    pub pool: Arc<DbPool>,
    /// Configured synthesis provider, `None` in fallback-only mode
    pub tts_provider: Option<&'static str>,
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(state): State<HealthState>) -> impl IntoResponse {
    let tts = state.tts_provider.unwrap_or("unavailable");

    match check_connection(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "database": "connected",
                "tts": tts
            })),
        ),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "database": "disconnected",
                "tts": tts
            })),
        ),
    }
}
