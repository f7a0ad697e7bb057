use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    domain::content::{ContentService, ContentServiceApi},
    error::AppResult,
};

/// Response for POST /api/admin/audio/purge
#[derive(Debug, Serialize, Deserialize)]
pub struct PurgeResponse {
    pub deleted: usize,
}

pub struct AudioController {
    content_service: Arc<ContentService>,
}

impl AudioController {
    pub fn new(content_service: Arc<ContentService>) -> Self {
        Self { content_service }
    }

    /// POST /api/admin/audio/purge - Delete generated audio, keep numbered fallbacks
    pub async fn purge_generated(
        State(controller): State<Arc<AudioController>>,
    ) -> AppResult<Json<PurgeResponse>> {
        let deleted = controller.content_service.purge_generated_audio().await?;
        Ok(Json(PurgeResponse { deleted }))
    }
}
