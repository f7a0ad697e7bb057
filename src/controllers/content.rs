use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::content::{
        ContentService, ContentServiceApi, CreateFaqRequest, CreateTopicRequest, Faq, Topic,
        TopicListItem, TopicWithFaqs,
    },
    error::{AppError, AppResult},
};

pub struct ContentController {
    content_service: Arc<ContentService>,
}

impl ContentController {
    pub fn new(content_service: Arc<ContentService>) -> Self {
        Self { content_service }
    }

    /// GET /api/topics - List all topics
    pub async fn list_topics(
        State(controller): State<Arc<ContentController>>,
    ) -> AppResult<Json<Vec<TopicListItem>>> {
        let topics = controller.content_service.list_topics().await?;
        Ok(Json(topics))
    }

    /// GET /api/topics/{topicId} - Topic with its FAQs, audio resolved on demand
    pub async fn get_topic(
        State(controller): State<Arc<ContentController>>,
        Path(topic_id): Path<String>,
    ) -> AppResult<Json<TopicWithFaqs>> {
        let topic_id = parse_id("Topic", &topic_id)?;
        let topic = controller.content_service.get_topic(topic_id).await?;
        Ok(Json(topic))
    }

    /// GET /api/faqs/{faqId} - FAQ, answer audio resolved on demand
    pub async fn get_faq(
        State(controller): State<Arc<ContentController>>,
        Path(faq_id): Path<String>,
    ) -> AppResult<Json<Faq>> {
        let faq_id = parse_id("FAQ", &faq_id)?;
        let faq = controller.content_service.get_faq(faq_id).await?;
        Ok(Json(faq))
    }

    /// POST /api/topics - Create topic (admin)
    pub async fn create_topic(
        State(controller): State<Arc<ContentController>>,
        Json(request): Json<CreateTopicRequest>,
    ) -> AppResult<(StatusCode, Json<Topic>)> {
        let topic = controller.content_service.create_topic(request).await?;
        Ok((StatusCode::CREATED, Json(topic)))
    }

    /// POST /api/faqs - Create FAQ (admin)
    pub async fn create_faq(
        State(controller): State<Arc<ContentController>>,
        Json(request): Json<CreateFaqRequest>,
    ) -> AppResult<(StatusCode, Json<Faq>)> {
        let faq = controller.content_service.create_faq(request).await?;
        Ok((StatusCode::CREATED, Json(faq)))
    }
}

/// Malformed IDs cannot name a record, so they are reported as not found
fn parse_id(what: &str, raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(format!("{} with id {} not found", what, raw)))
}
