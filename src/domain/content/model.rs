use crate::domain::audio::{ContentRecord, LanguageCode, RecordKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const DEFAULT_AVATAR_VIDEO_URL: &str = "/static/media/avatar_loop.mp4";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Topic {
    pub id: Uuid,
    pub title: String,
    pub content_text: String,
    /// "en", "hi" or "mixed"
    pub language: String,
    pub audio_url: Option<String>,
    pub avatar_video_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Topic {
    /// The topic body is what gets spoken
    pub fn audio_record(&self) -> ContentRecord {
        ContentRecord::new(
            RecordKind::Topic,
            self.content_text.clone(),
            LanguageCode::new(&self.language),
            self.audio_url.clone(),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Faq {
    pub id: Uuid,
    pub topic_id: Uuid,
    pub question: String,
    pub answer: String,
    pub language: String,
    pub answer_audio_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Faq {
    /// The answer is what gets spoken
    pub fn audio_record(&self) -> ContentRecord {
        ContentRecord::new(
            RecordKind::Faq,
            self.answer.clone(),
            LanguageCode::new(&self.language),
            self.answer_audio_url.clone(),
        )
    }
}

/// Minimal topic info for list view
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TopicListItem {
    pub id: Uuid,
    pub title: String,
    pub language: String,
}

/// Minimal FAQ info embedded in a topic
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FaqListItem {
    pub id: Uuid,
    pub question: String,
    pub answer_audio_url: Option<String>,
}

/// Response for GET /api/topics/:id
#[derive(Debug, Serialize, Deserialize)]
pub struct TopicWithFaqs {
    #[serde(flatten)]
    pub topic: Topic,
    pub faqs: Vec<FaqListItem>,
}

/// Request for POST /api/topics
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTopicRequest {
    pub title: String,
    pub content_text: String,
    #[serde(default)]
    pub language: LanguageCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_video_url: Option<String>,
}

/// Request for POST /api/faqs
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateFaqRequest {
    pub topic_id: Uuid,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub language: LanguageCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_audio_url: Option<String>,
}
