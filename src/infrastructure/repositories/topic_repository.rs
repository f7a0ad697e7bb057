use crate::domain::content::{Topic, TopicListItem};
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use std::sync::Arc;
use uuid::Uuid;

pub struct TopicRepository {
    pool: Arc<DbPool>,
}

impl TopicRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Get all topics (minimal info for list view)
    pub async fn find_all(&self) -> AppResult<Vec<TopicListItem>> {
        let pool = self.pool.as_ref();
        let topics = sqlx::query_as::<_, TopicListItem>(
            r#"
            SELECT id, title, language
            FROM topics
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(topics)
    }

    /// Get a topic by ID
    pub async fn find_by_id(&self, topic_id: Uuid) -> AppResult<Option<Topic>> {
        let pool = self.pool.as_ref();
        let topic = sqlx::query_as::<_, Topic>(
            r#"
            SELECT id, title, content_text, language, audio_url, avatar_video_url,
                   created_at, updated_at
            FROM topics
            WHERE id = $1
            "#,
        )
        .bind(topic_id)
        .fetch_optional(pool)
        .await?;

        Ok(topic)
    }

    /// Insert a new topic and return it
    pub async fn create(
        &self,
        title: &str,
        content_text: &str,
        language: &str,
        audio_url: Option<&str>,
        avatar_video_url: &str,
    ) -> AppResult<Topic> {
        let pool = self.pool.as_ref();
        let now = chrono::Utc::now();

        let topic = sqlx::query_as::<_, Topic>(
            r#"
            INSERT INTO topics (id, title, content_text, language, audio_url, avatar_video_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING id, title, content_text, language, audio_url, avatar_video_url, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(title)
        .bind(content_text)
        .bind(language)
        .bind(audio_url)
        .bind(avatar_video_url)
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok(topic)
    }

    /// Persist a resolved audio URL
    pub async fn set_audio_url(&self, topic_id: Uuid, audio_url: &str) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let result = sqlx::query(
            r#"
            UPDATE topics
            SET audio_url = $1, updated_at = $2
            WHERE id = $3
            "#,
        )
        .bind(audio_url)
        .bind(chrono::Utc::now())
        .bind(topic_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Clear stored URLs matching a regular expression, so the next read
    /// resolves them again. Returns how many topics were reset.
    pub async fn clear_audio_urls_matching(&self, pattern: &str) -> AppResult<u64> {
        let pool = self.pool.as_ref();
        let result = sqlx::query(
            r#"
            UPDATE topics
            SET audio_url = NULL, updated_at = $2
            WHERE audio_url ~ $1
            "#,
        )
        .bind(pattern)
        .bind(chrono::Utc::now())
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }
}
