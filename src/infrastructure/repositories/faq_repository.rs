use crate::domain::content::{Faq, FaqListItem};
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use std::sync::Arc;
use uuid::Uuid;

pub struct FaqRepository {
    pool: Arc<DbPool>,
}

impl FaqRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Get all FAQs for a topic
    pub async fn find_by_topic(&self, topic_id: Uuid) -> AppResult<Vec<FaqListItem>> {
        let pool = self.pool.as_ref();
        let faqs = sqlx::query_as::<_, FaqListItem>(
            r#"
            SELECT id, question, answer_audio_url
            FROM faqs
            WHERE topic_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(topic_id)
        .fetch_all(pool)
        .await?;

        Ok(faqs)
    }

    /// Get an FAQ by ID
    pub async fn find_by_id(&self, faq_id: Uuid) -> AppResult<Option<Faq>> {
        let pool = self.pool.as_ref();
        let faq = sqlx::query_as::<_, Faq>(
            r#"
            SELECT id, topic_id, question, answer, language, answer_audio_url,
                   created_at, updated_at
            FROM faqs
            WHERE id = $1
            "#,
        )
        .bind(faq_id)
        .fetch_optional(pool)
        .await?;

        Ok(faq)
    }

    /// Insert a new FAQ and return it
    pub async fn create(
        &self,
        topic_id: Uuid,
        question: &str,
        answer: &str,
        language: &str,
        answer_audio_url: Option<&str>,
    ) -> AppResult<Faq> {
        let pool = self.pool.as_ref();
        let now = chrono::Utc::now();

        let faq = sqlx::query_as::<_, Faq>(
            r#"
            INSERT INTO faqs (id, topic_id, question, answer, language, answer_audio_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING id, topic_id, question, answer, language, answer_audio_url, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(topic_id)
        .bind(question)
        .bind(answer)
        .bind(language)
        .bind(answer_audio_url)
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok(faq)
    }

    /// Persist a resolved answer audio URL
    pub async fn set_audio_url(&self, faq_id: Uuid, audio_url: &str) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let result = sqlx::query(
            r#"
            UPDATE faqs
            SET answer_audio_url = $1, updated_at = $2
            WHERE id = $3
            "#,
        )
        .bind(audio_url)
        .bind(chrono::Utc::now())
        .bind(faq_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Clear stored URLs matching a regular expression, so the next read
    /// resolves them again. Returns how many FAQs were reset.
    pub async fn clear_audio_urls_matching(&self, pattern: &str) -> AppResult<u64> {
        let pool = self.pool.as_ref();
        let result = sqlx::query(
            r#"
            UPDATE faqs
            SET answer_audio_url = NULL, updated_at = $2
            WHERE answer_audio_url ~ $1
            "#,
        )
        .bind(pattern)
        .bind(chrono::Utc::now())
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }
}
