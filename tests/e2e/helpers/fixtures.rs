use anyhow::Result;
use avatar_teacher_backend::domain::content::{Faq, Topic, DEFAULT_AVATAR_VIDEO_URL};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub struct TestFixtures {
    pool: PgPool,
}

impl TestFixtures {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a topic directly, bypassing audio resolution
    pub async fn create_topic(
        &self,
        title: &str,
        content_text: &str,
        language: &str,
        audio_url: Option<&str>,
    ) -> Result<Topic> {
        let topic = Topic {
            id: Uuid::new_v4(),
            title: title.to_string(),
            content_text: content_text.to_string(),
            language: language.to_string(),
            audio_url: audio_url.map(str::to_string),
            avatar_video_url: DEFAULT_AVATAR_VIDEO_URL.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO topics (
                id, title, content_text, language, audio_url,
                avatar_video_url, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(topic.id)
        .bind(&topic.title)
        .bind(&topic.content_text)
        .bind(&topic.language)
        .bind(&topic.audio_url)
        .bind(&topic.avatar_video_url)
        .bind(topic.created_at)
        .bind(topic.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(topic)
    }

    /// Insert an FAQ directly, bypassing audio resolution
    pub async fn create_faq(
        &self,
        topic_id: Uuid,
        question: &str,
        answer: &str,
        language: &str,
        answer_audio_url: Option<&str>,
    ) -> Result<Faq> {
        let faq = Faq {
            id: Uuid::new_v4(),
            topic_id,
            question: question.to_string(),
            answer: answer.to_string(),
            language: language.to_string(),
            answer_audio_url: answer_audio_url.map(str::to_string),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO faqs (
                id, topic_id, question, answer, language,
                answer_audio_url, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(faq.id)
        .bind(faq.topic_id)
        .bind(&faq.question)
        .bind(&faq.answer)
        .bind(&faq.language)
        .bind(&faq.answer_audio_url)
        .bind(faq.created_at)
        .bind(faq.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(faq)
    }

    /// Audio URL as currently stored, `None` if unset
    pub async fn get_topic_audio_url(&self, topic_id: Uuid) -> Result<Option<String>> {
        let url: Option<String> = sqlx::query_scalar("SELECT audio_url FROM topics WHERE id = $1")
            .bind(topic_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(url)
    }

    pub async fn get_faq_audio_url(&self, faq_id: Uuid) -> Result<Option<String>> {
        let url: Option<String> =
            sqlx::query_scalar("SELECT answer_audio_url FROM faqs WHERE id = $1")
                .bind(faq_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(url)
    }

    pub async fn get_faq_count(&self, topic_id: Uuid) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM faqs WHERE topic_id = $1")
            .bind(topic_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
