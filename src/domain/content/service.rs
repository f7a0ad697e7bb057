use super::error::ContentServiceError;
use super::model::{
    CreateFaqRequest, CreateTopicRequest, Faq, Topic, TopicListItem, TopicWithFaqs,
    DEFAULT_AVATAR_VIDEO_URL,
};
use crate::domain::audio::{AudioResolverApi, ResolutionResult};
use crate::infrastructure::repositories::{FaqRepository, TopicRepository};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub struct ContentService {
    topic_repo: Arc<TopicRepository>,
    faq_repo: Arc<FaqRepository>,
    audio_resolver: Arc<dyn AudioResolverApi>,
}

impl ContentService {
    pub fn new(
        topic_repo: Arc<TopicRepository>,
        faq_repo: Arc<FaqRepository>,
        audio_resolver: Arc<dyn AudioResolverApi>,
    ) -> Self {
        Self {
            topic_repo,
            faq_repo,
            audio_resolver,
        }
    }
}

#[async_trait]
pub trait ContentServiceApi: Send + Sync {
    async fn list_topics(&self) -> Result<Vec<TopicListItem>, ContentServiceError>;

    /// Fetch a topic with its FAQs, resolving its audio lazily
    async fn get_topic(&self, topic_id: Uuid) -> Result<TopicWithFaqs, ContentServiceError>;

    /// Fetch an FAQ, resolving its answer audio lazily
    async fn get_faq(&self, faq_id: Uuid) -> Result<Faq, ContentServiceError>;

    async fn create_topic(&self, request: CreateTopicRequest) -> Result<Topic, ContentServiceError>;

    async fn create_faq(&self, request: CreateFaqRequest) -> Result<Faq, ContentServiceError>;

    /// Delete generated audio and forget the URLs pointing at it,
    /// so it is regenerated on next read
    async fn purge_generated_audio(&self) -> Result<usize, ContentServiceError>;
}

#[async_trait]
impl ContentServiceApi for ContentService {
    async fn list_topics(&self) -> Result<Vec<TopicListItem>, ContentServiceError> {
        self.topic_repo
            .find_all()
            .await
            .map_err(ContentServiceError::from)
    }

    async fn get_topic(&self, topic_id: Uuid) -> Result<TopicWithFaqs, ContentServiceError> {
        let mut topic = self.find_topic(topic_id).await?;
        self.attach_topic_audio(&mut topic).await;

        let faqs = self
            .faq_repo
            .find_by_topic(topic_id)
            .await?;

        Ok(TopicWithFaqs { topic, faqs })
    }

    async fn get_faq(&self, faq_id: Uuid) -> Result<Faq, ContentServiceError> {
        let mut faq = self
            .faq_repo
            .find_by_id(faq_id)
            .await?
            .ok_or_else(|| ContentServiceError::NotFound(format!("FAQ with id {}", faq_id)))?;

        self.attach_faq_audio(&mut faq).await;
        Ok(faq)
    }

    async fn create_topic(&self, request: CreateTopicRequest) -> Result<Topic, ContentServiceError> {
        require_text("title", &request.title)?;
        require_text("content_text", &request.content_text)?;

        let avatar_video_url = request
            .avatar_video_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_AVATAR_VIDEO_URL);

        let mut topic = self
            .topic_repo
            .create(
                request.title.trim(),
                &request.content_text,
                request.language.as_str(),
                request.audio_url.as_deref(),
                avatar_video_url,
            )
            .await?;

        tracing::info!(topic_id = %topic.id, language = %topic.language, "Topic created");

        self.attach_topic_audio(&mut topic).await;
        Ok(topic)
    }

    async fn create_faq(&self, request: CreateFaqRequest) -> Result<Faq, ContentServiceError> {
        require_text("question", &request.question)?;
        require_text("answer", &request.answer)?;
        self.find_topic(request.topic_id).await?;

        let mut faq = self
            .faq_repo
            .create(
                request.topic_id,
                request.question.trim(),
                &request.answer,
                request.language.as_str(),
                request.answer_audio_url.as_deref(),
            )
            .await?;

        tracing::info!(faq_id = %faq.id, topic_id = %faq.topic_id, "FAQ created");

        self.attach_faq_audio(&mut faq).await;
        Ok(faq)
    }

    async fn purge_generated_audio(&self) -> Result<usize, ContentServiceError> {
        let deleted = self.audio_resolver.purge_generated().await?;

        let pattern = self.audio_resolver.generated_url_pattern();
        let topics_reset = self
            .topic_repo
            .clear_audio_urls_matching(&pattern)
            .await?;
        let faqs_reset = self
            .faq_repo
            .clear_audio_urls_matching(&pattern)
            .await?;

        tracing::info!(
            deleted = deleted,
            topics_reset = topics_reset,
            faqs_reset = faqs_reset,
            "Generated audio purged"
        );
        Ok(deleted)
    }
}

impl ContentService {
    async fn find_topic(&self, topic_id: Uuid) -> Result<Topic, ContentServiceError> {
        self.topic_repo
            .find_by_id(topic_id)
            .await?
            .ok_or_else(|| ContentServiceError::NotFound(format!("Topic with id {}", topic_id)))
    }

    /// Resolve the topic's audio and write it back if needed.
    /// A failed write-back is logged; the read still succeeds.
    async fn attach_topic_audio(&self, topic: &mut Topic) {
        let record = topic.audio_record();
        if record.existing_url().is_some() {
            return;
        }

        let ResolutionResult { url, should_persist } = self.audio_resolver.resolve(&record).await;
        if should_persist {
            if let Err(e) = self.topic_repo.set_audio_url(topic.id, &url).await {
                tracing::warn!(topic_id = %topic.id, error = %e, "Failed to persist topic audio URL");
            }
        }
        topic.audio_url = Some(url);
    }

    async fn attach_faq_audio(&self, faq: &mut Faq) {
        let record = faq.audio_record();
        if record.existing_url().is_some() {
            return;
        }

        let ResolutionResult { url, should_persist } = self.audio_resolver.resolve(&record).await;
        if should_persist {
            if let Err(e) = self.faq_repo.set_audio_url(faq.id, &url).await {
                tracing::warn!(faq_id = %faq.id, error = %e, "Failed to persist FAQ audio URL");
            }
        }
        faq.answer_audio_url = Some(url);
    }
}

fn require_text(field: &str, value: &str) -> Result<(), ContentServiceError> {
    if value.trim().is_empty() {
        return Err(ContentServiceError::Invalid(format!("{} cannot be empty", field)));
    }
    Ok(())
}
