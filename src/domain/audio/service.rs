use super::error::{ResolveError, StorageError};
use super::fallback::FallbackTable;
use super::hasher::{content_key, CACHE_KEY_LEN};
use super::model::{audio_filename, ContentRecord, RecordKind, ResolutionResult, SynthesisOutcome};
use crate::infrastructure::repositories::SynthesisRepository;
use crate::infrastructure::storage::AudioStore;
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

/// Upper bound on distinct keys generating at the same time
const MAX_IN_FLIGHT: u64 = 1_000;

pub struct AudioResolver {
    store: Arc<dyn AudioStore>,
    synthesizer: Option<Arc<dyn SynthesisRepository>>,
    fallback: FallbackTable,
    extension: String,
    topic_table_size: u32,
    faq_table_size: u32,
    in_flight: Option<Cache<String, String>>,
}

impl AudioResolver {
    /// `synthesizer` is `None` when no backend is configured.
    pub fn new(
        store: Arc<dyn AudioStore>,
        synthesizer: Option<Arc<dyn SynthesisRepository>>,
        fallback: FallbackTable,
        extension: &str,
        gate_enabled: bool,
    ) -> Self {
        // Entries live only while a generation runs; the TTL just bounds leaks
        // if a caller is dropped mid-generation.
        let in_flight = if gate_enabled {
            Some(
                Cache::builder()
                    .max_capacity(MAX_IN_FLIGHT)
                    .time_to_live(Duration::from_secs(10 * 60))
                    .build(),
            )
        } else {
            None
        };

        Self {
            topic_table_size: fallback.provisioned(RecordKind::Topic),
            faq_table_size: fallback.provisioned(RecordKind::Faq),
            store,
            synthesizer,
            fallback,
            extension: extension.trim_start_matches('.').to_string(),
            in_flight,
        }
    }

    /// Name of the configured synthesis provider, if any
    pub fn synthesis_provider(&self) -> Option<&'static str> {
        self.synthesizer.as_ref().map(|s| s.provider())
    }
}

#[async_trait]
pub trait AudioResolverApi: Send + Sync {
    /// Get or generate the audio URL for a record.
    ///
    /// Order: stored URL, content-addressed asset, synthesis, fallback table.
    /// Never fails; every path ends in a URL.
    async fn resolve(&self, record: &ContentRecord) -> ResolutionResult;

    /// Delete generated assets, keeping the numbered fallbacks
    async fn purge_generated(&self) -> Result<usize, StorageError>;

    /// Regular expression (POSIX/Postgres compatible) matching URLs of
    /// generated assets but not of numbered fallbacks
    fn generated_url_pattern(&self) -> String;
}

#[async_trait]
impl AudioResolverApi for AudioResolver {
    async fn resolve(&self, record: &ContentRecord) -> ResolutionResult {
        if let Some(url) = record.existing_url() {
            return ResolutionResult::existing(url);
        }

        let key = content_key(&record.primary_text);
        let filename = audio_filename(record.kind, &key, &self.extension);

        match self.get_or_generate(record, &filename).await {
            Ok(url) => ResolutionResult::derived(url),
            Err(err) => {
                err.report(&filename);
                ResolutionResult::derived(self.fallback_url(record))
            }
        }
    }

    async fn purge_generated(&self) -> Result<usize, StorageError> {
        let deleted = self.store.purge_generated().await?;
        tracing::info!(deleted = deleted, "Purged generated audio");
        Ok(deleted)
    }

    fn generated_url_pattern(&self) -> String {
        let prefix = self.store.url_for("");
        format!(
            "^{}(topic|faq)_[0-9a-f]{{{}}}\\.{}$",
            regex::escape(&prefix),
            CACHE_KEY_LEN,
            regex::escape(&self.extension)
        )
    }
}

impl AudioResolver {
    async fn get_or_generate(
        &self,
        record: &ContentRecord,
        filename: &str,
    ) -> Result<String, Arc<ResolveError>> {
        if let Some(url) = self.cached_url(filename).await.map_err(Arc::new)? {
            tracing::info!(filename = %filename, kind = %record.kind, "Audio cache hit");
            return Ok(url);
        }

        let Some(in_flight) = &self.in_flight else {
            return self.generate(record, filename).await.map_err(Arc::new);
        };

        // Concurrent callers for the same filename share one generation.
        let result = in_flight
            .try_get_with(filename.to_string(), async {
                if let Some(url) = self.cached_url(filename).await? {
                    return Ok(url);
                }
                self.generate(record, filename).await
            })
            .await;
        in_flight.invalidate(filename).await;
        let url = result?;

        // A caller dropped before invalidating can leave an entry behind that
        // outlives its asset (e.g. across a purge).
        let still_stored = self
            .store
            .exists(filename)
            .await
            .map_err(|e| Arc::new(ResolveError::from(e)))?;
        if still_stored {
            return Ok(url);
        }

        tracing::debug!(filename = %filename, "In-flight entry has no asset, generating again");
        self.generate(record, filename).await.map_err(Arc::new)
    }

    /// URL of the content-addressed asset, if it was generated before
    async fn cached_url(&self, filename: &str) -> Result<Option<String>, ResolveError> {
        self.store.ensure_namespace_ready().await?;
        if self.store.exists(filename).await? {
            Ok(Some(self.store.url_for(filename)))
        } else {
            Ok(None)
        }
    }

    async fn generate(&self, record: &ContentRecord, filename: &str) -> Result<String, ResolveError> {
        if record.primary_text.trim().is_empty() {
            return Err(ResolveError::EmptyText);
        }

        let payload = self.synthesize(record).await.into_payload()?;
        self.store.write(filename, &payload).await?;

        tracing::info!(
            filename = %filename,
            kind = %record.kind,
            language = %record.language,
            "Audio generated"
        );
        Ok(self.store.url_for(filename))
    }

    async fn synthesize(&self, record: &ContentRecord) -> SynthesisOutcome {
        let Some(synthesizer) = &self.synthesizer else {
            return SynthesisOutcome::Unavailable;
        };

        match synthesizer
            .synthesize(&record.primary_text, &record.language)
            .await
        {
            Ok(payload) => SynthesisOutcome::Success(payload),
            Err(reason) => SynthesisOutcome::Failed(reason),
        }
    }

    fn fallback_url(&self, record: &ContentRecord) -> String {
        let table_size = match record.kind {
            RecordKind::Topic => self.topic_table_size,
            RecordKind::Faq => self.faq_table_size,
        };
        self.fallback
            .fallback_for(record.kind, &record.primary_text, table_size)
    }
}
