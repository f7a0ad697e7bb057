use super::error::ResolveError;
use super::hasher::CacheKey;
use super::language::LanguageCode;
use serde::{Deserialize, Serialize};

/// Which kind of record an audio asset belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Topic,
    Faq,
}

impl RecordKind {
    /// Filename prefix used for this kind's assets
    pub fn prefix(&self) -> &'static str {
        match self {
            RecordKind::Topic => "topic",
            RecordKind::Faq => "faq",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "topic" => Some(RecordKind::Topic),
            "faq" => Some(RecordKind::Faq),
            _ => None,
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}

/// What the resolver needs to know about a topic or FAQ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRecord {
    pub kind: RecordKind,
    /// Topic body or FAQ answer
    pub primary_text: String,
    pub language: LanguageCode,
    pub existing_audio_url: Option<String>,
}

impl ContentRecord {
    pub fn new(
        kind: RecordKind,
        primary_text: impl Into<String>,
        language: LanguageCode,
        existing_audio_url: Option<String>,
    ) -> Self {
        Self {
            kind,
            primary_text: primary_text.into(),
            language,
            existing_audio_url,
        }
    }

    /// The stored URL, if it is present and not blank
    pub fn existing_url(&self) -> Option<&str> {
        self.existing_audio_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }
}

/// Outcome of a resolution, applied to the record store by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionResult {
    pub url: String,
    /// True when the URL was derived rather than read from the record
    pub should_persist: bool,
}

impl ResolutionResult {
    pub fn existing(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            should_persist: false,
        }
    }

    pub fn derived(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            should_persist: true,
        }
    }
}

/// Result of asking the synthesis backend for audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisOutcome {
    Success(Vec<u8>),
    /// No backend is configured
    Unavailable,
    Failed(String),
}

impl SynthesisOutcome {
    /// Decide whether the outcome yields a payload worth storing.
    pub fn into_payload(self) -> Result<Vec<u8>, ResolveError> {
        match self {
            SynthesisOutcome::Success(payload) if payload.is_empty() => Err(
                ResolveError::SynthesisFailure("backend returned an empty payload".to_string()),
            ),
            SynthesisOutcome::Success(payload) => Ok(payload),
            SynthesisOutcome::Unavailable => Err(ResolveError::SynthesisUnavailable),
            SynthesisOutcome::Failed(reason) => Err(ResolveError::SynthesisFailure(reason)),
        }
    }
}

/// `{prefix}_{key}.{ext}`, e.g. `topic_ba7816bf8f01cfea.mp3`
pub fn audio_filename(kind: RecordKind, key: &CacheKey, extension: &str) -> String {
    format!("{}_{}.{}", kind.prefix(), key, extension)
}
