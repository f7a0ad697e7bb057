use crate::domain::audio::LanguageCode;
use async_trait::async_trait;

/// Repository for speech synthesis.
/// Abstracts the underlying provider (AWS Polly, OpenAI, ...).
///
/// Implementations are responsible for:
/// - Handling provider-specific text length limitations
/// - Splitting text into batches if needed and merging the audio chunks
/// - Provider-specific voice selection for the language
#[async_trait]
pub trait SynthesisRepository: Send + Sync {
    /// Synthesize text to speech in the given language
    ///
    /// Returns audio data ready for playback (MP3 format)
    ///
    /// # Errors
    /// Returns a reason if the language is unsupported or the provider call fails
    async fn synthesize(&self, text: &str, language: &LanguageCode) -> Result<Vec<u8>, String>;

    /// Short provider name for logs and health checks
    fn provider(&self) -> &'static str;
}
