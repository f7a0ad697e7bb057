use super::synthesis_repository::SynthesisRepository;
use super::text_batches::split_into_batches;
use crate::domain::audio::LanguageCode;
use async_trait::async_trait;
use aws_sdk_polly::{
    types::{Engine, LanguageCode as PollyLanguageCode, OutputFormat, VoiceId},
    Client as PollyClient,
};
use std::sync::Arc;

/// AWS Polly has a limit of 3000 characters per request
const MAX_BATCH_SIZE: usize = 3000;

/// Neural voice and Polly language for one of our language codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PollyVoice {
    voice: &'static str,
    language: &'static str,
}

/// AWS Polly implementation of the synthesis repository
pub struct PollySynthesisRepository {
    polly_client: Arc<PollyClient>,
}

impl PollySynthesisRepository {
    pub fn new(polly_client: Arc<PollyClient>) -> Self {
        Self { polly_client }
    }

    /// Select the neural voice for a language.
    /// Kajal is bilingual, so it also reads mixed Hindi/English content.
    fn voice_for_language(language: &LanguageCode) -> Option<PollyVoice> {
        match language.as_str() {
            LanguageCode::ENGLISH => Some(PollyVoice {
                voice: "Joanna",
                language: "en-US",
            }),
            LanguageCode::HINDI | LanguageCode::MIXED => Some(PollyVoice {
                voice: "Kajal",
                language: "hi-IN",
            }),
            _ => None,
        }
    }

    /// Call AWS Polly to synthesize a single text batch
    async fn call_polly(&self, text: &str, voice: PollyVoice) -> Result<Vec<u8>, String> {
        let voice_id = VoiceId::from(voice.voice);
        let engine = Engine::Neural;

        tracing::debug!(
            voice = voice.voice,
            language_code = voice.language,
            engine = ?engine,
            text_length = text.len(),
            "Calling AWS Polly synthesize_speech"
        );

        let result = self
            .polly_client
            .synthesize_speech()
            .text(text)
            .voice_id(voice_id)
            .language_code(PollyLanguageCode::from(voice.language))
            .output_format(OutputFormat::Mp3)
            .engine(engine)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    voice = voice.voice,
                    text_length = text.len(),
                    "AWS Polly synthesize_speech failed"
                );
                format!("AWS Polly error: {}", e)
            })?;

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            format!("Failed to read audio stream: {}", e)
        })?;

        Ok(audio_stream.into_bytes().to_vec())
    }
}

#[async_trait]
impl SynthesisRepository for PollySynthesisRepository {
    async fn synthesize(&self, text: &str, language: &LanguageCode) -> Result<Vec<u8>, String> {
        let voice = Self::voice_for_language(language)
            .ok_or_else(|| format!("AWS Polly: unsupported language '{}'", language))?;

        let start_time = std::time::Instant::now();
        let batches = split_into_batches(text, MAX_BATCH_SIZE);

        let mut audio_data = Vec::new();
        for (index, batch) in batches.iter().enumerate() {
            let chunk = self.call_polly(batch, voice).await?;
            tracing::debug!(
                batch_index = index,
                chunk_size = chunk.len(),
                "Batch synthesized"
            );
            audio_data.extend(chunk);
        }

        tracing::info!(
            provider = "polly",
            language = %language,
            voice = voice.voice,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.chars().count(),
            batch_count = batches.len(),
            audio_size_bytes = audio_data.len(),
            "TTS synthesis completed"
        );

        Ok(audio_data)
    }

    fn provider(&self) -> &'static str {
        "polly"
    }
}
