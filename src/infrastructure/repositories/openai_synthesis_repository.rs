use super::synthesis_repository::SynthesisRepository;
use super::text_batches::split_into_batches;
use crate::domain::audio::LanguageCode;
use async_openai::{
    config::OpenAIConfig,
    types::{CreateSpeechRequest, SpeechModel, Voice},
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// OpenAI has a limit of 4096 characters per request
const MAX_BATCH_SIZE: usize = 4096;

/// OpenAI TTS implementation of the synthesis repository.
///
/// The model is multilingual, so the language only steers voice selection.
pub struct OpenAiSynthesisRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    default_voice: String,
}

impl OpenAiSynthesisRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String, default_voice: String) -> Self {
        Self {
            client,
            model,
            default_voice,
        }
    }

    fn voice_for_language(&self, language: &LanguageCode) -> Voice {
        if !self.default_voice.is_empty() {
            return parse_voice(&self.default_voice);
        }
        match language.as_str() {
            LanguageCode::HINDI | LanguageCode::MIXED => Voice::Nova,
            _ => Voice::Alloy,
        }
    }

    fn speech_model(&self) -> SpeechModel {
        match self.model.as_str() {
            "tts-1" => SpeechModel::Tts1,
            "tts-1-hd" => SpeechModel::Tts1Hd,
            other => SpeechModel::Other(other.to_string()),
        }
    }

    async fn call_openai(&self, text: &str, voice: Voice) -> Result<Vec<u8>, String> {
        let request = CreateSpeechRequest {
            model: self.speech_model(),
            input: text.to_string(),
            voice,
            response_format: None, // MP3
            speed: None,
        };

        let response = self.client.audio().speech(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                text_length = text.len(),
                "OpenAI TTS API call failed"
            );
            format!("OpenAI TTS error: {}", e)
        })?;

        Ok(response.bytes.to_vec())
    }
}

fn parse_voice(name: &str) -> Voice {
    match name.to_lowercase().as_str() {
        "echo" => Voice::Echo,
        "fable" => Voice::Fable,
        "onyx" => Voice::Onyx,
        "nova" => Voice::Nova,
        "shimmer" => Voice::Shimmer,
        _ => Voice::Alloy,
    }
}

#[async_trait]
impl SynthesisRepository for OpenAiSynthesisRepository {
    async fn synthesize(&self, text: &str, language: &LanguageCode) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();
        let voice = self.voice_for_language(language);
        let batches = split_into_batches(text, MAX_BATCH_SIZE);

        let mut audio_data = Vec::new();
        for batch in &batches {
            audio_data.extend(self.call_openai(batch, voice.clone()).await?);
        }

        tracing::info!(
            provider = "openai",
            model = %self.model,
            language = %language,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.chars().count(),
            batch_count = batches.len(),
            audio_size_bytes = audio_data.len(),
            "TTS synthesis completed"
        );

        Ok(audio_data)
    }

    fn provider(&self) -> &'static str {
        "openai"
    }
}
