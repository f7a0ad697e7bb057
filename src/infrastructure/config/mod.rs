use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Audio namespace
    pub static_dir: String,
    pub audio_dir: String,
    pub audio_url_prefix: String,
    pub audio_extension: String,
    // Synthesis
    pub tts_provider: TtsProvider,
    pub aws_region: String,
    pub openai_api_key: Option<String>,
    pub openai_tts_model: String,
    pub openai_tts_voice: String,
    pub synthesis_gate_enabled: bool,
    // Fallback assets
    pub fallback_topic_count: u32,
    pub fallback_faq_count: u32,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Which synthesis backend to use; `None` runs in fallback-only mode
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TtsProvider {
    None,
    Polly,
    OpenAi,
}

impl TtsProvider {
    fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "polly" => TtsProvider::Polly,
            "openai" => TtsProvider::OpenAi,
            _ => TtsProvider::None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            database_url: env::var("DATABASE_URL")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT").as_deref() {
                Ok("production") => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
            audio_dir: env::var("AUDIO_DIR").unwrap_or_else(|_| "static/media/audio".to_string()),
            audio_url_prefix: env::var("AUDIO_URL_PREFIX")
                .unwrap_or_else(|_| "/static/media/audio".to_string()),
            audio_extension: env::var("AUDIO_EXTENSION").unwrap_or_else(|_| "mp3".to_string()),
            tts_provider: TtsProvider::parse(
                &env::var("TTS_PROVIDER").unwrap_or_else(|_| "none".to_string()),
            ),
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "ap-south-1".to_string()),
            openai_api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            openai_tts_model: env::var("OPENAI_TTS_MODEL").unwrap_or_else(|_| "tts-1".to_string()),
            openai_tts_voice: env::var("OPENAI_TTS_VOICE").unwrap_or_default(),
            synthesis_gate_enabled: env::var("SYNTHESIS_GATE_ENABLED")
                .map(|s| s.to_lowercase() != "false")
                .unwrap_or(true),
            fallback_topic_count: env::var("FALLBACK_TOPIC_COUNT")
                .unwrap_or_else(|_| "2".to_string())
                .parse()?,
            fallback_faq_count: env::var("FALLBACK_FAQ_COUNT")
                .unwrap_or_else(|_| "4".to_string())
                .parse()?,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}
