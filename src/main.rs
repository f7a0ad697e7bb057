use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use avatar_teacher_backend::controllers::{
    audio::AudioController, content::ContentController, health::HealthState,
};
use avatar_teacher_backend::domain::audio::{AudioResolver, FallbackTable};
use avatar_teacher_backend::domain::content::ContentService;
use avatar_teacher_backend::infrastructure::config::{Config, LogFormat, TtsProvider};
use avatar_teacher_backend::infrastructure::db::{
    check_connection, close_pool, create_pool, run_migrations,
};
use avatar_teacher_backend::infrastructure::http::{build_router, start_http_server};
use avatar_teacher_backend::infrastructure::repositories::{
    FaqRepository, OpenAiSynthesisRepository, PollySynthesisRepository, SynthesisRepository,
    TopicRepository,
};
use avatar_teacher_backend::infrastructure::storage::LocalAudioStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        development = config.is_development(),
        "Starting Avatar Teacher Backend on {}:{}",
        config.host,
        config.port
    );

    // Create database connection pool
    let pool = create_pool(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    check_connection(&pool).await?;
    tracing::info!("Database connection verified");

    run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    let pool = Arc::new(pool);

    // Synthesis backend, absent in fallback-only mode
    let synthesizer = build_synthesizer(&config).await;

    // === DEPENDENCY INJECTION SETUP ===
    let store = Arc::new(LocalAudioStore::new(
        &config.audio_dir,
        &config.audio_url_prefix,
        &config.audio_extension,
    ));
    let fallback = FallbackTable::new(
        &config.audio_url_prefix,
        &config.audio_extension,
        config.fallback_topic_count,
        config.fallback_faq_count,
    );
    let audio_resolver = Arc::new(AudioResolver::new(
        store,
        synthesizer,
        fallback,
        &config.audio_extension,
        config.synthesis_gate_enabled,
    ));
    tracing::info!(
        audio_dir = %config.audio_dir,
        provider = audio_resolver.synthesis_provider().unwrap_or("none"),
        gate = config.synthesis_gate_enabled,
        "Audio resolver ready"
    );

    let topic_repo = Arc::new(TopicRepository::new(pool.clone()));
    let faq_repo = Arc::new(FaqRepository::new(pool.clone()));

    let content_service = Arc::new(ContentService::new(
        topic_repo,
        faq_repo,
        audio_resolver.clone(),
    ));

    let content_controller = Arc::new(ContentController::new(content_service.clone()));
    let audio_controller = Arc::new(AudioController::new(content_service));
    let health_state = HealthState {
        pool: pool.clone(),
        tts_provider: audio_resolver.synthesis_provider(),
    };

    let app = build_router(&config, health_state, content_controller, audio_controller);
    start_http_server(&config, app).await?;

    close_pool(&pool).await;
    Ok(())
}

async fn build_synthesizer(config: &Config) -> Option<Arc<dyn SynthesisRepository>> {
    match config.tts_provider {
        TtsProvider::None => {
            tracing::info!("No TTS provider configured, serving fallback audio only");
            None
        }
        TtsProvider::Polly => {
            tracing::info!("Initializing AWS Polly client with region: {}", config.aws_region);

            let has_access_key = std::env::var("AWS_ACCESS_KEY_ID").is_ok();
            let has_secret_key = std::env::var("AWS_SECRET_ACCESS_KEY").is_ok();
            if !has_access_key || !has_secret_key {
                tracing::warn!("AWS credentials not found in environment variables. Will attempt to use other credential providers");
            }

            let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(config.aws_region.clone()))
                .load()
                .await;
            let polly_client = aws_sdk_polly::Client::new(&aws_config);

            Some(Arc::new(PollySynthesisRepository::new(Arc::new(polly_client))))
        }
        TtsProvider::OpenAi => {
            let Some(api_key) = config.openai_api_key.as_deref() else {
                tracing::warn!("TTS_PROVIDER=openai but OPENAI_API_KEY is not set, serving fallback audio only");
                return None;
            };

            let client = async_openai::Client::with_config(
                async_openai::config::OpenAIConfig::new().with_api_key(api_key),
            );
            tracing::info!(model = %config.openai_tts_model, "OpenAI TTS client initialized");

            Some(Arc::new(OpenAiSynthesisRepository::new(
                Arc::new(client),
                config.openai_tts_model.clone(),
                config.openai_tts_voice.clone(),
            )))
        }
    }
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "avatar_teacher_backend=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
