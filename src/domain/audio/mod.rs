pub mod error;
pub mod fallback;
pub mod hasher;
pub mod language;
pub mod model;
pub mod service;

pub use error::{ResolveError, StorageError};
pub use fallback::FallbackTable;
pub use hasher::{content_key, CacheKey};
pub use language::LanguageCode;
pub use model::{audio_filename, ContentRecord, RecordKind, ResolutionResult, SynthesisOutcome};
pub use service::{AudioResolver, AudioResolverApi};
