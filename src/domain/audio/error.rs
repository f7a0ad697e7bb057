/// Failures of the audio artifact namespace.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("audio storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid audio filename: {0}")]
    InvalidFilename(String),
}

/// Reasons a generation attempt did not produce a stored asset.
///
/// Never returned to callers of the resolver: each variant ends in a fallback URL.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("speech synthesis is not configured")]
    SynthesisUnavailable,
    #[error("speech synthesis failed: {0}")]
    SynthesisFailure(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("record has no text to synthesize")]
    EmptyText,
}

impl ResolveError {
    /// Log the condition at the level its kind deserves.
    pub fn report(&self, filename: &str) {
        match self {
            ResolveError::SynthesisUnavailable => {
                tracing::debug!(filename = %filename, "Synthesis unavailable, using fallback audio");
            }
            ResolveError::SynthesisFailure(reason) => {
                tracing::warn!(
                    filename = %filename,
                    reason = %reason,
                    "Synthesis failed, using fallback audio"
                );
            }
            ResolveError::Storage(e) => {
                tracing::error!(
                    filename = %filename,
                    error = %e,
                    "Audio storage failed, using fallback audio"
                );
            }
            ResolveError::EmptyText => {
                tracing::warn!(filename = %filename, "Empty record text, using fallback audio");
            }
        }
    }
}
