use crate::domain::audio::StorageError;
use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum ContentServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("{0} not found")]
    NotFound(String),
}

impl From<AppError> for ContentServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::BadRequest(msg) => ContentServiceError::Invalid(msg),
            AppError::NotFound(msg) => ContentServiceError::NotFound(msg),
            _ => ContentServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<StorageError> for ContentServiceError {
    fn from(err: StorageError) -> Self {
        ContentServiceError::Dependency(err.to_string())
    }
}

impl From<ContentServiceError> for AppError {
    fn from(err: ContentServiceError) -> Self {
        match err {
            ContentServiceError::Invalid(msg) => AppError::BadRequest(msg),
            ContentServiceError::NotFound(what) => AppError::NotFound(format!("{} not found", what)),
            ContentServiceError::Dependency(msg) => AppError::Internal(msg),
        }
    }
}
