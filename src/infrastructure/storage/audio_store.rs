use crate::domain::audio::StorageError;
use async_trait::async_trait;

/// Namespace of generated audio artifacts.
///
/// Artifacts are write-once: `write` on an existing filename leaves the first
/// payload in place. Errors are returned as-is; whether to fall back is the
/// resolver's decision.
#[async_trait]
pub trait AudioStore: Send + Sync {
    /// Prepare the namespace (e.g. create the directory). Idempotent.
    async fn ensure_namespace_ready(&self) -> Result<(), StorageError>;

    async fn exists(&self, filename: &str) -> Result<bool, StorageError>;

    /// Create the artifact if absent.
    ///
    /// Returns `true` if this call created it, `false` if it already existed.
    async fn write(&self, filename: &str, payload: &[u8]) -> Result<bool, StorageError>;

    /// Externally reachable address of a stored filename. No I/O.
    fn url_for(&self, filename: &str) -> String;

    /// Delete generated artifacts, keeping the numbered fallback assets.
    ///
    /// Returns how many artifacts were removed.
    async fn purge_generated(&self) -> Result<usize, StorageError>;
}
