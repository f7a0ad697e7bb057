use super::audio_store::AudioStore;
use crate::domain::audio::{RecordKind, StorageError};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Prefix of assets written by earlier releases, swept like generated ones
const LEGACY_PREFIX: &str = "tts";

/// Suffix of hidden staging files (`.{filename}.{nonce}.tmp`)
const STAGING_SUFFIX: &str = ".tmp";

/// Audio store backed by a local directory served as static files
pub struct LocalAudioStore {
    root: PathBuf,
    url_prefix: String,
    extension: String,
}

impl LocalAudioStore {
    pub fn new(root: impl Into<PathBuf>, url_prefix: &str, extension: &str) -> Self {
        Self {
            root: root.into(),
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    fn path_for(&self, filename: &str) -> Result<PathBuf, StorageError> {
        if filename.is_empty()
            || filename.starts_with('.')
            || filename.contains('/')
            || filename.contains('\\')
        {
            return Err(StorageError::InvalidFilename(filename.to_string()));
        }
        Ok(self.root.join(filename))
    }

    fn staging_path(&self, filename: &str) -> PathBuf {
        self.root.join(format!(
            ".{}.{}{}",
            filename,
            Uuid::new_v4().simple(),
            STAGING_SUFFIX
        ))
    }

    /// True for `{topic|faq|tts}_..._{suffix}.{ext}` where the last `_` segment
    /// is not a fallback number
    fn is_generated(&self, filename: &str) -> bool {
        let Some(stem) = filename
            .strip_suffix(self.extension.as_str())
            .and_then(|rest| rest.strip_suffix('.'))
        else {
            return false;
        };
        let (Some((prefix, _)), Some((_, last))) = (stem.split_once('_'), stem.rsplit_once('_'))
        else {
            return false;
        };

        let numbered = !last.is_empty() && last.chars().all(|c| c.is_ascii_digit());
        (RecordKind::from_prefix(prefix).is_some() || prefix == LEGACY_PREFIX) && !numbered
    }

    /// True for a staging file left behind by an interrupted write
    fn is_stale_staging(&self, filename: &str) -> bool {
        let Some((staged, _nonce)) = filename
            .strip_prefix('.')
            .and_then(|rest| rest.strip_suffix(STAGING_SUFFIX))
            .and_then(|rest| rest.rsplit_once('.'))
        else {
            return false;
        };
        staged
            .split_once('_')
            .is_some_and(|(prefix, _)| RecordKind::from_prefix(prefix).is_some())
    }

    /// Write the payload to `staging` and hard-link it to `target`, which
    /// fails if the target exists. The staging file is removed on every outcome.
    async fn publish(staging: &Path, target: &Path, payload: &[u8]) -> std::io::Result<()> {
        let published = async {
            tokio::fs::write(staging, payload).await?;
            tokio::fs::hard_link(staging, target).await
        }
        .await;

        if let Err(e) = tokio::fs::remove_file(staging).await {
            if e.kind() != ErrorKind::NotFound {
                tracing::warn!(path = %staging.display(), error = %e, "Failed to remove staging file");
            }
        }

        published
    }
}

#[async_trait]
impl AudioStore for LocalAudioStore {
    async fn ensure_namespace_ready(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    async fn exists(&self, filename: &str) -> Result<bool, StorageError> {
        let path = self.path_for(filename)?;
        Ok(tokio::fs::try_exists(&path).await?)
    }

    async fn write(&self, filename: &str, payload: &[u8]) -> Result<bool, StorageError> {
        let target = self.path_for(filename)?;
        if tokio::fs::try_exists(&target).await? {
            tracing::debug!(filename = %filename, "Audio artifact already exists, skipping write");
            return Ok(false);
        }

        let staging = self.staging_path(filename);
        match Self::publish(&staging, &target, payload).await {
            Ok(()) => {
                tracing::info!(
                    filename = %filename,
                    size_bytes = payload.len(),
                    "Audio artifact stored"
                );
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::debug!(filename = %filename, "Audio artifact created concurrently, keeping first");
                Ok(false)
            }
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn url_for(&self, filename: &str) -> String {
        format!("{}/{}", self.url_prefix, filename)
    }

    async fn purge_generated(&self) -> Result<usize, StorageError> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(StorageError::Io(e)),
        };

        let mut deleted = 0;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if !entry.file_type().await?.is_file() {
                continue;
            }

            if self.is_generated(name) {
                tokio::fs::remove_file(entry.path()).await?;
                tracing::info!(filename = %name, "Deleted generated audio");
                deleted += 1;
            } else if self.is_stale_staging(name) {
                // Not counted: never a published asset
                tokio::fs::remove_file(entry.path()).await?;
                tracing::debug!(filename = %name, "Deleted stale staging file");
            }
        }

        Ok(deleted)
    }
}
