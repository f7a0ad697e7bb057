use sha2::{Digest, Sha256};

/// Number of hex characters kept from the digest (64 bits).
pub const CACHE_KEY_LEN: usize = 16;

/// Content-addressed key derived from the text an asset speaks.
///
/// Two records with identical text share one key, and therefore one asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive the cache key for a text: truncated lowercase SHA-256 hex.
pub fn content_key(text: &str) -> CacheKey {
    let digest = format!("{:x}", Sha256::digest(text.as_bytes()));
    CacheKey(digest[..CACHE_KEY_LEN].to_string())
}

/// Numeric seed for a text, used for deterministic fallback selection.
pub fn content_seed(text: &str) -> u64 {
    let digest = Sha256::digest(text.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(head)
}
