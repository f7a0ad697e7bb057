use serde::{Deserialize, Serialize};

/// Two-letter language code attached to a topic or FAQ.
///
/// The set is open: codes are normalized (trimmed, lowercased) and passed
/// through to the synthesis provider, which decides whether it can speak them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    pub const ENGLISH: &'static str = "en";
    pub const HINDI: &'static str = "hi";
    /// Bilingual Hindi/English content
    pub const MIXED: &'static str = "mixed";

    pub fn new(code: &str) -> Self {
        let normalized = code.trim().to_lowercase();
        if normalized.is_empty() {
            Self::english()
        } else {
            Self(normalized)
        }
    }

    pub fn english() -> Self {
        Self(Self::ENGLISH.to_string())
    }

    pub fn hindi() -> Self {
        Self(Self::HINDI.to_string())
    }

    /// Get the code as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self::english()
    }
}

impl From<String> for LanguageCode {
    fn from(code: String) -> Self {
        Self::new(&code)
    }
}

impl From<&str> for LanguageCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
