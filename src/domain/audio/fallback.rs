use super::hasher::content_seed;
use super::model::RecordKind;
use std::collections::BTreeMap;

/// Pre-provisioned numbered assets (`topic_1.mp3`, `faq_3.mp3`, ...) served
/// when synthesis is unavailable or fails.
#[derive(Debug, Clone)]
pub struct FallbackTable {
    topics: BTreeMap<u32, String>,
    faqs: BTreeMap<u32, String>,
}

impl FallbackTable {
    /// Build the table from the number of provisioned assets per kind.
    ///
    /// Index 1 is always present, since it is the default for unmapped indexes.
    pub fn new(url_prefix: &str, extension: &str, topic_count: u32, faq_count: u32) -> Self {
        Self {
            topics: Self::numbered(url_prefix, extension, RecordKind::Topic, topic_count),
            faqs: Self::numbered(url_prefix, extension, RecordKind::Faq, faq_count),
        }
    }

    fn numbered(
        url_prefix: &str,
        extension: &str,
        kind: RecordKind,
        count: u32,
    ) -> BTreeMap<u32, String> {
        let prefix = url_prefix.trim_end_matches('/');
        (1..=count.max(1))
            .map(|index| (index, format!("{}/{}_{}.{}", prefix, kind.prefix(), index, extension)))
            .collect()
    }

    /// Number of provisioned assets for a kind
    pub fn provisioned(&self, kind: RecordKind) -> u32 {
        self.entries(kind).len() as u32
    }

    /// Pick the fallback for a text: `seed(text) mod table_size`, 1-based.
    ///
    /// Total: a zero table size is treated as one, and an index with no
    /// provisioned asset maps to index 1.
    pub fn fallback_for(&self, kind: RecordKind, text: &str, table_size: u32) -> String {
        let table_size = u64::from(table_size.max(1));
        let index = (content_seed(text) % table_size) as u32 + 1;
        let entries = self.entries(kind);

        match entries.get(&index) {
            Some(url) => url.clone(),
            None => {
                tracing::debug!(
                    kind = %kind,
                    index = index,
                    "Fallback index not provisioned, using default asset"
                );
                entries.get(&1).cloned().unwrap_or_default()
            }
        }
    }

    fn entries(&self, kind: RecordKind) -> &BTreeMap<u32, String> {
        match kind {
            RecordKind::Topic => &self.topics,
            RecordKind::Faq => &self.faqs,
        }
    }
}
