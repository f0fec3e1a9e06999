use std::sync::Arc;

use tracing::debug;

use super::{KeyValueStore, UrlRecord};
use crate::errors::{Result, TinylinkerError};

/// Fixed key holding the serialized record collection
pub const URLS_KEY: &str = "shortened-urls";

/// The whole collection of [`UrlRecord`]s as one JSON array.
///
/// `load` and `save` move the entire collection; there is no per-record
/// access at this layer.
#[derive(Clone)]
pub struct RecordStore {
    backend: Arc<dyn KeyValueStore>,
}

impl RecordStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Read every record; an absent key is an empty collection.
    ///
    /// Derived fields are left at their defaults.
    pub fn load(&self) -> Result<Vec<UrlRecord>> {
        match self.backend.get_item(URLS_KEY)? {
            None => Ok(Vec::new()),
            Some(raw) if raw.trim().is_empty() => Ok(Vec::new()),
            Some(raw) => {
                let records: Vec<UrlRecord> = serde_json::from_str(&raw).map_err(|e| {
                    TinylinkerError::serialization(format!("Failed to parse stored URLs: {}", e))
                })?;
                debug!("Loaded {} records from '{}'", records.len(), URLS_KEY);
                Ok(records)
            }
        }
    }

    /// Replace the stored collection with `records`
    pub fn save(&self, records: &[UrlRecord]) -> Result<()> {
        let json = serde_json::to_string(records)?;
        self.backend.set_item(URLS_KEY, &json)?;
        debug!("Saved {} records to '{}'", records.len(), URLS_KEY);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::{Duration, TimeZone, Utc};

    fn record(code: &str) -> UrlRecord {
        let created_at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        UrlRecord {
            id: format!("id-{}", code),
            original_url: "https://example.com".to_string(),
            short_code: code.to_string(),
            created_at,
            expires_at: created_at + Duration::minutes(30),
            validity_minutes: 30,
            clicks: Vec::new(),
            short_url: String::new(),
            is_expired: false,
        }
    }

    #[test]
    fn test_absent_and_blank_load_empty() {
        let backend = Arc::new(MemoryStore::new());
        let store = RecordStore::new(backend.clone());
        assert!(store.load().unwrap().is_empty());

        backend.set_item(URLS_KEY, "  ").unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_preserves_order() {
        let store = RecordStore::new(Arc::new(MemoryStore::new()));
        store.save(&[record("aaa"), record("bbb"), record("ccc")]).unwrap();

        let codes: Vec<String> = store
            .load()
            .unwrap()
            .into_iter()
            .map(|r| r.short_code)
            .collect();
        assert_eq!(codes, vec!["aaa", "bbb", "ccc"]);
    }

    #[test]
    fn test_corrupt_blob_is_an_error() {
        let backend = Arc::new(MemoryStore::new());
        backend.set_item(URLS_KEY, "{not json").unwrap();
        let store = RecordStore::new(backend);
        assert!(matches!(
            store.load(),
            Err(TinylinkerError::Serialization(_))
        ));
    }
}
