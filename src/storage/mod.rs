//! Client-local key/value storage
//!
//! Everything the application keeps is a string value under a fixed key,
//! replaced wholesale on every write.

use std::sync::Arc;

use tracing::info;

use crate::config::{StorageBackend, StorageConfig};
use crate::errors::Result;

pub mod backend;
pub mod models;
pub mod record_store;

pub use backend::{FileStore, MemoryStore};
pub use models::{
    ClickRecord, CreateUrlRequest, LinkStatus, RegistryStats, UrlRecord, Visit, DIRECT_SOURCE,
    PLACEHOLDER_IP,
};
pub use record_store::{RecordStore, URLS_KEY};

/// Whole-value string storage keyed by name
///
/// A write replaces the previous value entirely; there are no partial
/// updates and no transactions across keys.
pub trait KeyValueStore: Send + Sync {
    /// `Ok(None)` when nothing was ever stored under `key`
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
    fn backend_name(&self) -> &'static str;
}

pub struct StorageFactory;

impl StorageFactory {
    pub fn create(config: &StorageConfig) -> Result<Arc<dyn KeyValueStore>> {
        let store: Arc<dyn KeyValueStore> = match config.backend {
            StorageBackend::File => Arc::new(FileStore::new(&config.data_dir)?),
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
        };
        info!("Using storage backend: {}", store.backend_name());
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_memory_backend() {
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            ..StorageConfig::default()
        };
        let store = StorageFactory::create(&config).unwrap();
        assert_eq!(store.backend_name(), "memory");
    }

    #[test]
    fn test_factory_file_backend_creates_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let data_dir = dir.path().join("state");
        let config = StorageConfig {
            backend: StorageBackend::File,
            data_dir: data_dir.to_string_lossy().into_owned(),
        };
        let store = StorageFactory::create(&config).unwrap();
        assert_eq!(store.backend_name(), "file");
        assert!(data_dir.is_dir());
    }
}
