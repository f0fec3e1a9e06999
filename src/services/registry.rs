//! URL registry service
//!
//! The only reader and writer of the record store. Every mutation reloads
//! the full collection, changes it in memory and writes it back in one
//! pass; callers are assumed to be a single writer.
//!
//! Result policy per operation:
//! - read paths (`get_all_urls`, `get_url_by_short_code`, `stats`) never
//!   fail; unreadable storage is logged and reads as empty.
//! - write paths (`create_*`, `delete_url`, `clear_expired_urls`) return
//!   `PersistenceFailure` when the store cannot be read back or written.
//! - `track_click` treats an unreadable store like an unknown code and only
//!   fails when the write itself fails.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::clock::Clock;
use crate::config::AppConfig;
use crate::errors::{BatchFailedItem, BatchFailure, Result, TinylinkerError};
use crate::storage::{
    ClickRecord, CreateUrlRequest, DIRECT_SOURCE, PLACEHOLDER_IP, RecordStore, RegistryStats,
    UrlRecord, Visit,
};
use crate::system::AuditLog;
use crate::utils::{generate_random_code, is_valid_short_code, sample_location, validate_url};

pub const INVALID_URL_MESSAGE: &str = "Invalid URL format";
pub const INVALID_SHORT_CODE_MESSAGE: &str =
    "Invalid shortcode format. Use 3-20 alphanumeric characters only.";
pub const SHORT_CODE_TAKEN_MESSAGE: &str =
    "Shortcode already exists. Please choose a different one.";
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save URL data";
pub const READ_FAILED_MESSAGE: &str = "Failed to read stored URL data";

/// Produces a candidate short code of the requested length
pub type CodeGenerator = Arc<dyn Fn(usize) -> String + Send + Sync>;

/// Registry tunables, normally taken from [`AppConfig`]
#[derive(Debug, Clone)]
pub struct RegistrySettings {
    pub base_url: String,
    pub default_validity_minutes: u32,
    pub code_length: usize,
    /// `None` retries generation until a free code turns up
    pub max_code_attempts: Option<u32>,
    pub user_agent: String,
    pub locations: Vec<String>,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for RegistrySettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            base_url: config.links.base_url.clone(),
            default_validity_minutes: config.links.default_validity_minutes,
            code_length: config.links.code_length,
            max_code_attempts: config.links.max_code_attempts,
            user_agent: config.clicks.user_agent.clone(),
            locations: config.clicks.locations.clone(),
        }
    }
}

pub struct UrlRegistry {
    store: RecordStore,
    clock: Arc<dyn Clock>,
    audit: Arc<AuditLog>,
    settings: RegistrySettings,
    generator: CodeGenerator,
}

impl UrlRegistry {
    pub fn new(
        store: RecordStore,
        clock: Arc<dyn Clock>,
        audit: Arc<AuditLog>,
        settings: RegistrySettings,
    ) -> Self {
        Self {
            store,
            clock,
            audit,
            settings,
            generator: Arc::new(generate_random_code),
        }
    }

    /// Replace the random code sampler
    pub fn with_code_generator(mut self, generator: CodeGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub fn settings(&self) -> &RegistrySettings {
        &self.settings
    }

    pub fn audit(&self) -> &Arc<AuditLog> {
        &self.audit
    }

    /// Current time as the registry sees it
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // ============ Validation ============

    /// Whether `url` parses as an absolute URL
    pub fn validate_url(url: &str) -> bool {
        validate_url(url).is_ok()
    }

    /// Whether `code` matches `^[A-Za-z0-9]{3,20}$`
    pub fn validate_short_code(code: &str) -> bool {
        is_valid_short_code(code)
    }

    // ============ Create ============

    /// Shorten one URL
    pub fn create_short_url(&self, request: &CreateUrlRequest) -> Result<UrlRecord> {
        self.audit.info(
            "Creating short URL",
            json!({ "originalUrl": request.original_url }),
        );

        if !Self::validate_url(&request.original_url) {
            self.audit
                .error(INVALID_URL_MESSAGE, json!({ "url": request.original_url }));
            return Err(TinylinkerError::invalid_url(INVALID_URL_MESSAGE));
        }

        let custom_code = request
            .custom_short_code
            .as_deref()
            .filter(|code| !code.is_empty());

        if let Some(code) = custom_code
            && !Self::validate_short_code(code)
        {
            self.audit
                .error(INVALID_SHORT_CODE_MESSAGE, json!({ "shortCode": code }));
            return Err(TinylinkerError::invalid_short_code(
                INVALID_SHORT_CODE_MESSAGE,
            ));
        }

        let mut records = self.load_for_write()?;

        let short_code = {
            let taken: HashSet<&str> = records.iter().map(|r| r.short_code.as_str()).collect();
            match custom_code {
                Some(code) if taken.contains(code) => {
                    self.audit
                        .error(SHORT_CODE_TAKEN_MESSAGE, json!({ "shortCode": code }));
                    return Err(TinylinkerError::short_code_taken(SHORT_CODE_TAKEN_MESSAGE));
                }
                Some(code) => code.to_string(),
                None => self.generate_unique_code(&taken)?,
            }
        };

        let validity_minutes = request
            .validity_minutes
            .filter(|minutes| *minutes > 0)
            .unwrap_or(self.settings.default_validity_minutes);
        let now = self.clock.now();

        let mut record = UrlRecord {
            id: Uuid::new_v4().to_string(),
            original_url: request.original_url.clone(),
            short_code,
            created_at: now,
            expires_at: now + Duration::minutes(i64::from(validity_minutes)),
            validity_minutes,
            clicks: Vec::new(),
            short_url: String::new(),
            is_expired: false,
        };

        records.push(record.clone());
        self.persist(&records)?;

        record.refresh(now, &self.settings.base_url);
        self.audit.info(
            "Short URL created successfully",
            json!({ "shortCode": record.short_code, "originalUrl": record.original_url }),
        );
        Ok(record)
    }

    /// Shorten several URLs, one at a time.
    ///
    /// Items that succeed stay persisted even if later items fail. Any
    /// failure turns the whole call into `BatchFailed`, naming each failed
    /// item by its 1-based position.
    pub fn create_multiple_urls(&self, requests: &[CreateUrlRequest]) -> Result<Vec<UrlRecord>> {
        let mut created = Vec::with_capacity(requests.len());
        let mut failures = Vec::new();

        for (index, request) in requests.iter().enumerate() {
            match self.create_short_url(request) {
                Ok(record) => created.push(record),
                Err(error) => failures.push(BatchFailedItem {
                    position: index + 1,
                    error,
                }),
            }
        }

        if failures.is_empty() {
            return Ok(created);
        }

        let report = BatchFailure::new(failures, created.len());
        let lines: Vec<&str> = report.summary().lines().collect();
        self.audit
            .warn("Some URLs failed to process", json!({ "errors": lines }));
        Err(TinylinkerError::BatchFailed(report))
    }

    // ============ Read ============

    /// Every stored record with `is_expired` computed as of now.
    ///
    /// Missing or unreadable storage yields an empty list.
    pub fn get_all_urls(&self) -> Vec<UrlRecord> {
        let now = self.clock.now();
        let mut records = match self.store.load() {
            Ok(records) => records,
            Err(e) => {
                self.audit.error(
                    "Failed to retrieve URLs from storage",
                    json!({ "error": e.to_string() }),
                );
                return Vec::new();
            }
        };
        for record in &mut records {
            record.refresh(now, &self.settings.base_url);
        }
        records
    }

    pub fn get_url_by_short_code(&self, short_code: &str) -> Option<UrlRecord> {
        self.get_all_urls()
            .into_iter()
            .find(|record| record.short_code == short_code)
    }

    pub fn stats(&self) -> RegistryStats {
        let records = self.get_all_urls();
        let expired = records.iter().filter(|r| r.is_expired).count();
        RegistryStats {
            total: records.len(),
            active: records.len() - expired,
            expired,
            total_clicks: records.iter().map(UrlRecord::click_count).sum(),
        }
    }

    // ============ Mutate ============

    /// Append a click to the record with `short_code`.
    ///
    /// Expiry is not checked here. Returns `None`, after logging a warning,
    /// when the code is unknown or the store cannot be read; nothing is
    /// written in either case.
    pub fn track_click(&self, short_code: &str, visit: &Visit<'_>) -> Result<Option<ClickRecord>> {
        let mut records = self.load_for_write().unwrap_or_default();

        let Some(record) = records.iter_mut().find(|r| r.short_code == short_code) else {
            self.audit.warn(
                "Attempted to track click for non-existent URL",
                json!({ "shortCode": short_code }),
            );
            return Ok(None);
        };

        let click = ClickRecord {
            id: Uuid::new_v4().to_string(),
            timestamp: self.clock.now(),
            source: visit
                .source
                .filter(|s| !s.is_empty())
                .unwrap_or(DIRECT_SOURCE)
                .to_string(),
            user_agent: visit
                .user_agent
                .filter(|ua| !ua.is_empty())
                .unwrap_or(&self.settings.user_agent)
                .to_string(),
            location: sample_location(&self.settings.locations),
            ip_address: PLACEHOLDER_IP.to_string(),
        };
        record.clicks.push(click.clone());

        self.persist(&records)?;
        self.audit.info(
            "Click tracked",
            json!({ "shortCode": short_code, "source": click.source, "clickId": click.id }),
        );
        Ok(Some(click))
    }

    /// Remove the record with `id`; returns whether one was removed.
    ///
    /// Unknown ids are a no-op and do not touch storage.
    pub fn delete_url(&self, id: &str) -> Result<bool> {
        let mut records = self.load_for_write()?;
        let before = records.len();
        records.retain(|record| record.id != id);

        if records.len() == before {
            debug!("delete_url: no record with id '{}'", id);
            return Ok(false);
        }

        self.persist(&records)?;
        self.audit.info("URL deleted", json!({ "id": id }));
        Ok(true)
    }

    /// Remove every record expired as of now; returns how many were removed
    pub fn clear_expired_urls(&self) -> Result<usize> {
        let now = self.clock.now();
        let mut records = self.load_for_write()?;
        let before = records.len();
        records.retain(|record| !record.is_expired_at(now));
        let removed = before - records.len();

        if removed > 0 {
            self.persist(&records)?;
        }
        self.audit
            .info("Expired URLs cleared", json!({ "removedCount": removed }));
        Ok(removed)
    }

    // ============ Internals ============

    /// Strict load for read-modify-write: an unreadable store aborts the
    /// mutation instead of being overwritten. The error is logged here.
    fn load_for_write(&self) -> Result<Vec<UrlRecord>> {
        self.store.load().map_err(|e| {
            self.audit.error(
                "Failed to retrieve URLs from storage",
                json!({ "error": e.to_string() }),
            );
            TinylinkerError::persistence_failure(READ_FAILED_MESSAGE)
        })
    }

    fn persist(&self, records: &[UrlRecord]) -> Result<()> {
        self.store.save(records).map_err(|e| {
            self.audit.error(
                "Failed to save URLs to storage",
                json!({ "error": e.to_string() }),
            );
            TinylinkerError::persistence_failure(SAVE_FAILED_MESSAGE)
        })
    }

    fn generate_unique_code(&self, taken: &HashSet<&str>) -> Result<String> {
        let mut attempts: u32 = 0;
        loop {
            let candidate = (self.generator)(self.settings.code_length);
            if !taken.contains(candidate.as_str()) {
                return Ok(candidate);
            }

            attempts = attempts.saturating_add(1);
            debug!("Generated short code '{}' is taken, retrying", candidate);
            if let Some(max) = self.settings.max_code_attempts
                && attempts >= max
            {
                self.audit.error(
                    "Short code generation exhausted",
                    json!({ "attempts": attempts }),
                );
                return Err(TinylinkerError::code_space_exhausted(format!(
                    "Could not find a free short code after {} attempts",
                    attempts
                )));
            }
        }
    }
}
