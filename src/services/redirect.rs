use std::sync::Arc;

use serde_json::json;
use tracing::trace;

use crate::errors::Result;
use crate::services::UrlRegistry;
use crate::storage::{ClickRecord, UrlRecord, Visit};

/// What the caller should do with a short-link path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectOutcome {
    /// Empty path segment
    Invalid,
    NotFound,
    /// Known code past its expiry; no click was recorded
    Expired(UrlRecord),
    /// Click recorded; navigate to `target`
    Redirect {
        target: String,
        record: UrlRecord,
        click: Option<ClickRecord>,
    },
}

pub struct RedirectService {
    registry: Arc<UrlRegistry>,
}

impl RedirectService {
    pub fn new(registry: Arc<UrlRegistry>) -> Self {
        Self { registry }
    }

    /// Resolve a path segment: lookup, then expiry check, then click
    /// tracking. Navigation is left to the caller.
    pub fn resolve(&self, path: &str, visit: &Visit<'_>) -> Result<RedirectOutcome> {
        let short_code = path.trim_matches('/');
        if short_code.is_empty() {
            trace!("Empty short link path rejected");
            return Ok(RedirectOutcome::Invalid);
        }

        let audit = self.registry.audit();
        audit.info("Attempting to redirect", json!({ "shortCode": short_code }));

        let Some(record) = self.registry.get_url_by_short_code(short_code) else {
            audit.warn("Short URL not found", json!({ "shortCode": short_code }));
            return Ok(RedirectOutcome::NotFound);
        };

        if record.is_expired {
            audit.warn(
                "Attempted to access expired URL",
                json!({ "shortCode": short_code }),
            );
            return Ok(RedirectOutcome::Expired(record));
        }

        let click = self.registry.track_click(short_code, visit)?;
        Ok(RedirectOutcome::Redirect {
            target: record.original_url.clone(),
            record,
            click,
        })
    }
}
