use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Placeholder written into every click; no real address is ever captured.
pub const PLACEHOLDER_IP: &str = "xxx.xxx.xxx.xxx";

/// Source recorded when the visit carries no referrer.
pub const DIRECT_SOURCE: &str = "direct";

/// One shortened URL as persisted in the record store.
///
/// `short_url` and `is_expired` are derived at read time and never written
/// to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlRecord {
    pub id: String,
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub validity_minutes: u32,
    #[serde(default)]
    pub clicks: Vec<ClickRecord>,
    #[serde(skip)]
    pub short_url: String,
    #[serde(skip)]
    pub is_expired: bool,
}

impl UrlRecord {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Recompute the derived fields against `now` and the display origin
    pub fn refresh(&mut self, now: DateTime<Utc>, base_url: &str) {
        self.is_expired = self.is_expired_at(now);
        self.short_url = format!("{}/{}", base_url.trim_end_matches('/'), self.short_code);
    }

    pub fn click_count(&self) -> usize {
        self.clicks.len()
    }

    /// Status as shown in the statistics listing
    pub fn status(&self) -> LinkStatus {
        if self.is_expired {
            LinkStatus::Expired
        } else if self.clicks.is_empty() {
            LinkStatus::NoClicks
        } else {
            LinkStatus::Active
        }
    }
}

/// One recorded visit to a short link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub user_agent: String,
    /// Sampled demo label, not derived from any network signal
    pub location: String,
    pub ip_address: String,
}

/// Request to shorten one URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlRequest {
    pub original_url: String,
    /// Minutes until expiry; `None` or `0` means the configured default
    #[serde(default)]
    pub validity_minutes: Option<u32>,
    /// User-chosen short code; `None` or empty means generate one
    #[serde(default)]
    pub custom_short_code: Option<String>,
}

impl CreateUrlRequest {
    pub fn new<T: Into<String>>(original_url: T) -> Self {
        Self {
            original_url: original_url.into(),
            ..Self::default()
        }
    }

    pub fn with_validity(mut self, minutes: u32) -> Self {
        self.validity_minutes = Some(minutes);
        self
    }

    pub fn with_short_code<T: Into<String>>(mut self, code: T) -> Self {
        self.custom_short_code = Some(code.into());
        self
    }
}

/// Caller-supplied context of a click
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Visit<'a> {
    /// Referrer; an empty string is treated the same as `None` and both
    /// record as "direct"
    pub source: Option<&'a str>,
    /// Agent string; `None` or empty falls back to the configured default
    pub user_agent: Option<&'a str>,
}

impl<'a> Visit<'a> {
    pub fn direct() -> Self {
        Self::default()
    }

    pub fn from_source(source: &'a str) -> Self {
        Self {
            source: Some(source),
            user_agent: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
pub enum LinkStatus {
    #[strum(serialize = "Active")]
    Active,
    #[strum(serialize = "No clicks")]
    NoClicks,
    #[strum(serialize = "Expired")]
    Expired,
}

/// Counts over the record store at one instant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryStats {
    pub total: usize,
    pub active: usize,
    pub expired: usize,
    pub total_clicks: usize,
}
