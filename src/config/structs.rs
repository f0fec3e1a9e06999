use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// 存储后端类型
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Default,
    Display,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON document per key under `data_dir`
    #[default]
    File,
    /// Process-local map, lost on exit. Every CLI invocation starts empty,
    /// so this is only useful for tests.
    Memory,
}

/// 日志输出格式
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// 应用配置
///
/// 优先级：ENV > config.toml > 默认值
/// ENV 前缀：TL，分隔符：__
/// 示例：TL__LINKS__BASE_URL=https://sho.rt
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub links: LinksConfig,
    #[serde(default)]
    pub clicks: ClicksConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

/// 短链接生成配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    /// Origin prepended to short codes for display
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_validity_minutes")]
    pub default_validity_minutes: u32,
    #[serde(default = "default_code_length")]
    pub code_length: usize,
    /// Cap on generation retries; unset means retry until a free code is found
    #[serde(default)]
    pub max_code_attempts: Option<u32>,
    /// Largest batch the command line accepts
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
}

/// 点击记录配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClicksConfig {
    /// Agent recorded when a visit does not supply one
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Labels sampled for the click location
    #[serde(default = "default_locations")]
    pub locations: Vec<String>,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub enable_rotation: bool,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
}

// ============================================================
// Default value functions
// ============================================================

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_validity_minutes() -> u32 {
    30
}

fn default_code_length() -> usize {
    6
}

fn default_max_batch_size() -> usize {
    5
}

fn default_user_agent() -> String {
    format!("tinylinker/{}", env!("CARGO_PKG_VERSION"))
}

fn default_locations() -> Vec<String> {
    [
        "San Francisco, CA",
        "New York, NY",
        "Los Angeles, CA",
        "Chicago, IL",
        "Seattle, WA",
        "Boston, MA",
        "Austin, TX",
        "Denver, CO",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_backups() -> u32 {
    5
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: default_data_dir(),
        }
    }
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_validity_minutes: default_validity_minutes(),
            code_length: default_code_length(),
            max_code_attempts: None,
            max_batch_size: default_max_batch_size(),
        }
    }
}

impl Default for ClicksConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            locations: default_locations(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            file: None,
            enable_rotation: false,
            max_backups: default_max_backups(),
        }
    }
}
