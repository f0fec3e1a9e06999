use std::path::Path;

use super::AppConfig;
use crate::errors::{Result, TinylinkerError};
use crate::utils::{MAX_SHORT_CODE_LEN, MIN_SHORT_CODE_LEN};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

impl AppConfig {
    /// 从 TOML 文件和环境变量加载配置，失败时回退到默认值
    pub fn load(path: Option<&str>) -> Self {
        match Self::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("[ERROR] {}", e);
                Self::default()
            }
        }
    }

    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > 配置文件 > 默认值
    pub fn try_load(path: Option<&str>) -> Result<Self> {
        use config::{Config, Environment, File};

        let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

        let settings = Config::builder()
            // 1. 从 TOML 文件加载（可选）
            .add_source(File::with_name(path).required(false))
            // 2. 从环境变量覆盖，前缀 TL，分隔符 __
            .add_source(
                Environment::with_prefix("TL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config = settings.try_deserialize::<AppConfig>()?;
        config.validate()?;

        if Path::new(path).exists() {
            eprintln!("[INFO] Configuration loaded from: {}", path);
        }
        Ok(config)
    }

    /// 校验配置项之间的约束
    pub fn validate(&self) -> Result<()> {
        let len = self.links.code_length;
        if !(MIN_SHORT_CODE_LEN..=MAX_SHORT_CODE_LEN).contains(&len) {
            return Err(TinylinkerError::config(format!(
                "links.code_length must be between {} and {}, got {}",
                MIN_SHORT_CODE_LEN, MAX_SHORT_CODE_LEN, len
            )));
        }
        if self.links.default_validity_minutes == 0 {
            return Err(TinylinkerError::config(
                "links.default_validity_minutes must be positive",
            ));
        }
        if self.links.max_code_attempts == Some(0) {
            return Err(TinylinkerError::config(
                "links.max_code_attempts must be positive when set",
            ));
        }
        if self.links.max_batch_size == 0 {
            return Err(TinylinkerError::config(
                "links.max_batch_size must be positive",
            ));
        }
        if self.clicks.locations.is_empty() {
            return Err(TinylinkerError::config(
                "clicks.locations must contain at least one label",
            ));
        }
        url::Url::parse(&self.links.base_url).map_err(|e| {
            TinylinkerError::config(format!("links.base_url is not a valid URL: {}", e))
        })?;
        Ok(())
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TinylinkerError::serialization(e.to_string()))?;

        // Create parent directories if needed
        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}
