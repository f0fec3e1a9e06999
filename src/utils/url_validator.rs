//! URL 验证模块
//!
//! 只要求字符串能解析为绝对 URL，不限制协议。

use url::Url;

/// URL 验证错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlValidationError {
    EmptyUrl,
    InvalidFormat(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "URL cannot be empty"),
            Self::InvalidFormat(msg) => write!(f, "Invalid URL format: {}", msg),
        }
    }
}

impl std::error::Error for UrlValidationError {}

/// 验证 URL 是否为合法的绝对 URL
///
/// 相对路径、缺少协议的主机名都会被拒绝。
pub fn validate_url(url: &str) -> Result<(), UrlValidationError> {
    if url.trim().is_empty() {
        return Err(UrlValidationError::EmptyUrl);
    }

    Url::parse(url).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    Ok(())
}
