use std::fmt;

/// 批量创建中单个失败项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailedItem {
    /// 1-based position in the submitted batch
    pub position: usize,
    pub error: TinylinkerError,
}

/// 批量创建的汇总失败报告
///
/// 成功的条目已经持久化，这里只描述失败的条目。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub failures: Vec<BatchFailedItem>,
    pub persisted: usize,
    summary: String,
}

impl BatchFailure {
    pub fn new(failures: Vec<BatchFailedItem>, persisted: usize) -> Self {
        let summary = failures
            .iter()
            .map(|item| format!("URL {}: {}", item.position, item.error.message()))
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            failures,
            persisted,
            summary,
        }
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Positions (1-based) of every failed item
    pub fn positions(&self) -> Vec<usize> {
        self.failures.iter().map(|item| item.position).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TinylinkerError {
    InvalidUrl(String),
    InvalidShortCode(String),
    ShortCodeTaken(String),
    CodeSpaceExhausted(String),
    PersistenceFailure(String),
    BatchFailed(BatchFailure),
    Serialization(String),
    FileOperation(String),
    Config(String),
}

impl TinylinkerError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            TinylinkerError::InvalidUrl(_) => "E001",
            TinylinkerError::InvalidShortCode(_) => "E002",
            TinylinkerError::ShortCodeTaken(_) => "E003",
            TinylinkerError::CodeSpaceExhausted(_) => "E004",
            TinylinkerError::PersistenceFailure(_) => "E005",
            TinylinkerError::BatchFailed(_) => "E006",
            TinylinkerError::Serialization(_) => "E007",
            TinylinkerError::FileOperation(_) => "E008",
            TinylinkerError::Config(_) => "E009",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            TinylinkerError::InvalidUrl(_) => "Invalid URL",
            TinylinkerError::InvalidShortCode(_) => "Invalid Short Code",
            TinylinkerError::ShortCodeTaken(_) => "Short Code Taken",
            TinylinkerError::CodeSpaceExhausted(_) => "Code Space Exhausted",
            TinylinkerError::PersistenceFailure(_) => "Persistence Failure",
            TinylinkerError::BatchFailed(_) => "Batch Failed",
            TinylinkerError::Serialization(_) => "Serialization Error",
            TinylinkerError::FileOperation(_) => "File Operation Error",
            TinylinkerError::Config(_) => "Configuration Error",
        }
    }

    /// 获取错误详情（面向用户，可直接展示）
    pub fn message(&self) -> &str {
        match self {
            TinylinkerError::InvalidUrl(msg) => msg,
            TinylinkerError::InvalidShortCode(msg) => msg,
            TinylinkerError::ShortCodeTaken(msg) => msg,
            TinylinkerError::CodeSpaceExhausted(msg) => msg,
            TinylinkerError::PersistenceFailure(msg) => msg,
            TinylinkerError::BatchFailed(report) => report.summary(),
            TinylinkerError::Serialization(msg) => msg,
            TinylinkerError::FileOperation(msg) => msg,
            TinylinkerError::Config(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于 CLI 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for TinylinkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for TinylinkerError {}

// 便捷的构造函数
impl TinylinkerError {
    pub fn invalid_url<T: Into<String>>(msg: T) -> Self {
        TinylinkerError::InvalidUrl(msg.into())
    }

    pub fn invalid_short_code<T: Into<String>>(msg: T) -> Self {
        TinylinkerError::InvalidShortCode(msg.into())
    }

    pub fn short_code_taken<T: Into<String>>(msg: T) -> Self {
        TinylinkerError::ShortCodeTaken(msg.into())
    }

    pub fn code_space_exhausted<T: Into<String>>(msg: T) -> Self {
        TinylinkerError::CodeSpaceExhausted(msg.into())
    }

    pub fn persistence_failure<T: Into<String>>(msg: T) -> Self {
        TinylinkerError::PersistenceFailure(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        TinylinkerError::Serialization(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        TinylinkerError::FileOperation(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        TinylinkerError::Config(msg.into())
    }

    /// Whether this is a rule violation the user can fix by changing input
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TinylinkerError::InvalidUrl(_)
                | TinylinkerError::InvalidShortCode(_)
                | TinylinkerError::ShortCodeTaken(_)
        )
    }
}

impl From<std::io::Error> for TinylinkerError {
    fn from(err: std::io::Error) -> Self {
        TinylinkerError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for TinylinkerError {
    fn from(err: serde_json::Error) -> Self {
        TinylinkerError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for TinylinkerError {
    fn from(err: config::ConfigError) -> Self {
        TinylinkerError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TinylinkerError>;
