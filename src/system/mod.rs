//! Process-level plumbing: tracing setup and the persisted audit log

pub mod audit_log;
pub mod logging;

pub use audit_log::{AuditLog, LogEntry, LogLevel, LOGS_KEY};
pub use logging::init_logging;
