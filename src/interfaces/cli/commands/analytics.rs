//! Statistics and log inspection commands

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::UrlRegistry;
use crate::system::{AuditLog, LogLevel};

pub fn show_stats(registry: &UrlRegistry) -> Result<(), CliError> {
    let stats = registry.stats();

    println!("{}", "URL Statistics".bold().green());
    println!("  {:<14} {}", "Total:", stats.total.to_string().cyan());
    println!("  {:<14} {}", "Active:", stats.active.to_string().green());
    println!("  {:<14} {}", "Expired:", stats.expired.to_string().red());
    println!(
        "  {:<14} {}",
        "Total clicks:",
        stats.total_clicks.to_string().yellow()
    );
    Ok(())
}

pub fn show_logs(audit: &AuditLog, limit: Option<usize>, clear: bool) -> Result<(), CliError> {
    if clear {
        let count = audit.len();
        audit.clear();
        println!("{} Cleared {} log entries", "✓".bold().green(), count);
        return Ok(());
    }

    let entries = audit.entries();
    if entries.is_empty() {
        println!("{} No log entries", "ℹ".bold().blue());
        return Ok(());
    }

    let skip = limit.map_or(0, |n| entries.len().saturating_sub(n));
    for entry in entries.iter().skip(skip) {
        let level = match entry.level {
            LogLevel::Info => "INFO ".green(),
            LogLevel::Warn => "WARN ".yellow(),
            LogLevel::Error => "ERROR".red(),
            LogLevel::Debug => "DEBUG".dimmed(),
        };
        let context = entry
            .context
            .as_ref()
            .map(|map| serde_json::Value::Object(map.clone()).to_string())
            .unwrap_or_default();
        println!(
            "{} {} {} {}",
            entry.timestamp.dimmed(),
            level,
            entry.message,
            context.dimmed()
        );
    }
    Ok(())
}
