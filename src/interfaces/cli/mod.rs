//! CLI interface module
//!
//! Thin presentation layer over the registry and redirect services.

pub mod commands;

use std::fmt;
use std::sync::Arc;

use crate::cli::{Commands, ConfigCommands};
use crate::clock::Clock;
use crate::config::AppConfig;
use crate::errors::TinylinkerError;
use crate::runtime::{StartupContext, prepare_startup};
use commands::{
    add_link, batch_create, clear_expired, config_generate, list_links, remove_link,
    show_link, show_logs, show_stats, visit_link,
};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    ParseError(String),
    CommandError(String),
    /// Input rejected by a domain rule; the message is shown verbatim
    Rejected(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
            CliError::Rejected(msg) => msg.clone(),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
            CliError::Rejected(msg) => format!("{} {}", "✗".red().bold(), msg.white()),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<TinylinkerError> for CliError {
    fn from(err: TinylinkerError) -> Self {
        match err {
            TinylinkerError::BatchFailed(report) => CliError::Rejected(report.summary().to_string()),
            e if e.is_validation() => CliError::Rejected(e.message().to_string()),
            TinylinkerError::Config(msg) => CliError::CommandError(msg),
            e => CliError::StorageError(e.to_string()),
        }
    }
}

/// Run a CLI command from clap-parsed input
pub fn run_cli_command(
    cmd: Commands,
    config: AppConfig,
    clock: Arc<dyn Clock>,
) -> Result<(), CliError> {
    // Generate doesn't need storage, handle it separately
    if let Commands::Config {
        action: ConfigCommands::Generate { output_path, force },
    } = cmd
    {
        return config_generate(output_path, force);
    }

    let ctx = prepare_startup(config, clock)
        .map_err(|e| CliError::StorageError(format!("{:#}", e)))?;
    execute(cmd, &ctx)
}

/// Dispatch a command against an already prepared context
pub fn execute(cmd: Commands, ctx: &StartupContext) -> Result<(), CliError> {
    let registry = ctx.registry.as_ref();

    match cmd {
        Commands::Add {
            url,
            code,
            validity,
        } => add_link(registry, url, code, validity),

        Commands::Batch { file_path } => {
            batch_create(registry, &file_path, ctx.config.links.max_batch_size)
        }

        Commands::List { json } => list_links(registry, json),

        Commands::Show { short_code } => show_link(registry, &short_code),

        Commands::Visit {
            short_code,
            source,
            user_agent,
        } => visit_link(
            &ctx.redirect,
            &short_code,
            source.as_deref(),
            user_agent.as_deref(),
        ),

        Commands::Remove { id } => remove_link(registry, &id),

        Commands::ClearExpired => clear_expired(registry),

        Commands::Stats => show_stats(registry),

        Commands::Logs { limit, clear } => show_logs(&ctx.audit, limit, clear),

        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => config_generate(output_path, force),
    }
}
