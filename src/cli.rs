//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// Tinylinker - a local URL shortener
#[derive(Parser)]
#[command(name = "tinylinker")]
#[command(version)]
#[command(about = "Shorten URLs with expiring codes and local click analytics", long_about = None)]
pub struct Cli {
    /// Configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Shorten a URL
    Add {
        /// Absolute URL to shorten
        url: String,

        /// Custom short code (3-20 letters or digits)
        #[arg(long)]
        code: Option<String>,

        /// Minutes until the link expires
        #[arg(long)]
        validity: Option<u32>,
    },

    /// Shorten every request in a JSON file
    ///
    /// The file holds an array of objects with `originalUrl` and optional
    /// `validityMinutes` and `customShortCode`.
    Batch {
        /// Input file path
        file_path: String,
    },

    /// List all short links with their status
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one short link with its click history
    Show {
        /// Short code
        short_code: String,
    },

    /// Resolve a short link as a visitor would, recording the click
    Visit {
        /// Short code (or path segment)
        short_code: String,

        /// Referrer to record (default: direct)
        #[arg(long)]
        source: Option<String>,

        /// User agent to record
        #[arg(long)]
        user_agent: Option<String>,
    },

    /// Remove a short link by id
    Remove {
        /// Record id
        id: String,
    },

    /// Remove every expired short link
    ClearExpired,

    /// Show totals across all short links
    Stats,

    /// Show the application log
    Logs {
        /// Only the most recent N entries
        #[arg(long)]
        limit: Option<usize>,

        /// Delete all entries
        #[arg(long)]
        clear: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_with_options() {
        let cli = Cli::try_parse_from([
            "tinylinker",
            "add",
            "https://example.com",
            "--code",
            "abc123",
            "--validity",
            "5",
        ])
        .unwrap();
        match cli.command {
            Commands::Add {
                url,
                code,
                validity,
            } => {
                assert_eq!(url, "https://example.com");
                assert_eq!(code.as_deref(), Some("abc123"));
                assert_eq!(validity, Some(5));
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["tinylinker", "stats", "-c", "custom.toml"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
        assert!(matches!(cli.command, Commands::Stats));
    }

    #[test]
    fn test_clear_expired_kebab_case() {
        let cli = Cli::try_parse_from(["tinylinker", "clear-expired"]).unwrap();
        assert!(matches!(cli.command, Commands::ClearExpired));
    }

    #[test]
    fn test_command_is_required() {
        assert!(Cli::try_parse_from(["tinylinker"]).is_err());
    }
}
