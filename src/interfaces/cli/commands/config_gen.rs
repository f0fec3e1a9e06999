//! Generate config command

use std::path::Path;

use colored::Colorize;

use crate::config::AppConfig;
use crate::interfaces::cli::CliError;

/// Generate example configuration file
pub fn config_generate(output_path: Option<String>, force: bool) -> Result<(), CliError> {
    let path = output_path.unwrap_or_else(|| "config.example.toml".to_string());

    if Path::new(&path).exists() && !force {
        return Err(CliError::CommandError(format!(
            "{} already exists. Use --force to overwrite.",
            path
        )));
    }

    println!(
        "{} {}",
        "Generating configuration file...".yellow(),
        path.blue()
    );

    match AppConfig::default().save_to_file(&path) {
        Ok(()) => {
            println!(
                "  {} {}",
                "Configuration file generated successfully".green(),
                path.blue()
            );
            Ok(())
        }
        Err(e) => Err(CliError::CommandError(format!(
            "Unable to write configuration file: {}",
            e
        ))),
    }
}
