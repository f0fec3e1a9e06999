use std::process;

use clap::Parser;
use tracing::{debug, warn};

use tinylinker::cli::Cli;
use tinylinker::clock::SystemClock;
use tinylinker::config::AppConfig;
use tinylinker::interfaces::cli::run_cli_command;
use tinylinker::system::init_logging;

fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref());

    // 日志 guard 必须存活到进程结束
    let log_guard = match init_logging(&config.logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("[WARN] Logging disabled: {}", e);
            None
        }
    };
    debug!("Using storage backend: {}", config.storage.backend);

    if let Err(e) = run_cli_command(cli.command, config, SystemClock::arc()) {
        warn!("Command failed: {}", e);
        eprintln!("{}", e.format_colored());
        drop(log_guard);
        process::exit(1);
    }
}
