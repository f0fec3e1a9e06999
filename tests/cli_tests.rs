//! CLI dispatch tests
//!
//! Commands are parsed with clap and executed in-process against a
//! temporary data directory.

use std::fs;

use clap::Parser;
use tempfile::TempDir;
use tinylinker::cli::Cli;
use tinylinker::clock::SystemClock;
use tinylinker::config::{AppConfig, StorageBackend};
use tinylinker::interfaces::cli::{CliError, execute, run_cli_command};
use tinylinker::runtime::{StartupContext, prepare_startup};

fn setup_context(temp_dir: &TempDir) -> StartupContext {
    let mut config = AppConfig::default();
    config.storage.backend = StorageBackend::File;
    config.storage.data_dir = temp_dir.path().join("data").to_string_lossy().into_owned();
    prepare_startup(config, SystemClock::arc()).unwrap()
}

fn run(ctx: &StartupContext, args: &[&str]) -> Result<(), CliError> {
    let mut argv = vec!["tinylinker"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    execute(cli.command, ctx)
}

#[test]
fn test_add_list_show_remove() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = setup_context(&temp_dir);

    run(&ctx, &["add", "https://example.com", "--code", "demo1"]).unwrap();
    run(&ctx, &["list"]).unwrap();
    run(&ctx, &["list", "--json"]).unwrap();
    run(&ctx, &["show", "demo1"]).unwrap();

    let record = ctx.registry.get_url_by_short_code("demo1").unwrap();
    run(&ctx, &["remove", &record.id]).unwrap();
    assert!(ctx.registry.get_all_urls().is_empty());
}

#[test]
fn test_add_rejects_invalid_input() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = setup_context(&temp_dir);

    let err = run(&ctx, &["add", "not a url"]).unwrap_err();
    assert_eq!(err.to_string(), "Invalid URL format");

    let err = run(&ctx, &["add", "https://example.com", "--code", "ab"]).unwrap_err();
    assert!(matches!(err, CliError::Rejected(_)));
}

#[test]
fn test_visit_records_click_and_reports_missing() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = setup_context(&temp_dir);

    run(&ctx, &["add", "https://example.com", "--code", "hop42"]).unwrap();
    run(&ctx, &["visit", "hop42", "--source", "newsletter"]).unwrap();

    let record = ctx.registry.get_url_by_short_code("hop42").unwrap();
    assert_eq!(record.clicks.len(), 1);
    assert_eq!(record.clicks[0].source, "newsletter");

    let err = run(&ctx, &["visit", "nope"]).unwrap_err();
    assert_eq!(err.to_string(), "Short URL not found");
}

#[test]
fn test_batch_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = setup_context(&temp_dir);
    let batch = temp_dir.path().join("batch.json");
    fs::write(
        &batch,
        r#"[
            {"originalUrl": "https://a.example"},
            {"originalUrl": "not a url"},
            {"originalUrl": "https://c.example", "customShortCode": "cee"}
        ]"#,
    )
    .unwrap();

    let err = run(&ctx, &["batch", batch.to_str().unwrap()]).unwrap_err();
    assert_eq!(err.to_string(), "URL 2: Invalid URL format");
    assert_eq!(ctx.registry.get_all_urls().len(), 2);
    assert!(ctx.registry.get_url_by_short_code("cee").is_some());
}

#[test]
fn test_batch_over_limit_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = setup_context(&temp_dir);
    let batch = temp_dir.path().join("batch.json");
    let items: Vec<String> = (0..6)
        .map(|i| format!(r#"{{"originalUrl": "https://{}.example"}}"#, i))
        .collect();
    fs::write(&batch, format!("[{}]", items.join(","))).unwrap();

    let err = run(&ctx, &["batch", batch.to_str().unwrap()]).unwrap_err();
    assert!(matches!(err, CliError::Rejected(_)));
    assert!(ctx.registry.get_all_urls().is_empty());
}

#[test]
fn test_stats_logs_and_clear_expired() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = setup_context(&temp_dir);

    run(&ctx, &["add", "https://example.com"]).unwrap();
    run(&ctx, &["clear-expired"]).unwrap();
    assert_eq!(ctx.registry.get_all_urls().len(), 1);

    run(&ctx, &["stats"]).unwrap();
    run(&ctx, &["logs", "--limit", "3"]).unwrap();
    assert!(!ctx.audit.is_empty());

    run(&ctx, &["logs", "--clear"]).unwrap();
    assert!(ctx.audit.is_empty());
}

#[test]
fn test_state_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    {
        let ctx = setup_context(&temp_dir);
        run(&ctx, &["add", "https://example.com", "--code", "keep1"]).unwrap();
    }

    let ctx = setup_context(&temp_dir);
    assert!(ctx.registry.get_url_by_short_code("keep1").is_some());
    assert!(!ctx.audit.is_empty());
}

#[test]
fn test_config_generate_needs_no_storage() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("generated.toml");
    let cli = Cli::try_parse_from([
        "tinylinker",
        "config",
        "generate",
        output.to_str().unwrap(),
    ])
    .unwrap();

    let mut config = AppConfig::default();
    config.storage.data_dir = temp_dir.path().join("unused").to_string_lossy().into_owned();
    run_cli_command(cli.command, config, SystemClock::arc()).unwrap();

    assert!(output.exists());
    assert!(!temp_dir.path().join("unused").exists());
    let parsed = AppConfig::try_load(Some(output.to_str().unwrap())).unwrap();
    assert_eq!(parsed.links.code_length, 6);
}
