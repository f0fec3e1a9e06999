//! Link management commands

use colored::Colorize;
use serde::Serialize;

use crate::errors::TinylinkerError;
use crate::interfaces::cli::CliError;
use crate::services::UrlRegistry;
use crate::storage::{CreateUrlRequest, LinkStatus, UrlRecord};
use crate::utils::format_remaining;
use crate::utils::time_format::format_timestamp;

/// Form input is trimmed before it reaches the registry
fn normalize_request(request: CreateUrlRequest) -> CreateUrlRequest {
    CreateUrlRequest {
        original_url: request.original_url.trim().to_string(),
        validity_minutes: request.validity_minutes,
        custom_short_code: request
            .custom_short_code
            .map(|code| code.trim().to_string())
            .filter(|code| !code.is_empty()),
    }
}

fn print_created(record: &UrlRecord) {
    println!(
        "{} {} -> {} (expires: {})",
        "✓".bold().green(),
        record.short_url.cyan(),
        record.original_url.blue().underline(),
        format_timestamp(record.expires_at).yellow()
    );
    println!("    id: {}", record.id.dimmed());
}

pub fn add_link(
    registry: &UrlRegistry,
    url: String,
    code: Option<String>,
    validity: Option<u32>,
) -> Result<(), CliError> {
    let request = normalize_request(CreateUrlRequest {
        original_url: url,
        validity_minutes: validity,
        custom_short_code: code,
    });

    let record = registry.create_short_url(&request)?;
    print_created(&record);
    Ok(())
}

pub fn batch_create(
    registry: &UrlRegistry,
    file_path: &str,
    max_batch_size: usize,
) -> Result<(), CliError> {
    let content = std::fs::read_to_string(file_path)
        .map_err(|e| CliError::CommandError(format!("Failed to read {}: {}", file_path, e)))?;
    let requests: Vec<CreateUrlRequest> = serde_json::from_str(&content)
        .map_err(|e| CliError::ParseError(format!("Invalid batch file: {}", e)))?;

    let requests: Vec<CreateUrlRequest> = requests
        .into_iter()
        .map(normalize_request)
        .filter(|req| !req.original_url.is_empty())
        .collect();

    if requests.is_empty() {
        return Err(CliError::Rejected(
            "Please enter at least one URL".to_string(),
        ));
    }
    if requests.len() > max_batch_size {
        return Err(CliError::Rejected(format!(
            "At most {} URLs can be shortened at once, got {}",
            max_batch_size,
            requests.len()
        )));
    }

    match registry.create_multiple_urls(&requests) {
        Ok(records) => {
            println!(
                "{} Successfully created {} short URL{}",
                "✓".bold().green(),
                records.len(),
                if records.len() > 1 { "s" } else { "" }
            );
            for record in &records {
                print_created(record);
            }
            Ok(())
        }
        Err(TinylinkerError::BatchFailed(report)) => {
            if report.persisted > 0 {
                println!(
                    "{} {} of {} URLs were created before the failures below",
                    "ℹ".bold().blue(),
                    report.persisted,
                    requests.len()
                );
            }
            Err(CliError::Rejected(report.summary().to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListedLink<'a> {
    id: &'a str,
    short_code: &'a str,
    short_url: &'a str,
    original_url: &'a str,
    created_at: String,
    expires_at: String,
    is_expired: bool,
    status: String,
    clicks: usize,
}

pub fn list_links(registry: &UrlRegistry, json: bool) -> Result<(), CliError> {
    let records = registry.get_all_urls();

    if json {
        let listed: Vec<ListedLink<'_>> = records
            .iter()
            .map(|r| ListedLink {
                id: &r.id,
                short_code: &r.short_code,
                short_url: &r.short_url,
                original_url: &r.original_url,
                created_at: r.created_at.to_rfc3339(),
                expires_at: r.expires_at.to_rfc3339(),
                is_expired: r.is_expired,
                status: r.status().to_string(),
                clicks: r.click_count(),
            })
            .collect();
        let out = serde_json::to_string_pretty(&listed)
            .map_err(|e| CliError::CommandError(e.to_string()))?;
        println!("{}", out);
        return Ok(());
    }

    if records.is_empty() {
        println!(
            "{} No URLs have been created yet. Use `add` to create your first short link.",
            "ℹ".bold().blue()
        );
        return Ok(());
    }

    let now = registry.now();
    println!("{}", "Short link list:".bold().green());
    println!();
    for record in &records {
        let status = match record.status() {
            LinkStatus::Expired => record.status().to_string().red(),
            LinkStatus::NoClicks => record.status().to_string().yellow(),
            LinkStatus::Active => record.status().to_string().green(),
        };
        let remaining = if record.is_expired {
            format!("expired {}", format_timestamp(record.expires_at))
        } else {
            format!("expires in {}", format_remaining(now, record.expires_at))
        };
        println!(
            "  {} -> {} [{}] {} {}",
            record.short_code.cyan(),
            record.original_url.blue().underline(),
            status,
            format!("(clicks: {})", record.click_count()).dimmed().cyan(),
            format!("({})", remaining).dimmed().yellow()
        );
        println!("      id: {}", record.id.dimmed());
    }

    let expired = records.iter().filter(|r| r.is_expired).count();
    println!();
    println!(
        "{} Total {} short links",
        "ℹ".bold().blue(),
        records.len().to_string().green()
    );
    if expired > 0 {
        println!(
            "{} {} expired; run `clear-expired` to remove them",
            "ℹ".bold().blue(),
            expired.to_string().yellow()
        );
    }
    Ok(())
}

pub fn show_link(registry: &UrlRegistry, short_code: &str) -> Result<(), CliError> {
    let Some(record) = registry.get_url_by_short_code(short_code) else {
        return Err(CliError::Rejected("Short URL not found".to_string()));
    };

    println!("{} {}", "Short URL:".bold(), record.short_url.cyan());
    println!("{} {}", "Original URL:".bold(), record.original_url.blue());
    println!("{} {}", "Created:".bold(), format_timestamp(record.created_at));
    println!("{} {}", "Expires:".bold(), format_timestamp(record.expires_at));
    println!("{} {}", "Status:".bold(), record.status());
    println!("{} {}", "Total Clicks:".bold(), record.click_count());
    println!();

    if record.clicks.is_empty() {
        println!("{} No clicks recorded yet.", "ℹ".bold().blue());
        return Ok(());
    }

    for click in &record.clicks {
        println!(
            "  {} {} from {} ({})",
            format_timestamp(click.timestamp).dimmed(),
            click.source.cyan(),
            click.location.yellow(),
            click.ip_address.dimmed()
        );
        println!("      {}", click.user_agent.dimmed());
    }
    Ok(())
}

pub fn remove_link(registry: &UrlRegistry, id: &str) -> Result<(), CliError> {
    if registry.delete_url(id)? {
        println!("{} Removed short link {}", "✓".bold().green(), id.magenta());
    } else {
        println!("{} No short link with id {}", "ℹ".bold().blue(), id.magenta());
    }
    Ok(())
}

pub fn clear_expired(registry: &UrlRegistry) -> Result<(), CliError> {
    let removed = registry.clear_expired_urls()?;
    println!(
        "{} Cleared {} expired URL{}",
        "✓".bold().green(),
        removed.to_string().yellow(),
        if removed == 1 { "" } else { "s" }
    );
    Ok(())
}
