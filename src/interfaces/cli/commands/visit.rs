//! Visit command: resolve a short link the way a browser would

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::{RedirectOutcome, RedirectService};
use crate::storage::Visit;

pub fn visit_link(
    redirect: &RedirectService,
    short_code: &str,
    source: Option<&str>,
    user_agent: Option<&str>,
) -> Result<(), CliError> {
    let visit = Visit { source, user_agent };

    match redirect.resolve(short_code, &visit)? {
        RedirectOutcome::Invalid => Err(CliError::Rejected("Invalid short URL".to_string())),
        RedirectOutcome::NotFound => Err(CliError::Rejected("Short URL not found".to_string())),
        RedirectOutcome::Expired(_) => Err(CliError::Rejected(
            "This short URL has expired".to_string(),
        )),
        RedirectOutcome::Redirect { target, click, .. } => {
            println!("{} {}", "Redirecting to:".bold().green(), target.blue().underline());
            if let Some(click) = click {
                println!(
                    "    click {} recorded from {}",
                    click.id.dimmed(),
                    click.location.yellow()
                );
            }
            Ok(())
        }
    }
}
