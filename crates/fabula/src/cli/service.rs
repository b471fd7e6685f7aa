//! Service and catalog command handlers.

use fabula_core::{FabulaConfig, StoryLength};
use fabula_error::FabulaResult;
use fabula_interface::Health;
use fabula_models::ZegaClient;
use std::fmt::Write as _;
use strum::IntoEnumIterator;

/// Query the generation service's health endpoint.
pub async fn check_health(config: &FabulaConfig) -> FabulaResult<()> {
    let client = ZegaClient::new(config.service())?;
    let status = client.health().await?;

    match status.version() {
        Some(version) => println!("{}: {} (version {})", client.base_url(), status.status(), version),
        None => println!("{}: {}", client.base_url(), status.status()),
    }
    Ok(())
}

/// Print the configured genre catalog and the story lengths.
pub fn list_genres(config: &FabulaConfig) {
    print!("{}", catalog_listing(config));
}

fn catalog_listing(config: &FabulaConfig) -> String {
    let mut out = String::from("Genres:\n");
    if config.genres().is_empty() {
        out.push_str("  (none configured)\n");
    }
    for genre in config.genres() {
        let _ = match genre.description() {
            Some(description) => writeln!(
                out,
                "{:>3}  {:<14} {}",
                genre.id(),
                genre.name(),
                description
            ),
            None => writeln!(out, "{:>3}  {}", genre.id(), genre.name()),
        };
    }

    out.push_str("\nLengths:\n");
    for length in StoryLength::iter() {
        let _ = writeln!(out, "  {:<10} {}", length.to_string(), length.summary());
    }
    out
}
