//! Fabula CLI binary.
//!
//! This binary provides command-line access to Fabula's functionality:
//! - Generate a story from a prompt, optionally reworking an existing one
//! - Generate a story from a random concept
//! - Check the generation service and list offered genres

use clap::Parser;
use fabula::{FabulaConfig, LoggingConfig, init_logging};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, check_health, list_genres, run_generate, run_random};

    // Credentials may live in a .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(&LoggingConfig::from_verbose(cli.verbose).with_json_logs(cli.json_logs))?;

    let config = match &cli.config {
        Some(path) => FabulaConfig::from_file(path)?,
        None => FabulaConfig::load()?,
    };
    tracing::debug!(base_url = %config.service().base_url(), "Configuration loaded");

    let outcome = match cli.command {
        Commands::Generate {
            prompt,
            update_title,
            update_instructions,
            options,
        } => run_generate(&config, prompt, update_title, update_instructions, options).await,
        Commands::Random { format } => run_random(&config, format).await,
        Commands::Health => check_health(&config).await,
        Commands::Genres => {
            list_genres(&config);
            Ok(())
        }
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e.user_message());
        std::process::exit(1);
    }

    Ok(())
}
