//! CLI command definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use fabula_core::StoryLength;
use std::path::PathBuf;

/// Fabula - AI-assisted story generation
#[derive(Parser, Debug)]
#[command(name = "fabula")]
#[command(about = "Generate story outlines with an AI text-generation service", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file layered over the bundled defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a story from a prompt
    Generate {
        /// What the story should be about
        #[arg(long, short)]
        prompt: String,

        /// Existing story title to rework (enables update mode)
        #[arg(long, requires = "update_instructions")]
        update_title: Option<String>,

        /// How to rework the existing story
        #[arg(long, requires = "update_title")]
        update_instructions: Option<String>,

        #[command(flatten)]
        options: StoryOptions,
    },

    /// Generate a story from a random concept
    Random {
        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Check that the generation service is reachable
    Health,

    /// List the configured genres and the story lengths
    Genres,
}

/// Options shared by prompt-driven generation.
#[derive(Args, Debug)]
pub struct StoryOptions {
    /// Story length (short, medium, elaborate); defaults to the configured length
    #[arg(long, short)]
    pub length: Option<StoryLength>,

    /// Genre tag; repeat for several
    #[arg(long = "genre", short)]
    pub genres: Vec<String>,

    /// Output format
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_parses_repeated_genres() {
        let cli = Cli::try_parse_from([
            "fabula",
            "generate",
            "--prompt",
            "A sci-fi adventure on Mars",
            "--length",
            "short",
            "--genre",
            "Sci-Fi",
            "--genre",
            "Adventure",
            "--format",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Generate {
                prompt, options, ..
            } => {
                assert_eq!(prompt, "A sci-fi adventure on Mars");
                assert_eq!(options.length, Some(StoryLength::Short));
                assert_eq!(options.genres, vec!["Sci-Fi", "Adventure"]);
                assert_eq!(options.format, OutputFormat::Json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_update_flags_require_each_other() {
        let result = Cli::try_parse_from([
            "fabula",
            "generate",
            "--prompt",
            "x",
            "--update-title",
            "Old Title",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["fabula", "health", "-v", "--config", "custom.toml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn test_unknown_length_is_rejected() {
        assert!(Cli::try_parse_from(["fabula", "generate", "-p", "x", "-l", "epic"]).is_err());
    }
}
