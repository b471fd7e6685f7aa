//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the fabula binary.

mod commands;
mod generate;
mod output;
mod service;

pub use commands::{Cli, Commands};
pub use generate::{run_generate, run_random};
pub use service::{check_health, list_genres};
