//! Configuration for the generation service and pipeline.
//!
//! The configuration system supports:
//! - Bundled defaults (include_str! from fabula.toml)
//! - User overrides (~/.config/fabula/fabula.toml, then ./fabula.toml)
//! - Environment overrides (`FABULA__SERVICE__TOKEN`, `FABULA__PIPELINE__COMPLETION_DELAY_MS`, ...)
//!
//! Credentials live here and are injected into clients; nothing reads them
//! from ambient state at call time.

use crate::{Genre, StoryLength};
use config::{Config, Environment, File, FileFormat};
use derive_builder::Builder;
use derive_getters::Getters;
use fabula_error::{ConfigError, FabulaError, FabulaResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../fabula.toml");

fn default_user_id() -> String {
    "default-user".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_completion_delay_ms() -> u64 {
    800
}

fn default_feedback_enabled() -> bool {
    true
}

/// Connection settings for the text-generation service.
///
/// # Example
///
/// ```toml
/// [service]
/// base_url = "http://localhost:8002"
/// token = "..."
/// user_id = "reader-42"
/// request_timeout_secs = 60
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Builder, Getters)]
#[builder(setter(into), build_fn(error = "fabula_error::BuilderError"))]
pub struct ServiceConfig {
    /// Base URL; `/predict`, `/learn` and `/health` are appended
    base_url: String,

    /// Bearer credential sent with every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    token: Option<String>,

    /// User id attributed to predictions and feedback
    #[serde(default = "default_user_id")]
    #[builder(default = "default_user_id()")]
    user_id: String,

    /// Per-call deadline
    #[serde(default = "default_request_timeout_secs")]
    #[builder(default = "default_request_timeout_secs()")]
    request_timeout_secs: u64,
}

impl ServiceConfig {
    /// Creates a new builder for `ServiceConfig`.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// Per-call deadline as a duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Pipeline behaviour knobs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Builder, Getters)]
#[builder(setter(into), build_fn(error = "fabula_error::BuilderError"))]
pub struct PipelineConfig {
    /// Pause between reaching 100% and handing the story over
    #[serde(default = "default_completion_delay_ms")]
    #[builder(default = "default_completion_delay_ms()")]
    completion_delay_ms: u64,

    /// Whether stage samples are posted to the feedback endpoint
    #[serde(default = "default_feedback_enabled")]
    #[builder(default = "default_feedback_enabled()")]
    feedback_enabled: bool,

    /// Length used when a request does not choose one
    #[serde(default)]
    #[builder(default)]
    default_length: StoryLength,
}

impl PipelineConfig {
    /// Creates a new builder for `PipelineConfig`.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Completion pause as a duration.
    pub fn completion_delay(&self) -> Duration {
        Duration::from_millis(self.completion_delay_ms)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            completion_delay_ms: default_completion_delay_ms(),
            feedback_enabled: default_feedback_enabled(),
            default_length: StoryLength::default(),
        }
    }
}

/// Top-level Fabula configuration.
///
/// # Example
///
/// ```no_run
/// use fabula_core::FabulaConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = FabulaConfig::load()?;
/// println!("Generating against {}", config.service().base_url());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Getters)]
pub struct FabulaConfig {
    service: ServiceConfig,

    #[serde(default)]
    pipeline: PipelineConfig,

    /// Offered genre catalog
    #[serde(default)]
    genres: Vec<Genre>,
}

impl FabulaConfig {
    /// Assemble a configuration from parts.
    pub fn new(service: ServiceConfig, pipeline: PipelineConfig, genres: Vec<Genre>) -> Self {
        Self {
            service,
            pipeline,
            genres,
        }
    }

    /// Load the bundled defaults only.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled file is malformed.
    pub fn bundled() -> FabulaResult<Self> {
        Self::finish(Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml)))
    }

    /// Load configuration from a specific file path layered over bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> FabulaResult<Self> {
        debug!("Loading configuration from file");

        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()));

        Self::finish(builder)
    }

    /// Load configuration with precedence: env > current dir > home dir > bundled default.
    ///
    /// User config files are optional and silently skipped when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if any present source fails to parse or the merged
    /// result is invalid.
    #[instrument]
    pub fn load() -> FabulaResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/fabula/fabula.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("fabula").required(false));

        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> FabulaResult<Self> {
        let config: Self = builder
            .add_source(
                Environment::with_prefix("FABULA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| {
                FabulaError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                FabulaError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Check invariants the loaders cannot express in serde.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or the timeout is zero.
    pub fn validate(&self) -> FabulaResult<()> {
        if self.service.base_url.trim().is_empty() {
            return Err(ConfigError::new("service.base_url must not be empty").into());
        }
        if self.service.request_timeout_secs == 0 {
            return Err(ConfigError::new("service.request_timeout_secs must be positive").into());
        }
        Ok(())
    }

    /// Find a genre in the catalog by case-insensitive name.
    pub fn genre_named(&self, name: &str) -> Option<&Genre> {
        self.genres
            .iter()
            .find(|g| g.name().eq_ignore_ascii_case(name.trim()))
    }
}
