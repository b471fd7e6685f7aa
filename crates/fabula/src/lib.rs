//! Fabula - AI-assisted story generation
//!
//! Fabula turns a one-line idea into a titled story with a character roster,
//! a scene outline and writer credits by driving a remote text-generation
//! service through a fixed sequence of stages.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fabula::{FabulaConfig, GenerationRequest, StoryPipeline, ZegaClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = FabulaConfig::load()?;
//!     let client = ZegaClient::new(config.service())?;
//!     let pipeline = StoryPipeline::new(client, &config);
//!
//!     let story = pipeline
//!         .generate(&GenerationRequest::from_prompt("A lighthouse keeper finds a map"))
//!         .await?;
//!     println!("{}", story.title());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Fabula is organized as a workspace with focused crates:
//!
//! - `fabula_error` - Error types
//! - `fabula_core` - Story entities, requests, progress and configuration
//! - `fabula_interface` - `GenerationBackend` trait and wire types
//! - `fabula_models` - HTTP client for the generation service
//! - `fabula_pipeline` - Extraction, fallbacks, stage driver and reconciliation
//!
//! This crate re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod logging;

pub use logging::{LoggingConfig, init_logging};

pub use fabula_error::{
    BuilderError, BuilderErrorKind, ConfigError, FabulaError, FabulaErrorKind, FabulaResult,
    GenerationError, GenerationErrorKind, HttpError, JsonError,
};

pub use fabula_core::{
    CharacterDraft, FabulaConfig, GeneratedStory, GenerationRequest, Genre, Phase,
    PipelineConfig, PipelineProgress, PromptSource, SceneDraft, SceneRange, ServiceConfig,
    StoryLength, UpdateContext, genre_line,
};

pub use fabula_interface::{
    GenerationBackend, GenerationMode, Health, HealthStatus, LearnRequest, PredictRequest,
    PredictResponse,
};

pub use fabula_models::ZegaClient;

pub use fabula_pipeline::{RandomConcept, StoryPipeline, extract_json};
