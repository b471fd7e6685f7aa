//! Core data types for Fabula.
//!
//! This crate holds the story entities a generation run produces, the request
//! and progress types the pipeline speaks, and the layered configuration.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod genre;
mod length;
mod progress;
mod request;
mod story;
mod text;

pub use config::{
    FabulaConfig, PipelineConfig, PipelineConfigBuilder, ServiceConfig, ServiceConfigBuilder,
};
pub use genre::{Genre, genre_line};
pub use length::{SceneRange, StoryLength};
pub use progress::{Phase, PipelineProgress};
pub use request::{GenerationRequest, GenerationRequestBuilder, PromptSource, UpdateContext};
pub use story::{
    CharacterDraft, DEFAULT_POPULARITY, GeneratedStory, GeneratedStoryBuilder, MAX_POPULARITY,
    MIN_POPULARITY, SceneDraft, SceneDraftBuilder, clamp_popularity,
};
pub use text::truncate_chars;
