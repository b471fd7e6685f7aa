//! Generation request types.

use crate::StoryLength;
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Where the story idea comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptSource {
    /// A prompt written by the user
    User(String),
    /// A concept synthesized from fixed vocabularies at run time
    Random,
}

/// An existing story the user wants reworked.
///
/// Only the title stage sees this; characters and scenes are always
/// regenerated from scratch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct UpdateContext {
    existing_title: String,
    instructions: String,
}

impl UpdateContext {
    /// Create an update context.
    pub fn new(existing_title: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self {
            existing_title: existing_title.into(),
            instructions: instructions.into(),
        }
    }
}

/// Everything the pipeline needs to start a run.
///
/// # Examples
///
/// ```
/// use fabula_core::{GenerationRequest, PromptSource, StoryLength};
///
/// let request = GenerationRequest::builder()
///     .source(PromptSource::User("A sci-fi adventure on Mars".into()))
///     .length(StoryLength::Short)
///     .genres(vec!["Sci-Fi".to_string()])
///     .build()
///     .unwrap();
///
/// assert_eq!(*request.length(), StoryLength::Short);
/// assert!(request.update().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into), build_fn(error = "fabula_error::BuilderError"))]
pub struct GenerationRequest {
    source: PromptSource,
    #[builder(default)]
    length: StoryLength,
    #[builder(default)]
    genres: Vec<String>,
    #[builder(default)]
    update: Option<UpdateContext>,
}

impl GenerationRequest {
    /// Creates a new builder for `GenerationRequest`.
    pub fn builder() -> GenerationRequestBuilder {
        GenerationRequestBuilder::default()
    }

    /// Shorthand for a user prompt with default length and no genres.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            source: PromptSource::User(prompt.into()),
            length: StoryLength::default(),
            genres: Vec::new(),
            update: None,
        }
    }

    /// Shorthand for a random concept.
    pub fn random() -> Self {
        Self {
            source: PromptSource::Random,
            length: StoryLength::default(),
            genres: Vec::new(),
            update: None,
        }
    }
}
