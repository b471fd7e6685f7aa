//! Story entities produced by a generation run.
//!
//! Field names serialize in camelCase so a generated story can be handed
//! straight to a story form as initial values.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Lowest popularity a character can carry.
pub const MIN_POPULARITY: u8 = 1;
/// Highest popularity a character can carry.
pub const MAX_POPULARITY: u8 = 10;
/// Popularity assigned when none is given.
pub const DEFAULT_POPULARITY: u8 = 5;

/// Clamp an arbitrary popularity score into `[1, 10]`.
///
/// # Examples
///
/// ```
/// use fabula_core::clamp_popularity;
///
/// assert_eq!(clamp_popularity(0), 1);
/// assert_eq!(clamp_popularity(7), 7);
/// assert_eq!(clamp_popularity(42), 10);
/// ```
pub fn clamp_popularity(value: i64) -> u8 {
    value.clamp(MIN_POPULARITY as i64, MAX_POPULARITY as i64) as u8
}

/// A character in a generated story. The name is the identity key within a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDraft {
    name: String,
    description: String,
    role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    actor_name: Option<String>,
    popularity: u8,
}

impl CharacterDraft {
    /// Create a character, clamping popularity into `[1, 10]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fabula_core::CharacterDraft;
    ///
    /// let hero = CharacterDraft::new("Hero", "Brave", "Protagonist", 12);
    /// assert_eq!(*hero.popularity(), 10);
    /// ```
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        role: impl Into<String>,
        popularity: i64,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            role: role.into(),
            actor_name: None,
            popularity: clamp_popularity(popularity),
        }
    }

    /// Attach an actor name.
    pub fn with_actor_name(mut self, actor_name: impl Into<String>) -> Self {
        let actor_name = actor_name.into();
        self.actor_name = if actor_name.trim().is_empty() {
            None
        } else {
            Some(actor_name)
        };
        self
    }

    /// Case-insensitive name comparison.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// One scene of a generated story.
///
/// Characters are referenced by name, not by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into), build_fn(error = "fabula_error::BuilderError"))]
pub struct SceneDraft {
    /// Locally generated, unique within a run
    id: String,
    /// Short scene title
    event: String,
    /// Free text
    description: String,
    /// Names of characters appearing in the scene
    #[builder(default)]
    characters: Vec<String>,
    #[builder(default)]
    image_urls: Vec<String>,
    #[builder(default)]
    video_urls: Vec<String>,
    #[builder(default)]
    audio_urls: Vec<String>,
    /// Position in the scene list at creation time
    order: usize,
}

impl SceneDraft {
    /// Creates a new builder for `SceneDraft`.
    pub fn builder() -> SceneDraftBuilder {
        SceneDraftBuilder::default()
    }
}

/// The assembled result of one successful generation run.
///
/// Immutable once built; callers read it through getters or serialize it.
///
/// # Examples
///
/// ```
/// use fabula_core::{CharacterDraft, GeneratedStory, SceneDraft};
///
/// let scene = SceneDraft::builder()
///     .id("scene-1-0")
///     .event("Opening")
///     .description("It begins.")
///     .characters(vec!["Hero".to_string()])
///     .order(0usize)
///     .build()
///     .unwrap();
///
/// let story = GeneratedStory::builder()
///     .title("Red Dust")
///     .description("A tale of Mars.")
///     .scenes(vec![scene])
///     .characters(vec![CharacterDraft::new("Hero", "Brave", "Protagonist", 9)])
///     .writers(Some("Ann Author".to_string()))
///     .build()
///     .unwrap();
///
/// assert_eq!(story.scenes().len(), 1);
/// assert_eq!(story.character_named("hero").map(|c| c.role().as_str()), Some("Protagonist"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into), build_fn(error = "fabula_error::BuilderError"))]
pub struct GeneratedStory {
    title: String,
    description: String,
    scenes: Vec<SceneDraft>,
    characters: Vec<CharacterDraft>,
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    writers: Option<String>,
}

impl GeneratedStory {
    /// Creates a new builder for `GeneratedStory`.
    pub fn builder() -> GeneratedStoryBuilder {
        GeneratedStoryBuilder::default()
    }

    /// Look up a character by case-insensitive name.
    pub fn character_named(&self, name: &str) -> Option<&CharacterDraft> {
        self.characters.iter().find(|c| c.is_named(name))
    }
}
