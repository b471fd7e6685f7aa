//! The pipeline's stages as a tagged union.
//!
//! Each variant carries everything produced before it, so the driver never
//! needs flags to know where it is.

use crate::{CharacterOutline, SceneOutline, TitleDraft};
use fabula_core::{GeneratedStory, Phase, StoryLength};

/// Feedback rating for the title sample.
pub const TITLE_RATING: f32 = 5.0;
/// Feedback rating for the character sample.
pub const CHARACTER_RATING: f32 = 5.0;
/// Feedback rating for the scene sample.
pub const SCENE_RATING: f32 = 10.0;
/// Feedback rating for the writer sample.
pub const WRITER_RATING: f32 = 5.0;
/// Feedback rating for the whole-story sample.
pub const STORY_RATING: f32 = 5.0;

/// Where a run is and what it has so far.
#[derive(Debug, Clone)]
pub enum Stage {
    /// Nothing generated yet
    Title,
    /// Title known
    Characters {
        /// Title stage output
        title: TitleDraft,
    },
    /// Title and roster known
    Scenes {
        /// Title stage output
        title: TitleDraft,
        /// Character stage output
        characters: Vec<CharacterOutline>,
    },
    /// Everything but credits known
    Writers {
        /// Title stage output
        title: TitleDraft,
        /// Character stage output
        characters: Vec<CharacterOutline>,
        /// Scene stage output
        scenes: Vec<SceneOutline>,
    },
    /// All remote work done
    Finalize {
        /// Title stage output
        title: TitleDraft,
        /// Character stage output
        characters: Vec<CharacterOutline>,
        /// Scene stage output
        scenes: Vec<SceneOutline>,
        /// Writer stage output
        writers: String,
    },
    /// Story assembled
    Complete(GeneratedStory),
}

impl Stage {
    /// Progress phase for this stage.
    pub fn phase(&self) -> Phase {
        match self {
            Stage::Title => Phase::Title,
            Stage::Characters { .. } => Phase::Characters,
            Stage::Scenes { .. } => Phase::Scenes,
            Stage::Writers { .. } => Phase::Writers,
            Stage::Finalize { .. } => Phase::Finalize,
            Stage::Complete(_) => Phase::Complete,
        }
    }

    /// Progress percent on entering and leaving the stage.
    pub fn checkpoints(&self) -> (u8, u8) {
        match self {
            Stage::Title => (10, 15),
            Stage::Characters { .. } => (20, 30),
            Stage::Scenes { .. } => (35, 60),
            Stage::Writers { .. } => (65, 75),
            Stage::Finalize { .. } => (80, 100),
            Stage::Complete(_) => (100, 100),
        }
    }

    /// Label shown while the stage runs.
    pub fn label(&self, length: StoryLength) -> String {
        match self {
            Stage::Title => "Step 1/5: Creating story title and description...".to_string(),
            Stage::Characters { .. } => "Step 2/5: Designing main characters...".to_string(),
            Stage::Scenes { .. } => {
                let range = length.scene_range();
                format!("Step 3/5: Creating {}-{} scenes...", range.min(), range.max())
            }
            Stage::Writers { .. } => "Step 4/5: Adding writer credits...".to_string(),
            Stage::Finalize { .. } => "Step 5/5: Processing and finalizing...".to_string(),
            Stage::Complete(_) => "Story generated successfully!".to_string(),
        }
    }
}
