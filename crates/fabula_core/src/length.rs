//! Story length presets.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Inclusive bounds on the number of scenes requested from the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct SceneRange {
    min: usize,
    max: usize,
}

impl SceneRange {
    /// Whether `count` falls within the range.
    pub fn contains(&self, count: usize) -> bool {
        (self.min..=self.max).contains(&count)
    }
}

/// How long a generated story should be.
///
/// # Examples
///
/// ```
/// use fabula_core::StoryLength;
/// use std::str::FromStr;
///
/// let length = StoryLength::from_str("short").unwrap();
/// assert_eq!(*length.scene_range().min(), 3);
/// assert_eq!(*length.scene_range().max(), 5);
/// assert_eq!(length.to_string(), "short");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::VariantArray,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StoryLength {
    /// 3-5 scenes, quick story
    Short,
    /// 8-12 scenes, balanced narrative
    #[default]
    Medium,
    /// 15-25 scenes, detailed epic
    Elaborate,
}

impl StoryLength {
    /// Scene count bounds for this length.
    pub fn scene_range(&self) -> SceneRange {
        match self {
            StoryLength::Short => SceneRange { min: 3, max: 5 },
            StoryLength::Medium => SceneRange { min: 8, max: 12 },
            StoryLength::Elaborate => SceneRange { min: 15, max: 25 },
        }
    }

    /// One-line description shown next to the option.
    pub fn summary(&self) -> &'static str {
        match self {
            StoryLength::Short => "3-5 scenes, quick story",
            StoryLength::Medium => "8-12 scenes, balanced narrative",
            StoryLength::Elaborate => "15-25 scenes, detailed epic",
        }
    }
}
