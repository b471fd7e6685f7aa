//! Stage outputs as parsed from the service, before normalization.
//!
//! Every field the model might omit is optional here; the finalize stage
//! decides the defaults.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Title stage output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct TitleDraft {
    title: String,
    #[serde(default)]
    description: String,
}

impl TitleDraft {
    /// Create a title draft.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// One character as the model described it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct CharacterOutline {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    actor_name: Option<String>,
    /// Models return numbers, numeric strings or nothing at all
    #[serde(default)]
    popularity: Option<serde_json::Value>,
}

impl CharacterOutline {
    /// A fully specified character.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        role: impl Into<String>,
        popularity: i64,
    ) -> Self {
        Self {
            name: Some(name.into()),
            description: Some(description.into()),
            role: Some(role.into()),
            actor_name: None,
            popularity: Some(serde_json::Value::from(popularity)),
        }
    }

    /// A character known only by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach a role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// The name if present and not blank.
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }

    /// Popularity as an integer, if the model gave a usable one.
    ///
    /// Zero counts as missing.
    pub fn popularity_score(&self) -> Option<i64> {
        let score = match self.popularity.as_ref()? {
            serde_json::Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f.round() as i64))?,
            serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?.round() as i64,
            _ => return None,
        };
        (score != 0).then_some(score)
    }
}

/// One scene as the model described it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
pub struct SceneOutline {
    #[serde(default)]
    event: Option<String>,
    #[serde(default)]
    description: Option<String>,
    /// Anything other than a list of names is ignored
    #[serde(default)]
    characters: serde_json::Value,
}

impl SceneOutline {
    /// Create a scene outline.
    pub fn new(
        event: impl Into<String>,
        description: impl Into<String>,
        characters: Vec<String>,
    ) -> Self {
        Self {
            event: Some(event.into()),
            description: Some(description.into()),
            characters: serde_json::Value::from(characters),
        }
    }

    /// Character names referenced by the scene, skipping non-string entries.
    pub fn character_names(&self) -> Vec<String> {
        match &self.characters {
            serde_json::Value::Array(items) => items
                .iter()
                .filter_map(|item| item.as_str())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// `{"characters": [...]}`
#[derive(Debug, Deserialize)]
pub(crate) struct CharacterPayload {
    #[serde(default)]
    pub(crate) characters: Vec<CharacterOutline>,
}

/// `{"scenes": [...]}`
#[derive(Debug, Deserialize)]
pub(crate) struct ScenePayload {
    pub(crate) scenes: Vec<SceneOutline>,
}

/// `{"writers": "..."}`
#[derive(Debug, Deserialize)]
pub(crate) struct WriterPayload {
    #[serde(default)]
    pub(crate) writers: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popularity_accepts_numbers_and_strings() {
        let parsed: CharacterOutline =
            serde_json::from_str(r#"{"name": "Ria", "popularity": "8"}"#).unwrap();
        assert_eq!(parsed.popularity_score(), Some(8));

        let parsed: CharacterOutline =
            serde_json::from_str(r#"{"name": "Ria", "popularity": 6.6}"#).unwrap();
        assert_eq!(parsed.popularity_score(), Some(7));

        let parsed: CharacterOutline =
            serde_json::from_str(r#"{"name": "Ria", "popularity": 0}"#).unwrap();
        assert_eq!(parsed.popularity_score(), None);
    }

    #[test]
    fn test_scene_characters_tolerate_bad_shapes() {
        let parsed: SceneOutline =
            serde_json::from_str(r#"{"event": "Opening", "characters": "Ria"}"#).unwrap();
        assert!(parsed.character_names().is_empty());

        let parsed: SceneOutline =
            serde_json::from_str(r#"{"event": "Opening", "characters": ["Ria", 3, "Tom"]}"#)
                .unwrap();
        assert_eq!(parsed.character_names(), vec!["Ria", "Tom"]);
    }

    #[test]
    fn test_actor_name_reads_camel_case() {
        let parsed: CharacterOutline =
            serde_json::from_str(r#"{"name": "Ria", "actorName": "Kim"}"#).unwrap();
        assert_eq!(parsed.actor_name().as_deref(), Some("Kim"));
    }
}
