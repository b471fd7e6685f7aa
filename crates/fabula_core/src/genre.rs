//! Genre tags offered to the generator.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A genre tag that can be attached to a generation request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct Genre {
    id: u32,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl Genre {
    /// Create a genre without a description.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Render genre names the way prompts expect them.
///
/// An empty selection reads as `General Fiction`.
///
/// # Examples
///
/// ```
/// use fabula_core::genre_line;
///
/// assert_eq!(genre_line(&[]), "General Fiction");
/// assert_eq!(
///     genre_line(&["Sci-Fi".to_string(), "Adventure".to_string()]),
///     "Sci-Fi, Adventure"
/// );
/// ```
pub fn genre_line(genres: &[String]) -> String {
    let names: Vec<&str> = genres
        .iter()
        .map(|g| g.trim())
        .filter(|g| !g.is_empty())
        .collect();
    if names.is_empty() {
        "General Fiction".to_string()
    } else {
        names.join(", ")
    }
}
