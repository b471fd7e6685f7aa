//! Deterministic substitutes for stage output that fails to parse.
//!
//! Each stage tries regex field extraction on the raw text first and falls
//! back to a fixed placeholder when that finds nothing.

use crate::{CharacterOutline, SceneOutline, TitleDraft};
use regex::Regex;

/// Title used when none can be recovered.
pub const FALLBACK_TITLE: &str = "Untitled Story";
/// Description used when none can be recovered.
pub const FALLBACK_DESCRIPTION: &str = "An epic tale of adventure and discovery.";
/// Writer credit used when neither the model nor the genre table provides one.
pub const FALLBACK_WRITERS: &str = "AI Generated Writer";

/// Credits by lowercased genre name.
const GENRE_WRITERS: &[(&str, &str)] = &[
    ("sci-fi", "Isaac Asimov & Arthur C. Clarke"),
    ("fantasy", "J.R.R. Tolkien & C.S. Lewis"),
    ("horror", "Stephen King & Edgar Allan Poe"),
    ("romance", "Jane Austen & Nicholas Sparks"),
    ("mystery", "Agatha Christie & Arthur Conan Doyle"),
    ("thriller", "James Patterson & Lee Child"),
    ("adventure", "Jules Verne & Jack London"),
];

fn field_pattern(field: &str) -> Option<Regex> {
    Regex::new(&format!(
        r#"(?i)["']?\b{}\b["']?\s*:\s*["']([^"']+)["']"#,
        regex::escape(field)
    ))
    .ok()
}

/// Every quoted value of `field` in order of appearance.
///
/// Tolerates single quotes and unquoted keys; values containing quotes are cut
/// at the first one.
///
/// # Examples
///
/// ```
/// use fabula_pipeline::capture_all;
///
/// let text = r#"[{name: 'Ria'}, {"name": "Tom", "actorName": "Kim"}]"#;
/// assert_eq!(capture_all("name", text), vec!["Ria", "Tom"]);
/// ```
pub fn capture_all(field: &str, text: &str) -> Vec<String> {
    let Some(pattern) = field_pattern(field) else {
        return Vec::new();
    };
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

/// The first quoted value of `field`.
pub fn capture_first(field: &str, text: &str) -> Option<String> {
    capture_all(field, text).into_iter().next()
}

/// Recover a title from malformed output, or use the fixed placeholder.
///
/// Either field found on its own is kept; the other gets its placeholder.
pub fn fallback_title(raw: &str) -> TitleDraft {
    let title = capture_first("title", raw);
    let description = capture_first("description", raw);
    if title.is_none() && description.is_none() {
        tracing::warn!("No title fields recovered, using placeholder title");
    }
    TitleDraft::new(
        title.unwrap_or_else(|| FALLBACK_TITLE.to_string()),
        description.unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string()),
    )
}

/// The fixed four-character ensemble.
pub fn placeholder_characters() -> Vec<CharacterOutline> {
    vec![
        CharacterOutline::new(
            "Hero",
            "The main protagonist of the story who embarks on an epic journey filled with challenges and discoveries.",
            "Protagonist",
            9,
        ),
        CharacterOutline::new(
            "Mentor",
            "A wise guide who provides crucial knowledge and support to help the hero succeed.",
            "Mentor",
            8,
        ),
        CharacterOutline::new(
            "Ally",
            "A trusted companion who stands by the hero through thick and thin.",
            "Supporting",
            7,
        ),
        CharacterOutline::new(
            "Adversary",
            "The main antagonist who opposes the hero at every turn with cunning and power.",
            "Antagonist",
            8,
        ),
    ]
}

/// Recover character names from malformed output, or use the fixed ensemble.
///
/// Descriptions and roles are paired with names by position when present.
pub fn fallback_characters(raw: &str) -> Vec<CharacterOutline> {
    let names = capture_all("name", raw);
    if names.is_empty() {
        tracing::warn!("No character names recovered, using placeholder ensemble");
        return placeholder_characters();
    }

    let descriptions = capture_all("description", raw);
    let roles = capture_all("role", raw);
    names
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let mut character = CharacterOutline::named(name);
            if let Some(description) = descriptions.get(i) {
                character = character.with_description(description.clone());
            }
            if let Some(role) = roles.get(i) {
                character = character.with_role(role.clone());
            }
            character
        })
        .collect()
}

/// The fixed four-beat outline.
///
/// The climax features every character; the other beats follow the first one.
pub fn placeholder_scenes(character_names: &[String]) -> Vec<SceneOutline> {
    let lead: Vec<String> = character_names.iter().take(1).cloned().collect();
    vec![
        SceneOutline::new(
            "Opening",
            "The story begins with an introduction to the main character.",
            lead.clone(),
        ),
        SceneOutline::new(
            "Rising Action",
            "The protagonist faces their first challenge.",
            lead.clone(),
        ),
        SceneOutline::new(
            "Climax",
            "The most intense moment of the story.",
            character_names.to_vec(),
        ),
        SceneOutline::new(
            "Resolution",
            "The story concludes with resolution.",
            lead,
        ),
    ]
}

/// Recover scene titles from malformed output, or use the fixed outline.
pub fn fallback_scenes(raw: &str, character_names: &[String]) -> Vec<SceneOutline> {
    let events = capture_all("event", raw);
    if events.is_empty() {
        tracing::warn!("No scene events recovered, using placeholder outline");
        return placeholder_scenes(character_names);
    }

    let descriptions = capture_all("description", raw);
    events
        .into_iter()
        .enumerate()
        .map(|(i, event)| {
            let description = descriptions.get(i).cloned().unwrap_or_default();
            SceneOutline::new(event, description, Vec::new())
        })
        .collect()
}

/// Credits for the first selected genre, if it has an entry.
///
/// # Examples
///
/// ```
/// use fabula_pipeline::genre_writers;
///
/// assert_eq!(
///     genre_writers(&["Horror".to_string(), "Romance".to_string()]),
///     Some("Stephen King & Edgar Allan Poe")
/// );
/// assert_eq!(genre_writers(&["Western".to_string()]), None);
/// ```
pub fn genre_writers(genres: &[String]) -> Option<&'static str> {
    let first = genres.first()?.trim().to_lowercase();
    GENRE_WRITERS
        .iter()
        .find(|(genre, _)| *genre == first)
        .map(|(_, writers)| *writers)
}

/// Recover writer credits from malformed output, then by genre, then the
/// fixed credit.
pub fn fallback_writers(raw: &str, genres: &[String]) -> String {
    capture_first("writers", raw)
        .or_else(|| genre_writers(genres).map(str::to_string))
        .unwrap_or_else(|| FALLBACK_WRITERS.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_regex_recovers_partial_fields() {
        let draft = fallback_title(r#"title: 'Red Dust', but I forgot the rest"#);
        assert_eq!(draft.title(), "Red Dust");
        assert_eq!(draft.description(), FALLBACK_DESCRIPTION);
    }

    #[test]
    fn test_title_placeholder_when_nothing_matches() {
        let draft = fallback_title("The model rambled without structure.");
        assert_eq!(draft.title(), FALLBACK_TITLE);
        assert_eq!(draft.description(), FALLBACK_DESCRIPTION);
    }

    #[test]
    fn test_character_regex_pairs_fields_by_position() {
        let raw = r#"{"characters": [{"name": "Ria", "description": "Pilot", "role": "Protagonist"}, {"name": "Tom", "role": "Mentor"},]"#;
        let characters = fallback_characters(raw);
        assert_eq!(characters.len(), 2);
        assert_eq!(characters[0].display_name(), Some("Ria"));
        assert_eq!(characters[0].description().as_deref(), Some("Pilot"));
        assert_eq!(characters[1].role().as_deref(), Some("Mentor"));
    }

    #[test]
    fn test_actor_name_is_not_a_name() {
        assert!(capture_all("name", r#"{"actorName": "Kim"}"#).is_empty());
    }

    #[test]
    fn test_placeholder_scenes_cast() {
        let names = vec!["Hero".to_string(), "Mentor".to_string()];
        let scenes = placeholder_scenes(&names);
        let events: Vec<_> = scenes.iter().filter_map(|s| s.event().clone()).collect();
        assert_eq!(events, vec!["Opening", "Rising Action", "Climax", "Resolution"]);
        assert_eq!(scenes[0].character_names(), vec!["Hero"]);
        assert_eq!(scenes[2].character_names(), names);
        assert_eq!(scenes[3].character_names(), vec!["Hero"]);
    }

    #[test]
    fn test_writer_chain() {
        assert_eq!(fallback_writers(r#"writers: "Ann Author""#, &[]), "Ann Author");
        assert_eq!(
            fallback_writers("nothing useful", &["Sci-Fi".to_string()]),
            "Isaac Asimov & Arthur C. Clarke"
        );
        assert_eq!(fallback_writers("nothing useful", &[]), FALLBACK_WRITERS);
    }
}
