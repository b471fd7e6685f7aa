//! Instruction templates for each remote stage.

use crate::{CharacterOutline, TitleDraft};
use fabula_core::{SceneRange, StoryLength, UpdateContext};

/// Context label sent with the title stage.
pub const TITLE_CONTEXT: &str = "Story title and description generation";
/// Context label sent with the character stage.
pub const CHARACTER_CONTEXT: &str = "Character profile creation";
/// Context label sent with the scene stage.
pub const SCENE_CONTEXT: &str = "Scene narrative generation";
/// Context label sent with the writer stage.
pub const WRITER_CONTEXT: &str = "Writer credits suggestion";

/// Title and description instruction.
///
/// In update mode the existing title and the user's instructions are added;
/// no other prompt changes.
///
/// # Examples
///
/// ```
/// use fabula_core::UpdateContext;
/// use fabula_pipeline::title_prompt;
///
/// let fresh = title_prompt("A heist on the moon", None, "Thriller");
/// assert!(!fresh.contains("EXISTING STORY"));
///
/// let update = UpdateContext::new("Moon Job", "Make it darker");
/// let updated = title_prompt("A heist on the moon", Some(&update), "Thriller");
/// assert!(updated.contains("EXISTING STORY: \"Moon Job\""));
/// assert!(updated.contains("UPDATE INSTRUCTIONS: Make it darker"));
/// ```
pub fn title_prompt(user_prompt: &str, update: Option<&UpdateContext>, genres: &str) -> String {
    let update_lines = match update {
        Some(update) if !update.existing_title().trim().is_empty() => format!(
            "\nEXISTING STORY: \"{}\"\nUPDATE INSTRUCTIONS: {}",
            update.existing_title(),
            update.instructions()
        ),
        _ => String::new(),
    };

    format!(
        r#"You are an expert story writer. Based on this user request, create a compelling story title and engaging 2-3 sentence description.

USER REQUEST: {user_prompt}
{update_lines}
GENRES: {genres}

Return ONLY valid JSON (no markdown, no code blocks):
{{
  "title": "Compelling Story Title",
  "description": "Engaging 2-3 sentence description that hooks the reader"
}}"#
    )
}

/// Character roster instruction.
pub fn character_prompt(title: &TitleDraft, genres: &str) -> String {
    format!(
        r#"Based on this story, create 3-8 rich character profiles:

STORY TITLE: {}
STORY DESCRIPTION: {}
GENRES: {genres}

Return ONLY valid JSON (no markdown):
{{
  "characters": [
    {{
      "name": "Character Name",
      "description": "Detailed background, personality traits, motivations (min 100 chars)",
      "role": "Protagonist/Antagonist/Supporting/Mentor/Comic Relief",
      "popularity": 7
    }}
  ]
}}"#,
        title.title(),
        title.description()
    )
}

/// Names of the roster joined for prompts.
pub fn roster_line(characters: &[CharacterOutline]) -> String {
    characters
        .iter()
        .filter_map(CharacterOutline::display_name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Scene outline instruction, asking for a count within the length's range.
pub fn scene_prompt(
    title: &TitleDraft,
    characters: &[CharacterOutline],
    length: StoryLength,
    genres: &str,
) -> String {
    let range: SceneRange = length.scene_range();
    format!(
        r#"Create {}-{} detailed scenes for this story:

TITLE: {}
DESCRIPTION: {}
CHARACTERS: {}
STORY LENGTH: {}
GENRES: {genres}

Create a complete narrative arc with beginning, rising action, climax, falling action, and resolution.

Return ONLY valid JSON (no markdown):
{{
  "scenes": [
    {{
      "event": "Scene title (max 8 words)",
      "description": "Detailed scene with dialogue, action, emotions, setting (minimum 150 characters)",
      "characters": ["Character1", "Character2"],
      "order": 0
    }}
  ]
}}"#,
        range.min(),
        range.max(),
        title.title(),
        title.description(),
        roster_line(characters),
        length.to_string().to_uppercase()
    )
}

/// Writer credit instruction.
pub fn writer_prompt(title: &TitleDraft, genres: &str) -> String {
    format!(
        r#"Suggest 1-2 writer names (real or fictional) that would be appropriate for this story:

TITLE: {}
GENRES: {genres}

Return ONLY valid JSON:
{{
  "writers": "Writer Name or Writer1 & Writer2"
}}"#,
        title.title()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_prompt_embeds_range_and_roster() {
        let title = TitleDraft::new("Red Dust", "A tale of Mars.");
        let characters = vec![CharacterOutline::named("Ria"), CharacterOutline::named("Tom")];
        let prompt = scene_prompt(&title, &characters, StoryLength::Short, "Sci-Fi");
        assert!(prompt.starts_with("Create 3-5 detailed scenes"));
        assert!(prompt.contains("CHARACTERS: Ria, Tom"));
        assert!(prompt.contains("STORY LENGTH: SHORT"));
        assert!(prompt.contains("GENRES: Sci-Fi"));
    }

    #[test]
    fn test_update_with_blank_title_is_ignored() {
        let update = UpdateContext::new("  ", "Make it darker");
        let prompt = title_prompt("A heist", Some(&update), "General Fiction");
        assert_eq!(prompt, title_prompt("A heist", None, "General Fiction"));
    }

    #[test]
    fn test_character_prompt_threads_title() {
        let title = TitleDraft::new("Red Dust", "A tale of Mars.");
        let prompt = character_prompt(&title, "General Fiction");
        assert!(prompt.contains("STORY TITLE: Red Dust"));
        assert!(prompt.contains("STORY DESCRIPTION: A tale of Mars."));
    }
}
