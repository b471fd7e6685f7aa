//! Finalization: normalize stage outlines into story entities and make the
//! roster cover every character a scene mentions.

use crate::{CharacterOutline, SceneOutline};
use fabula_core::{CharacterDraft, DEFAULT_POPULARITY, SceneDraft};
use fabula_error::{FabulaError, FabulaResult};
use std::collections::HashSet;

/// Role given to characters without one.
pub const DEFAULT_ROLE: &str = "Supporting Character";
/// Name given to characters without one.
pub const DEFAULT_NAME: &str = "Unknown";
/// Description given to characters only known from scenes.
pub const SCENE_CHARACTER_DESCRIPTION: &str = "Character from scene";

/// Turn scene outlines into scenes with ids, dense 0-based order, default
/// titles and empty media lists.
///
/// # Errors
///
/// Returns a builder error if a scene cannot be assembled.
pub fn normalize_scenes(outlines: &[SceneOutline], run_id: &str) -> FabulaResult<Vec<SceneDraft>> {
    outlines
        .iter()
        .enumerate()
        .map(|(index, outline)| {
            let event = outline
                .event()
                .as_deref()
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Scene {}", index + 1));

            SceneDraft::builder()
                .id(format!("scene-{}-{}", run_id, index))
                .event(event)
                .description(outline.description().clone().unwrap_or_default())
                .characters(outline.character_names())
                .order(index)
                .build()
                .map_err(FabulaError::from)
        })
        .collect()
}

/// Turn character outlines into characters with defaults filled in and
/// popularity clamped, keeping the first of any case-insensitive duplicates.
pub fn normalize_characters(outlines: &[CharacterOutline]) -> Vec<CharacterDraft> {
    let mut seen = HashSet::new();
    let mut characters = Vec::with_capacity(outlines.len());

    for outline in outlines {
        let name = outline.display_name().unwrap_or(DEFAULT_NAME).to_string();
        if !seen.insert(name.to_lowercase()) {
            tracing::debug!(name = %name, "Dropping duplicate character");
            continue;
        }

        let role = outline
            .role()
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_ROLE);
        let popularity = outline
            .popularity_score()
            .unwrap_or(DEFAULT_POPULARITY as i64);

        let mut character = CharacterDraft::new(
            name,
            outline.description().clone().unwrap_or_default(),
            role,
            popularity,
        );
        if let Some(actor) = outline.actor_name() {
            character = character.with_actor_name(actor.clone());
        }
        characters.push(character);
    }

    characters
}

/// Append every scene character missing from the roster, once each.
///
/// Matching is case-insensitive; the first spelling seen in scene order is
/// the one added. Returns how many characters were appended.
///
/// # Examples
///
/// ```
/// use fabula_core::{CharacterDraft, SceneDraft};
/// use fabula_pipeline::reconcile_roster;
///
/// let scene = SceneDraft::builder()
///     .id("scene-1-0")
///     .event("Opening")
///     .description("")
///     .characters(vec!["hero".to_string(), "Stranger".to_string()])
///     .order(0usize)
///     .build()
///     .unwrap();
///
/// let mut roster = vec![CharacterDraft::new("Hero", "Brave", "Protagonist", 9)];
/// let added = reconcile_roster(&[scene], &mut roster);
///
/// assert_eq!(added, 1);
/// assert_eq!(roster[1].name(), "Stranger");
/// assert_eq!(roster[1].role(), "Supporting Character");
/// assert_eq!(*roster[1].popularity(), 5);
/// ```
pub fn reconcile_roster(scenes: &[SceneDraft], roster: &mut Vec<CharacterDraft>) -> usize {
    let mut known: HashSet<String> = roster.iter().map(|c| c.name().to_lowercase()).collect();
    let mut added = 0;

    for name in scenes.iter().flat_map(|s| s.characters()) {
        let trimmed = name.trim();
        if trimmed.is_empty() || !known.insert(trimmed.to_lowercase()) {
            continue;
        }
        roster.push(CharacterDraft::new(
            trimmed,
            SCENE_CHARACTER_DESCRIPTION,
            DEFAULT_ROLE,
            DEFAULT_POPULARITY as i64,
        ));
        added += 1;
    }

    if added > 0 {
        tracing::debug!(added, "Added scene characters missing from roster");
    }
    added
}
