//! Rendering generated stories for the terminal.

use super::commands::OutputFormat;
use fabula_core::GeneratedStory;
use fabula_error::{FabulaResult, JsonError};
use std::fmt::Write as _;

/// Render a story in the requested format.
pub fn render_story(story: &GeneratedStory, format: OutputFormat) -> FabulaResult<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(story)
            .map_err(|e| JsonError::new(format!("Failed to serialize story: {}", e)).into()),
        OutputFormat::Human => Ok(render_human(story)),
    }
}

fn render_human(story: &GeneratedStory) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", story.title());
    let _ = writeln!(out, "{:=<80}", "");
    let _ = writeln!(out, "{}", story.description());
    if let Some(writers) = story.writers() {
        let _ = writeln!(out, "\nWritten by {}", writers);
    }

    let _ = writeln!(out, "\nCharacters ({})", story.characters().len());
    let _ = writeln!(out, "{:-<80}", "");
    for character in story.characters() {
        let _ = writeln!(
            out,
            "  {} [{}] popularity {}/10",
            character.name(),
            character.role(),
            character.popularity()
        );
        if !character.description().is_empty() {
            let _ = writeln!(out, "    {}", character.description());
        }
    }

    let _ = writeln!(out, "\nScenes ({})", story.scenes().len());
    let _ = writeln!(out, "{:-<80}", "");
    for scene in story.scenes() {
        let _ = writeln!(out, "  {}. {}", scene.order() + 1, scene.event());
        if !scene.characters().is_empty() {
            let _ = writeln!(out, "    With: {}", scene.characters().join(", "));
        }
        if !scene.description().is_empty() {
            let _ = writeln!(out, "    {}", scene.description());
        }
    }

    out
}
