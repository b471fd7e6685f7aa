//! Utilities for pulling a JSON payload out of free-form model output.
//!
//! Generation services tend to wrap their answer in prose, echo the example
//! from the prompt, or fence it in a markdown block. [`extract_json`] is a
//! best-effort heuristic: it always returns *something*, and callers are
//! expected to tolerate a string that does not parse.

use fabula_error::{FabulaResult, JsonError};
use regex::Regex;
use std::sync::LazyLock;

/// Brace-balanced objects allowing one level of nesting.
static JSON_OBJECT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\{[^{}]*(?:\{[^{}]*\}[^{}]*)*\}").ok());

/// Extract a JSON object from a response that may contain prose or markdown.
///
/// Strategies, first match wins:
/// 1. Everything before the first `{` is discarded
/// 2. Markdown code blocks: ```json ... ```
/// 3. The last object matched by a one-level-nesting brace pattern
/// 4. The span from the first `{` to the last `}`
/// 5. The trimmed input
///
/// # Examples
///
/// ```
/// use fabula_pipeline::extract_json;
///
/// let response = "Sure! Here is your story:\n{\"title\": \"Red Dust\"}\nEnjoy.";
/// assert_eq!(extract_json(response), r#"{"title": "Red Dust"}"#);
///
/// assert_eq!(extract_json("  no braces here  "), "no braces here");
/// ```
pub fn extract_json(response: &str) -> String {
    let Some(start) = response.find('{') else {
        return response.trim().to_string();
    };
    let text = &response[start..];

    if let Some(json) = extract_from_code_block(text, "json") {
        return json;
    }

    let last_object = JSON_OBJECT
        .as_ref()
        .and_then(|pattern| pattern.find_iter(text).last());
    if let Some(object) = last_object {
        return object.as_str().trim().to_string();
    }

    if let Some(end) = text.rfind('}') {
        return text[..=end].trim().to_string();
    }

    text.trim().to_string()
}

/// Extract content from a fenced block labeled `language`.
fn extract_from_code_block(response: &str, language: &str) -> Option<String> {
    let pattern = format!("```{}", language);
    let start = response.find(&pattern)?;
    let content_start = start + pattern.len();
    let end = response[content_start..].find("```")?;
    Some(response[content_start..content_start + end].trim().to_string())
}

/// Parse JSON into a specific type.
///
/// # Errors
///
/// Returns a [`JsonError`] carrying a short preview of the input when the
/// string cannot be parsed into `T`.
///
/// # Examples
///
/// ```
/// use fabula_pipeline::parse_json;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Title {
///     title: String,
/// }
///
/// let parsed: Title = parse_json(r#"{"title": "Red Dust"}"#).unwrap();
/// assert_eq!(parsed.title, "Red Dust");
/// ```
pub fn parse_json<T>(json_str: &str) -> FabulaResult<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(json_str).map_err(|e| {
        let preview = json_str.chars().take(100).collect::<String>();

        tracing::debug!(
            error = %e,
            json_preview = %preview,
            "JSON parsing failed"
        );

        JsonError::new(format!("Failed to parse JSON: {} (JSON: {}...)", e, preview)).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_from_prose() {
        let response = r#"Of course! {"title": "Red Dust", "description": "Mars."} Let me know."#;
        let json = extract_json(response);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["title"], "Red Dust");
    }

    #[test]
    fn test_extract_json_from_code_block() {
        let response = r#"
Here is the JSON you requested: {

```json
{
  "writers": "Ann Author"
}
```
"#;
        let json = extract_json(response);
        assert!(json.starts_with('{'));
        assert!(json.contains("Ann Author"));
        assert!(!json.contains("```"));
    }

    #[test]
    fn test_extract_json_prefers_last_object() {
        let response = r#"Example: {"title": "Compelling Story Title"} Answer: {"title": "Red Dust"}"#;
        assert_eq!(extract_json(response), r#"{"title": "Red Dust"}"#);
    }

    #[test]
    fn test_extract_json_keeps_one_nesting_level() {
        let response = r#"{"scenes": [{"event": "Opening"}, {"event": "Climax"}]}"#;
        assert_eq!(extract_json(response), response);
    }

    #[test]
    fn test_extract_json_deep_nesting_returns_inner_object() {
        let response = r#"Result: {"a": {"b": {"c": 1}}} done"#;
        assert_eq!(extract_json(response), r#"{"b": {"c": 1}}"#);
    }

    #[test]
    fn test_extract_json_unclosed_brace_returns_rest() {
        assert_eq!(extract_json("prefix {\"title\": \"Red  "), "{\"title\": \"Red");
    }

    #[test]
    fn test_extract_json_without_braces_is_trimmed_input() {
        assert_eq!(extract_json("\n  just prose\t"), "just prose");
    }

    #[test]
    fn test_parse_json_error_is_json_kind() {
        let err = parse_json::<serde_json::Value>("{not json").unwrap_err();
        assert!(matches!(err.kind(), fabula_error::FabulaErrorKind::Json(_)));
    }
}
