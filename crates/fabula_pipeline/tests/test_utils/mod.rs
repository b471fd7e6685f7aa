//! Test utilities for pipeline tests.
//!
//! This module provides a scripted backend and canned stage responses.

pub mod mock_backend;
pub mod progress_recorder;

#[allow(unused_imports)]
pub use mock_backend::{MockBackend, MockResponse};
#[allow(unused_imports)]
pub use progress_recorder::ProgressRecorder;

use fabula_core::{PipelineConfig, ServiceConfig};

/// Service settings pointing nowhere, with the default 60s deadline.
pub fn test_service() -> ServiceConfig {
    ServiceConfig::builder()
        .base_url("http://mock")
        .user_id("tester")
        .build()
        .expect("Failed to build service config")
}

/// Pipeline settings with no completion pause.
pub fn test_pipeline_config() -> PipelineConfig {
    PipelineConfig::builder()
        .completion_delay_ms(0u64)
        .build()
        .expect("Failed to build pipeline config")
}

/// Give detached feedback tasks a chance to run.
#[allow(dead_code)]
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

/// A title response wrapped in chatter, the way models answer.
pub fn title_json(title: &str, description: &str) -> String {
    format!(
        "Here you go!\n{{\"title\": \"{}\", \"description\": \"{}\"}}\nHope you like it.",
        title, description
    )
}

/// A character response naming each character once.
pub fn characters_json(names: &[&str]) -> String {
    let entries: Vec<String> = names
        .iter()
        .map(|n| {
            format!(
                "{{\"name\": \"{}\", \"description\": \"{} has a past.\", \"role\": \"Protagonist\", \"popularity\": 7}}",
                n, n
            )
        })
        .collect();
    format!("{{\"characters\": [{}]}}", entries.join(", "))
}

/// A scene response with `count` scenes, each featuring `cast`.
pub fn scenes_json(count: usize, cast: &[&str]) -> String {
    let cast = cast
        .iter()
        .map(|n| format!("\"{}\"", n))
        .collect::<Vec<_>>()
        .join(", ");
    let entries: Vec<String> = (0..count)
        .map(|i| {
            format!(
                "{{\"event\": \"Beat {}\", \"description\": \"Something happens.\", \"characters\": [{}], \"order\": {}}}",
                i + 1,
                cast,
                i
            )
        })
        .collect();
    format!("```json\n{{\"scenes\": [{}]}}\n```", entries.join(", "))
}

/// A writer response.
pub fn writers_json(writers: &str) -> String {
    format!("{{\"writers\": \"{}\"}}", writers)
}
