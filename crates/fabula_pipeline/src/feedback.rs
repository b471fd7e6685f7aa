//! Fire-and-forget samples for the service's learning endpoint.

use fabula_core::truncate_chars;
use fabula_interface::{GenerationBackend, LearnRequest};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Maximum characters of a sample sent to the learning endpoint.
pub const FEEDBACK_SAMPLE_LIMIT: usize = 500;

/// Posts rated samples on detached tasks.
///
/// Nothing awaits the outcome: failures are logged at `warn` and dropped.
pub struct FeedbackSink<B: GenerationBackend> {
    backend: Arc<B>,
    user_id: String,
    enabled: bool,
}

impl<B: GenerationBackend> Clone for FeedbackSink<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            user_id: self.user_id.clone(),
            enabled: self.enabled,
        }
    }
}

impl<B: GenerationBackend + 'static> FeedbackSink<B> {
    /// Create a sink. A disabled sink accepts samples and sends nothing.
    pub fn new(backend: Arc<B>, user_id: impl Into<String>, enabled: bool) -> Self {
        Self {
            backend,
            user_id: user_id.into(),
            enabled,
        }
    }

    /// Spawn a task posting the first [`FEEDBACK_SAMPLE_LIMIT`] characters of
    /// `text` with `rating`.
    ///
    /// Returns the task handle for callers that want to wait in tests, or
    /// `None` when nothing was sent.
    pub fn submit(&self, text: &str, rating: f32) -> Option<JoinHandle<()>> {
        if !self.enabled {
            return None;
        }

        let request = match LearnRequest::builder()
            .user_id(self.user_id.clone())
            .text(truncate_chars(text, FEEDBACK_SAMPLE_LIMIT))
            .rating(rating)
            .build()
        {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to build feedback request");
                return None;
            }
        };

        let backend = Arc::clone(&self.backend);
        Some(tokio::spawn(async move {
            match backend.learn(&request).await {
                Ok(()) => tracing::debug!(rating, "Feedback sample recorded"),
                Err(e) => tracing::warn!(error = %e, rating, "Failed to record feedback sample"),
            }
        }))
    }
}
