//! One deadline-bounded request to the generation service.

use crate::extract_json;
use fabula_core::ServiceConfig;
use fabula_error::{FabulaResult, GenerationError, GenerationErrorKind};
use fabula_interface::{GenerationBackend, GenerationMode, PredictRequest};
use std::sync::Arc;
use std::time::Duration;

/// Suffix appended to every instruction.
pub const JSON_ONLY_DIRECTIVE: &str = "\n\nIMPORTANT: You must respond with ONLY the JSON object. Do not include any explanatory text before or after the JSON.";

/// Wraps a backend with the per-call deadline, user attribution and
/// response extraction.
///
/// Outcomes of [`call`](Self::call):
/// - deadline exceeded: [`GenerationErrorKind::Timeout`]
/// - non-success status: whatever the backend reports (normally
///   [`GenerationErrorKind::Upstream`])
/// - blank `content`/`response`: [`GenerationErrorKind::EmptyResponse`]
/// - otherwise the extracted JSON substring, not the raw text
pub struct RemoteCaller<B: GenerationBackend> {
    backend: Arc<B>,
    user_id: String,
    timeout: Duration,
}

impl<B: GenerationBackend> RemoteCaller<B> {
    /// Create a caller using the service's user id and deadline.
    pub fn new(backend: Arc<B>, service: &ServiceConfig) -> Self {
        Self {
            backend,
            user_id: service.user_id().clone(),
            timeout: service.request_timeout(),
        }
    }

    /// The deadline applied to each call.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send one instruction and return the extracted JSON substring.
    ///
    /// # Errors
    ///
    /// Returns a fatal generation error on timeout, upstream failure or an
    /// empty response, and transport errors unchanged.
    #[tracing::instrument(
        skip(self, instruction),
        fields(
            backend = self.backend.backend_name(),
            context = %context,
            mode = %mode,
            instruction_length = instruction.len()
        )
    )]
    pub async fn call(
        &self,
        instruction: &str,
        context: &str,
        mode: GenerationMode,
    ) -> FabulaResult<String> {
        let request = PredictRequest::builder()
            .user_id(self.user_id.clone())
            .context(context)
            .instruction(format!("{}{}", instruction, JSON_ONLY_DIRECTIVE))
            .mode(mode)
            .build()?;

        let response = match tokio::time::timeout(self.timeout, self.backend.predict(&request))
            .await
        {
            Ok(result) => result?,
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.timeout.as_secs(),
                    "Generation request timed out"
                );
                return Err(
                    GenerationError::new(GenerationErrorKind::Timeout(self.timeout.as_secs()))
                        .into(),
                );
            }
        };

        let text = response
            .text()
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::EmptyResponse))?;

        tracing::debug!(response_length = text.len(), "Received generation response");

        Ok(extract_json(text))
    }
}
