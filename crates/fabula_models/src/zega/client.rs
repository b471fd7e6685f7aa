//! reqwest implementation of the ZEGA client.

use async_trait::async_trait;
use fabula_core::{ServiceConfig, truncate_chars};
use fabula_error::{FabulaResult, GenerationError, GenerationErrorKind, HttpError, JsonError};
use fabula_interface::{
    GenerationBackend, Health, HealthStatus, LearnRequest, PredictRequest, PredictResponse,
};
use reqwest::{Client, RequestBuilder, Response};
use tracing::{debug, instrument, warn};

/// Characters of an error body kept for diagnostics.
pub const UPSTREAM_BODY_LIMIT: usize = 500;

/// HTTP client for the ZEGA generation service.
///
/// Built from an injected [`ServiceConfig`]; the bearer credential and user id
/// travel with the config, not with ambient state.
#[derive(Debug, Clone)]
pub struct ZegaClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    timeout_secs: u64,
}

impl ZegaClient {
    /// Creates a new client from service settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    #[instrument(skip_all, fields(base_url = %config.base_url()))]
    pub fn new(config: &ServiceConfig) -> FabulaResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;

        debug!("Created ZEGA client");

        Ok(Self {
            client,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            token: config.token().clone(),
            timeout_secs: *config.request_timeout_secs(),
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn transport_error(&self, e: reqwest::Error, what: &str) -> fabula_error::FabulaError {
        if e.is_timeout() {
            GenerationError::new(GenerationErrorKind::Timeout(self.timeout_secs)).into()
        } else {
            HttpError::new(format!("{} failed: {}", what, e)).into()
        }
    }

    /// Turn a non-success status into an `Upstream` error carrying a truncated body.
    async fn check_status(response: Response) -> FabulaResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "No error details".to_string());

        warn!(status = status.as_u16(), body_length = body.len(), "Generation service returned an error status");

        Err(GenerationError::new(GenerationErrorKind::Upstream {
            status: status.as_u16(),
            body: truncate_chars(&body, UPSTREAM_BODY_LIMIT),
        })
        .into())
    }
}

#[async_trait]
impl GenerationBackend for ZegaClient {
    #[instrument(skip(self, request), fields(context = %request.context(), mode = %request.mode()))]
    async fn predict(&self, request: &PredictRequest) -> FabulaResult<PredictResponse> {
        let url = self.endpoint("predict");
        debug!(url = %url, instruction_length = request.instruction().len(), "Sending predict request");

        let response = self
            .authorized(self.client.post(&url))
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e, "Predict request"))?;

        let response = Self::check_status(response).await?;

        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(e, "Reading predict response"))?;

        if text.trim().is_empty() {
            return Ok(PredictResponse::default());
        }

        let body: PredictResponse = serde_json::from_str(&text).map_err(|e| {
            JsonError::new(format!(
                "Failed to parse predict response: {} (body: {})",
                e,
                truncate_chars(&text, 100)
            ))
        })?;

        debug!(response_length = body.text().map(str::len).unwrap_or(0), "Received predict response");
        Ok(body)
    }

    #[instrument(skip(self, request), fields(rating = *request.rating(), text_length = request.text().len()))]
    async fn learn(&self, request: &LearnRequest) -> FabulaResult<()> {
        let url = self.endpoint("learn");

        let response = self
            .authorized(self.client.post(&url))
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e, "Learn request"))?;

        Self::check_status(response).await?;
        debug!("Feedback accepted");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "zega"
    }
}

#[async_trait]
impl Health for ZegaClient {
    #[instrument(skip(self))]
    async fn health(&self) -> FabulaResult<HealthStatus> {
        let url = self.endpoint("health");

        let response = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .map_err(|e| self.transport_error(e, "Health request"))?;

        let response = Self::check_status(response).await?;

        response
            .json::<HealthStatus>()
            .await
            .map_err(|e| JsonError::new(format!("Failed to parse health response: {}", e)).into())
    }
}
