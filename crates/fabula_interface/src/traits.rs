//! Trait definitions for generation backends.

use crate::{HealthStatus, LearnRequest, PredictRequest, PredictResponse};
use async_trait::async_trait;
use fabula_error::FabulaResult;

/// Core trait that every text-generation backend implements.
///
/// Implementations map transport problems to
/// [`HttpError`](fabula_error::HttpError) and non-success statuses to
/// [`GenerationErrorKind::Upstream`](fabula_error::GenerationErrorKind::Upstream).
/// Deadlines and content extraction are the caller's concern.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Ask the service for free text following an instruction.
    async fn predict(&self, request: &PredictRequest) -> FabulaResult<PredictResponse>;

    /// Post a rated sample to the service's learning endpoint.
    async fn learn(&self, request: &LearnRequest) -> FabulaResult<()>;

    /// Backend name for logs (e.g., "zega", "mock").
    fn backend_name(&self) -> &'static str;
}

/// Trait for backends that expose a health check.
#[async_trait]
pub trait Health: GenerationBackend {
    /// Query service health.
    async fn health(&self) -> FabulaResult<HealthStatus>;
}
