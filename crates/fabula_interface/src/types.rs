//! Wire types for the generation service.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Generation style requested from the service.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GenerationMode {
    /// Continue free-form text
    #[default]
    Continuation,
    /// Structured scene-oriented output
    Scene,
}

/// Body of `POST /predict`.
///
/// # Examples
///
/// ```
/// use fabula_interface::{GenerationMode, PredictRequest};
///
/// let request = PredictRequest::builder()
///     .user_id("default-user")
///     .context("Scene narrative generation")
///     .instruction("Create 3-5 scenes")
///     .mode(GenerationMode::Scene)
///     .build()
///     .unwrap();
///
/// let json = serde_json::to_value(&request).unwrap();
/// assert_eq!(json["mode"], "scene");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into), build_fn(error = "fabula_error::BuilderError"))]
pub struct PredictRequest {
    user_id: String,
    context: String,
    instruction: String,
    #[builder(default)]
    mode: GenerationMode,
}

impl PredictRequest {
    /// Creates a new builder for `PredictRequest`.
    pub fn builder() -> PredictRequestBuilder {
        PredictRequestBuilder::default()
    }
}

/// Body returned by `POST /predict`.
///
/// Services answer with either `content` or `response`; both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    response: Option<String>,
}

impl PredictResponse {
    /// A response carrying `content`.
    pub fn from_content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            response: None,
        }
    }

    /// The generated text, preferring `content` over `response`.
    ///
    /// Blank strings count as missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use fabula_interface::PredictResponse;
    ///
    /// let body: PredictResponse = serde_json::from_str(r#"{"response": "hi"}"#).unwrap();
    /// assert_eq!(body.text(), Some("hi"));
    ///
    /// let empty: PredictResponse = serde_json::from_str(r#"{"content": ""}"#).unwrap();
    /// assert_eq!(empty.text(), None);
    /// ```
    pub fn text(&self) -> Option<&str> {
        [self.content.as_deref(), self.response.as_deref()]
            .into_iter()
            .flatten()
            .find(|t| !t.trim().is_empty())
    }
}

/// Body of `POST /learn`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into), build_fn(error = "fabula_error::BuilderError"))]
pub struct LearnRequest {
    user_id: String,
    text: String,
    rating: f32,
}

impl LearnRequest {
    /// Creates a new builder for `LearnRequest`.
    pub fn builder() -> LearnRequestBuilder {
        LearnRequestBuilder::default()
    }
}

/// Body returned by `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct HealthStatus {
    status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<String>,
}

impl HealthStatus {
    /// Create a health status.
    pub fn new(status: impl Into<String>, version: Option<String>) -> Self {
        Self {
            status: status.into(),
            version,
        }
    }
}
