//! Top-level error wrapper types.

use crate::{BuilderError, ConfigError, GenerationError, GenerationErrorKind, HttpError, JsonError};

/// Every error a Fabula crate can produce.
///
/// # Examples
///
/// ```
/// use fabula_error::{FabulaError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: FabulaError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FabulaErrorKind {
    /// HTTP transport error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Generation pipeline error
    #[from(GenerationError)]
    Generation(GenerationError),
}

/// Fabula error with kind discrimination.
///
/// # Examples
///
/// ```
/// use fabula_error::{FabulaResult, GenerationError, GenerationErrorKind};
///
/// fn run() -> FabulaResult<()> {
///     Err(GenerationError::new(GenerationErrorKind::GenerationFailed))?
/// }
///
/// let err = run().unwrap_err();
/// assert_eq!(
///     err.generation_kind(),
///     Some(&GenerationErrorKind::GenerationFailed)
/// );
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Fabula Error: {}", _0)]
pub struct FabulaError(Box<FabulaErrorKind>);

impl FabulaError {
    /// Create a new error from a kind.
    pub fn new(kind: FabulaErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FabulaErrorKind {
        &self.0
    }

    /// The generation failure class, if this is a pipeline error.
    pub fn generation_kind(&self) -> Option<&GenerationErrorKind> {
        match self.kind() {
            FabulaErrorKind::Generation(e) => Some(&e.kind),
            _ => None,
        }
    }

    /// Human-readable message without source locations.
    pub fn user_message(&self) -> String {
        match self.kind() {
            FabulaErrorKind::Generation(e) => e.user_message(),
            FabulaErrorKind::Http(e) => e.message.clone(),
            FabulaErrorKind::Json(e) => e.message.clone(),
            FabulaErrorKind::Config(e) => e.message.clone(),
            FabulaErrorKind::Builder(e) => e.kind().to_string(),
        }
    }
}

// Generic From implementation for any type that converts to FabulaErrorKind
impl<T> From<T> for FabulaError
where
    T: Into<FabulaErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Fabula operations.
pub type FabulaResult<T> = std::result::Result<T, FabulaError>;
