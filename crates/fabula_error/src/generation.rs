//! Story generation error types.

/// Specific failure conditions of a generation run.
///
/// Only [`ParseFailure`](GenerationErrorKind::ParseFailure) is recoverable: the
/// pipeline absorbs it with a stage fallback and never surfaces it to the caller.
/// Every other kind halts the run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// Remote call exceeded its deadline
    #[display(
        "AI request timed out after {} seconds. The model might be busy. Please try again.",
        _0
    )]
    Timeout(u64),
    /// Generation service answered with a non-success status
    #[display("AI API error: {}. Details: {}", status, body)]
    Upstream {
        /// HTTP status code
        status: u16,
        /// Response body, truncated for diagnostics
        body: String,
    },
    /// Success status but no usable content
    #[display("Empty response from AI service")]
    EmptyResponse,
    /// Stage output could not be parsed into its expected shape
    #[display("Could not parse {} output: {}", stage, message)]
    ParseFailure {
        /// Stage whose output failed to parse
        stage: String,
        /// Parser message
        message: String,
    },
    /// No scenes were produced even after fallback
    #[display("Failed to generate scenes. Please try again.")]
    GenerationFailed,
    /// The caller cancelled the run between stages
    #[display("Story generation was cancelled")]
    Cancelled,
}

impl GenerationErrorKind {
    /// Whether this condition ends the run.
    ///
    /// # Examples
    ///
    /// ```
    /// use fabula_error::GenerationErrorKind;
    ///
    /// assert!(GenerationErrorKind::EmptyResponse.is_fatal());
    /// assert!(!GenerationErrorKind::ParseFailure {
    ///     stage: "title".into(),
    ///     message: "eof".into(),
    /// }
    /// .is_fatal());
    /// ```
    pub fn is_fatal(&self) -> bool {
        !matches!(self, GenerationErrorKind::ParseFailure { .. })
    }
}

/// Error type for generation runs.
///
/// # Examples
///
/// ```
/// use fabula_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::Timeout(60));
/// assert!(format!("{}", err).contains("timed out after 60 seconds"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The specific error condition
    pub kind: GenerationErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Message suitable for showing to an end user, without source location.
    pub fn user_message(&self) -> String {
        self.kind.to_string()
    }
}
