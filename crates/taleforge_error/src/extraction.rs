//! Structured output extraction error types.

/// Specific error conditions when reading structured data out of model output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ExtractionErrorKind {
    /// No JSON object or array could be located in the response
    #[display("No JSON found in response (length: {})", length)]
    NoJson {
        /// Length of the response in bytes
        length: usize,
    },
    /// JSON was located but could not be deserialized
    #[display("Failed to parse JSON: {} (JSON: {}...)", message, preview)]
    JsonParse {
        /// Parser message
        message: String,
        /// First 100 characters of the offending JSON
        preview: String,
    },
}

/// Error type for structured output extraction.
///
/// # Examples
///
/// ```
/// use taleforge_error::{ExtractionError, ExtractionErrorKind};
///
/// let err = ExtractionError::new(ExtractionErrorKind::NoJson { length: 42 });
/// assert!(format!("{}", err).contains("No JSON"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Extraction Error: {} at line {} in {}", kind, line, file)]
pub struct ExtractionError {
    /// The specific error condition
    pub kind: ExtractionErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ExtractionError {
    /// Create a new ExtractionError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ExtractionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ExtractionErrorKind {
        &self.kind
    }
}
