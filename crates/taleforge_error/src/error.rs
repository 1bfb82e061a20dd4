//! Top-level error wrapper types.

use crate::{ConfigError, ExtractionError, IoError, JsonError};

/// Every error condition a Tale Forge crate can report.
///
/// # Examples
///
/// ```
/// use taleforge_error::{ConfigError, TaleforgeError};
///
/// let config_err = ConfigError::new("Missing field");
/// let err: TaleforgeError = config_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum TaleforgeErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Structured output extraction error
    #[from(ExtractionError)]
    Extraction(ExtractionError),
    /// Input reading error
    #[from(IoError)]
    Io(IoError),
    /// Output rendering error
    #[from(JsonError)]
    Json(JsonError),
}

/// Tale Forge error with kind discrimination.
///
/// # Examples
///
/// ```
/// use taleforge_error::{ConfigError, TaleforgeErrorKind, TaleforgeResult};
///
/// fn might_fail() -> TaleforgeResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), TaleforgeErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Tale Forge Error: {}", _0)]
pub struct TaleforgeError(Box<TaleforgeErrorKind>);

impl TaleforgeError {
    /// Create a new error from a kind.
    pub fn new(kind: TaleforgeErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TaleforgeErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to TaleforgeErrorKind
impl<T> From<T> for TaleforgeError
where
    T: Into<TaleforgeErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Tale Forge operations.
pub type TaleforgeResult<T> = std::result::Result<T, TaleforgeError>;
