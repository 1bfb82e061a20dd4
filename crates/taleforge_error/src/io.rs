//! Input reading error types.

/// I/O error with source location.
///
/// Wraps the message of a [`std::io::Error`] together with the path (or
/// `<stdin>`) that was being read.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("IO Error: failed to read {}: {} at line {} in {}", source_name, message, line, file)]
pub struct IoError {
    /// What was being read (a path or `<stdin>`)
    pub source_name: String,
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl IoError {
    /// Create a new IoError for the named input at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use taleforge_error::IoError;
    ///
    /// let err = IoError::new("story.txt", "No such file or directory");
    /// assert!(format!("{}", err).contains("story.txt"));
    /// ```
    #[track_caller]
    pub fn new(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            source_name: source_name.into(),
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
