use thiserror::Error;

/// Errors that can occur while building settings or encoding a batch.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Aeb34Error {
    /// A required business field is missing or invalid.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A value cannot be encoded in its fixed-width field.
    #[error("format error: {0}")]
    Format(String),

    /// The caller misused the API (zero blank count, incomplete builder, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Writing to the output stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Whether a problem is a business-rule violation or an encoding limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Maps to [`Aeb34Error::Validation`].
    Validation,
    /// Maps to [`Aeb34Error::Format`].
    Format,
}

/// A single validation problem with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "recipients[2].bic").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
    /// Which error the problem turns into when an export is attempted.
    pub kind: ErrorKind,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    /// Create a business-rule validation problem.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            kind: ErrorKind::Validation,
        }
    }

    /// Create a problem caused by a value that does not fit its field format.
    pub fn format(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            kind: ErrorKind::Format,
        }
    }
}

impl From<ValidationError> for Aeb34Error {
    fn from(err: ValidationError) -> Self {
        match err.kind {
            ErrorKind::Validation => Aeb34Error::Validation(err.to_string()),
            ErrorKind::Format => Aeb34Error::Format(err.to_string()),
        }
    }
}
