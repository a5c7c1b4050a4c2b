//! Form error types
//!
//! Every stage of the decode pipeline collapses into one `DecodeError`.
//! Callers that need to branch use `DecodeError::kind()`:
//! - FORM_ENCODING_ERROR
//! - FORM_STRUCTURAL_PARSE_ERROR
//! - FORM_SCHEMA_VIOLATION
//! - FORM_DATE_PARSE_ERROR

use std::fmt;

use thiserror::Error;

use super::date::DateError;

/// Error kinds surfaced by the decode pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// Payload is not valid base64, or the decoded bytes are not UTF-8
    Encoding,
    /// Decoded text is not JSON, or not an object at the top level
    StructuralParse,
    /// A required field is missing or a field value breaks its rule
    SchemaViolation,
    /// The `date` field does not name a real calendar day
    DateParse,
}

impl DecodeErrorKind {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            DecodeErrorKind::Encoding => "FORM_ENCODING_ERROR",
            DecodeErrorKind::StructuralParse => "FORM_STRUCTURAL_PARSE_ERROR",
            DecodeErrorKind::SchemaViolation => "FORM_SCHEMA_VIOLATION",
            DecodeErrorKind::DateParse => "FORM_DATE_PARSE_ERROR",
        }
    }
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A single broken field rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Field name
    pub field: String,
    /// Rule the value had to satisfy
    pub expected: String,
    /// What was found instead
    pub actual: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(field, "field to be present", "missing")
    }

    pub fn type_mismatch(field: impl Into<String>, actual_type: &str) -> Self {
        Self::new(field, "string", actual_type)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}': expected {}, got {}", self.field, self.expected, self.actual)
    }
}

/// Outcome of a rejected validation.
///
/// Never empty: `first()` is the violation reported first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    violations: Vec<Violation>,
}

impl ValidationFailure {
    /// Returns `None` when there is nothing to report
    pub(crate) fn from_violations(violations: Vec<Violation>) -> Option<Self> {
        if violations.is_empty() {
            None
        } else {
            Some(Self { violations })
        }
    }

    /// The violation reported first
    pub fn first(&self) -> &Violation {
        &self.violations[0]
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Whether any violation names `field`
    pub fn mentions(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first())?;
        if self.violations.len() > 1 {
            write!(f, " (and {} more: ", self.violations.len() - 1)?;
            for (i, v) in self.violations[1..].iter().enumerate() {
                if i > 0 {
                    write!(f, "; ")?;
                }
                write!(f, "{}", v)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

/// Underlying cause of a `DecodeError`
#[derive(Debug, Error)]
pub enum DecodeCause {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object at top level, got {0}")]
    NotAnObject(&'static str),

    #[error("schema violation: {0}")]
    Schema(#[from] ValidationFailure),

    #[error("invalid date '{value}': {source}")]
    Date {
        value: String,
        #[source]
        source: DateError,
    },
}

impl DecodeCause {
    fn kind(&self) -> DecodeErrorKind {
        match self {
            DecodeCause::Base64(_) | DecodeCause::Utf8(_) => DecodeErrorKind::Encoding,
            DecodeCause::Json(_) | DecodeCause::NotAnObject(_) => DecodeErrorKind::StructuralParse,
            DecodeCause::Schema(_) => DecodeErrorKind::SchemaViolation,
            DecodeCause::Date { .. } => DecodeErrorKind::DateParse,
        }
    }
}

/// The one error a decode call can return
#[derive(Debug, Error)]
#[error("decode failed: {cause}")]
pub struct DecodeError {
    #[source]
    cause: DecodeCause,
}

impl DecodeError {
    /// Returns the error kind
    pub fn kind(&self) -> DecodeErrorKind {
        self.cause.kind()
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    pub fn cause(&self) -> &DecodeCause {
        &self.cause
    }

    /// Validation details, for schema violations only
    pub fn validation(&self) -> Option<&ValidationFailure> {
        match &self.cause {
            DecodeCause::Schema(failure) => Some(failure),
            _ => None,
        }
    }

    /// Field named by the first schema violation
    pub fn field(&self) -> Option<&str> {
        self.validation().map(|failure| failure.first().field.as_str())
    }
}

impl From<DecodeCause> for DecodeError {
    fn from(cause: DecodeCause) -> Self {
        Self { cause }
    }
}

impl From<base64::DecodeError> for DecodeError {
    fn from(e: base64::DecodeError) -> Self {
        DecodeCause::from(e).into()
    }
}

impl From<std::str::Utf8Error> for DecodeError {
    fn from(e: std::str::Utf8Error) -> Self {
        DecodeCause::from(e).into()
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        DecodeCause::from(e).into()
    }
}

impl From<ValidationFailure> for DecodeError {
    fn from(failure: ValidationFailure) -> Self {
        DecodeCause::from(failure).into()
    }
}

/// Result type for decode operations
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors in a schema definition itself (not in a record)
#[derive(Debug, Clone, Error)]
pub enum SchemaError {
    #[error("duplicate field '{0}' in schema")]
    DuplicateField(String),

    #[error("invalid pattern for field '{field}': {reason}")]
    InvalidPattern { field: String, reason: String },

    #[error("invalid length bounds for field '{field}': min {min} > max {max}")]
    InvalidLength { field: String, min: usize, max: usize },
}

/// Result type for schema construction
pub type SchemaResult<T> = Result<T, SchemaError>;
