//! Error types for the Vantaa jobs ETL

use thiserror::Error;

/// Result type alias for ETL operations
pub type Result<T> = std::result::Result<T, EtlError>;

/// Error taxonomy for the ETL pipeline.
///
/// Every stage raises to its direct caller; there is no local recovery and
/// no partial result. Callers pattern-match on the variant to drive their
/// own retry policy.
#[derive(Error, Debug)]
pub enum EtlError {
    /// Connection failure or timeout while talking to the source feed
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The source answered with a non-success HTTP status
    #[error("Unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    /// The response body was not valid JSON
    #[error("Malformed JSON body: {0}")]
    Json(#[from] serde_json::Error),

    /// A non-null date string did not parse as a calendar date
    #[error("Unparseable date '{value}' in column '{column}'")]
    Date { column: String, value: String },

    /// A raw column the rename mapping depends on is absent from the input
    #[error("Missing required column '{column}' in source data")]
    MissingColumn { column: String },

    /// Coordinate or URL validation failed; the report covers all offenders
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Unreachable/malformed connection descriptor, or a query failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A field value cannot be coerced to its destination column type
    #[error("Cannot coerce value '{value}' to the type of column '{column}'")]
    Coercion { column: String, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EtlError {
    /// Create a missing-column error for a raw source column
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Create a coercion error with column context
    pub fn coercion(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Coercion {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Create a date parse error with column context
    pub fn date(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Date {
            column: column.into(),
            value: value.into(),
        }
    }
}

impl From<regex::Error> for EtlError {
    fn from(err: regex::Error) -> Self {
        EtlError::Validation(err.to_string())
    }
}
