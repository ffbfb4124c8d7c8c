use std::time::Duration;

use crate::bulk::fault::{ApiFault, OperationError};

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised by bulk file processing and the Bulk service client.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Local file system failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed delimited file (broken quoting, bad UTF-8, ...).
    #[error("Bulk file error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding or decoding failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Result archive could not be opened.
    #[error("Result archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Transport-level HTTP failure.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status whose body is not a recognised fault.
    #[error("Bulk API error ({status}): {body}")]
    Http { status: u16, body: String },

    /// Structured fault returned by the service.
    #[error(transparent)]
    Service(#[from] ApiFault),

    /// A download or upload job finished in a failed state.
    #[error("Bulk operation {request_id} finished with status {status} ({} error(s))", .errors.len())]
    OperationFailed {
        request_id: String,
        status: String,
        errors: Vec<OperationError>,
    },

    /// Polling gave up before the job completed.
    #[error("Bulk operation {request_id} did not complete within {elapsed:?}")]
    Timeout { request_id: String, elapsed: Duration },

    /// A row was asked for a column its header does not carry.
    #[error("Column '{0}' is not part of the bulk file header")]
    UnknownColumn(String),

    /// An entity is missing data required to serialize it.
    #[error("{entity} cannot be written without {field}")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    /// The bulk file does not follow the expected layout.
    #[error("Invalid bulk file: {0}")]
    InvalidFile(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Token acquisition failed.
    #[error("Authentication error: {0}")]
    Auth(String),
}
