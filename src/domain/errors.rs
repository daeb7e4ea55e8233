//! Domain error types
//!
//! Two-level hierarchy: `DoajSyncError` is the crate-wide error, wrapping
//! the registry-specific `RegistryError` taxonomy. Errors never expose
//! third-party HTTP client types.

use thiserror::Error;

/// Main crate error type
#[derive(Debug, Error)]
pub enum DoajSyncError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Errors raised while talking to the DOAJ registry
    #[error("DOAJ error: {0}")]
    Registry(#[from] RegistryError),

    /// Errors from the local article store
    #[error("Store error: {0}")]
    Store(String),

    /// Malformed input (bad DOI, missing required metadata, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// DOAJ registry errors
///
/// Covers the transport layer, credential failures and the domain-specific
/// failure modes of the article and search endpoints.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Transport failure: retries exhausted on timeout, or host unreachable
    #[error("DOAJ request failed: {0}")]
    RequestFailed(String),

    /// 401 - the API token was rejected
    #[error("DOAJ rejected the API token for {0}")]
    InvalidToken(String),

    /// 400 - the registry rejected the request payload
    #[error("DOAJ rejected the request: {0}")]
    BadRequest(String),

    /// Zero search results, or a 404 on a record with a known DOAJ id
    #[error("Record not found: {0}")]
    ResultNotFound(String),

    /// Search returned more results than the caller expected
    #[error("Search returned {0} results, expected one")]
    MultipleResultsFound(usize),

    /// 403 on update - the registry treats a changed field as immutable
    /// post-creation (seen when the article URL or an identifier changes)
    #[error("DOAJ rejected an update to an immutable field on record {0}")]
    ImmutableFieldChanged(String),

    /// Any other non-2xx status
    #[error("DOAJ returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// 2xx response with an unparsable body
    #[error("Failed to decode DOAJ response: {0}")]
    Decode(String),

    /// Operation attempted with a verb outside the endpoint's allowed set
    #[error("{operation} does not support {verb} requests")]
    VerbNotAllowed {
        verb: &'static str,
        operation: String,
    },
}

impl From<std::io::Error> for DoajSyncError {
    fn from(err: std::io::Error) -> Self {
        DoajSyncError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DoajSyncError {
    fn from(err: serde_json::Error) -> Self {
        DoajSyncError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for DoajSyncError {
    fn from(err: toml::de::Error) -> Self {
        DoajSyncError::Configuration(format!("TOML parse error: {err}"))
    }
}
