//! Result type alias used throughout the crate

use crate::domain::errors::DoajSyncError;

/// Convenience alias for `Result<T, DoajSyncError>`
pub type Result<T> = std::result::Result<T, DoajSyncError>;
