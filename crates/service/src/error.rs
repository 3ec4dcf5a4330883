//! Typed error enum for the service layer.

use recipe_cache_storage::StorageError;
use recipe_cache_upstream::UpstreamError;
use thiserror::Error;

/// Service-layer error unifying storage and upstream failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Upstream provider failed (transport, status, or payload shape).
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(#[from] UpstreamError),

    /// Nothing matched locally or upstream.
    #[error("not found: {0}")]
    NotFound(String),

    /// Caller provided invalid input (empty title, no ingredients).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Storage operation failed.
    #[error("storage: {0}")]
    Storage(#[from] StorageError),
}

