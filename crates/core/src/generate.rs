//! Generator collaborator contract.
//!
//! The generation capability is opaque to the rest of the system: it
//! produces a full content bundle for a key and persists it into the
//! content store as a side effect before returning, so a subsequent cache
//! read for the same key observes a complete set of fields.

use async_trait::async_trait;

use crate::content::ContentBundle;
use crate::key::ContentKey;

/// Errors from a content generation attempt.
///
/// Cloneable: one generation outcome is shared with every caller waiting
/// on the same key.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerationError {
    /// Generator endpoint is not configured.
    #[error("missing generator endpoint: LOCALPAGES_GENERATOR_URL not set")]
    MissingEndpoint,

    /// Request failed validation before being sent.
    #[error("invalid generation request: {0}")]
    InvalidRequest(String),

    /// Authentication failed (invalid API key).
    #[error("authentication failed: invalid generator API key")]
    AuthError,

    /// Rate limited by the generation backend.
    #[error("rate limited: too many generation requests")]
    RateLimited,

    /// HTTP error response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Generation request timeout.
    #[error("generation timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(String),

    /// Response parse or shape error.
    #[error("parse error: {0}")]
    Parse(String),

    /// The shared generation ended without producing an outcome.
    #[error("generation interrupted before an outcome was produced")]
    Interrupted,
}

/// Producer of full content bundles for normalized keys.
///
/// Implementations must persist a successful bundle into the content store
/// before returning. Partial caches are always regenerated in full; there
/// is no per-field generation.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Produce the complete bundle for `key`.
    async fn generate(&self, key: &ContentKey) -> Result<ContentBundle, GenerationError>;
}
