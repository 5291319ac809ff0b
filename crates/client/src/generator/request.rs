//! Generation request types and validation.

use localpages_core::{ContentKey, GenerationError};
use serde::{Deserialize, Serialize};

/// Longest location or service slug accepted by the generation function.
const MAX_SLUG_LEN: usize = 100;

/// Request body for the content generation function.
///
/// The function regenerates every field of a page in one call; partial
/// caches are never filled per-field.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    /// Normalized location slug.
    pub location: String,

    /// Normalized service slug.
    pub service: String,

    /// What to generate. Always `all`.
    #[serde(rename = "type")]
    pub request_type: RequestType,
}

/// Scope of a generation request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequestType {
    All,
}

impl GenerateRequest {
    /// Build the full-bundle request for a normalized key.
    pub fn for_key(key: &ContentKey) -> Self {
        Self { location: key.location.clone(), service: key.service.clone(), request_type: RequestType::All }
    }

    /// Validate the request parameters.
    ///
    /// Returns an error if either slug is empty or too long.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.location.is_empty() {
            return Err(GenerationError::InvalidRequest("location cannot be empty".to_string()));
        }

        if self.service.is_empty() {
            return Err(GenerationError::InvalidRequest("service cannot be empty".to_string()));
        }

        if self.location.len() > MAX_SLUG_LEN {
            return Err(GenerationError::InvalidRequest(format!(
                "location too long: {} chars (max {})",
                self.location.len(),
                MAX_SLUG_LEN
            )));
        }

        if self.service.len() > MAX_SLUG_LEN {
            return Err(GenerationError::InvalidRequest(format!(
                "service too long: {} chars (max {})",
                self.service.len(),
                MAX_SLUG_LEN
            )));
        }

        Ok(())
    }
}
