//! Generation response types and normalization.

use localpages_core::{ContentBundle, GenerationError};
use serde::Deserialize;

/// Raw JSON payload returned by the generation function.
#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    pub title: String,
    pub description: String,
    #[serde(rename = "mainContent")]
    pub main_content: String,
}

impl GenerateResponse {
    /// Convert the raw payload into a validated bundle.
    ///
    /// A response with any empty field is malformed: the cache would record
    /// it as complete and the page would render half-blank forever.
    pub fn into_bundle(self) -> Result<ContentBundle, GenerationError> {
        for (name, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("mainContent", &self.main_content),
        ] {
            if value.trim().is_empty() {
                return Err(GenerationError::Parse(format!("response field `{name}` is empty")));
            }
        }

        Ok(ContentBundle { title: self.title, description: self.description, main_content: self.main_content })
    }
}
