//! Content key normalization for consistent cache lookups.

use serde::{Deserialize, Serialize};

/// Baseline location applied when the input is blank.
pub const DEFAULT_LOCATION: &str = "london";

/// Baseline service applied when the input is blank.
pub const DEFAULT_SERVICE: &str = "accounting";

/// Canonical (location, service) pair identifying one landing page.
///
/// Keys are always fully normalized: construction goes through
/// [`ContentKey::normalize`], which is idempotent, so two keys built from
/// equivalent raw input compare equal and address the same cache rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentKey {
    pub location: String,
    pub service: String,
}

impl ContentKey {
    /// Normalize raw route input into a canonical key.
    ///
    /// Normalization steps:
    /// 1. Trim leading/trailing whitespace
    /// 2. Substitute the baseline defaults for blank input
    /// 3. Lowercase
    /// 4. Collapse internal whitespace runs to `-`
    ///
    /// Never fails: garbage input degrades to the defaults rather than
    /// being rejected.
    pub fn normalize(raw_location: &str, raw_service: &str) -> Self {
        Self {
            location: slugify(raw_location, DEFAULT_LOCATION),
            service: slugify(raw_service, DEFAULT_SERVICE),
        }
    }
}

impl std::fmt::Display for ContentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.location, self.service)
    }
}

fn slugify(input: &str, default: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return default.to_string();
    }

    trimmed
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
