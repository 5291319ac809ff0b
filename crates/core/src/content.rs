//! Page content data model.

use serde::{Deserialize, Serialize};

/// The closed set of content fields cached for one landing page.
///
/// A resolution is complete only when all three fields are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentField {
    MetaTitle,
    MetaDescription,
    MainContent,
}

impl ContentField {
    /// Every field a complete resolution must assemble.
    pub const ALL: [ContentField; 3] = [
        ContentField::MetaTitle,
        ContentField::MetaDescription,
        ContentField::MainContent,
    ];

    /// Stable storage name, used as the cache table `kind` column.
    pub fn as_str(self) -> &'static str {
        match self {
            ContentField::MetaTitle => "meta_title",
            ContentField::MetaDescription => "meta_description",
            ContentField::MainContent => "main_content",
        }
    }
}

impl std::fmt::Display for ContentField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assembled page content returned to callers.
///
/// Transient: an assembly of three cached values, a freshly generated
/// bundle, or a fallback product. Wire names follow the generation
/// function's JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBundle {
    pub title: String,
    pub description: String,
    #[serde(rename = "mainContent")]
    pub main_content: String,
}

impl ContentBundle {
    /// Value for one field of the bundle.
    pub fn field(&self, field: ContentField) -> &str {
        match field {
            ContentField::MetaTitle => &self.title,
            ContentField::MetaDescription => &self.description,
            ContentField::MainContent => &self.main_content,
        }
    }
}
