//! Deterministic fallback content.

use localpages_core::{ContentBundle, ContentKey};

/// Brand name stamped into fallback copy.
const BRAND: &str = "Cloudkeepers Accountants";

/// Synthesize the always-available bundle for a key.
///
/// Pure and total: no I/O, no failure mode. This is the last line of
/// defense when the cache is incomplete and generation is unavailable;
/// the page renders degraded content instead of an error.
pub fn fallback_bundle(key: &ContentKey) -> ContentBundle {
    ContentBundle {
        title: format!("{} Services in {} | {}", key.service, key.location, BRAND),
        description: format!(
            "Professional {} services in {} by {}. Get in touch for expert financial guidance.",
            key.service, key.location, BRAND
        ),
        main_content: format!(
            "# Welcome to {} {} services in {}\n\nWe provide professional assistance tailored to your needs.",
            BRAND, key.service, key.location
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_template() {
        let key = ContentKey::normalize("manchester", "payroll");
        let bundle = fallback_bundle(&key);
        assert_eq!(bundle.title, "payroll Services in manchester | Cloudkeepers Accountants");
    }

    #[test]
    fn test_description_template() {
        let key = ContentKey::normalize("bristol", "tax");
        let bundle = fallback_bundle(&key);
        assert_eq!(
            bundle.description,
            "Professional tax services in bristol by Cloudkeepers Accountants. \
             Get in touch for expert financial guidance."
        );
    }

    #[test]
    fn test_main_content_heading() {
        let key = ContentKey::normalize("leeds", "audit");
        let bundle = fallback_bundle(&key);
        assert!(
            bundle
                .main_content
                .starts_with("# Welcome to Cloudkeepers Accountants audit services in leeds")
        );
        assert!(bundle.main_content.contains("We provide professional assistance"));
    }

    #[test]
    fn test_deterministic() {
        let key = ContentKey::normalize("london", "accounting");
        assert_eq!(fallback_bundle(&key), fallback_bundle(&key));
    }
}
