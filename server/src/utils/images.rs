//! Image CDN URL helpers
//!
//! Content records reference full-resolution Cloudinary delivery URLs. The
//! API rewrites them into sized variants by splicing a transformation
//! segment into the URL; URLs that do not belong to the CDN are returned
//! unchanged. Pure string work, no network calls.

use once_cell::sync::Lazy;
use regex::Regex;

/// Presentation sizes the front end asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImagePreset {
    /// Tiny preview, e.g. cart rows and admin lists.
    Thumbnail,
    /// Product/project cards in grids.
    Card,
    /// In-page galleries.
    Gallery,
    /// Full-bleed hero banners.
    Hero,
}

impl ImagePreset {
    /// Cloudinary transformation segment for this preset. `c_limit` keeps
    /// aspect ratio and never upscales.
    fn transformation(self) -> &'static str {
        match self {
            Self::Thumbnail => "f_auto,q_auto,c_limit,w_200",
            Self::Card => "f_auto,q_auto,c_limit,w_640",
            Self::Gallery => "f_auto,q_auto,c_limit,w_1280",
            Self::Hero => "f_auto,q_auto,c_limit,w_1920",
        }
    }
}

// Matches ".../res.cloudinary.com/<cloud>/image/upload/<rest>", capturing the
// two halves around the upload marker.
static CLOUDINARY_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(https?://res\.cloudinary\.com/[^/]+/image/upload/)(.+)$")
        .expect("cloudinary pattern is valid")
});

/// Rewrite a CDN delivery URL for the given presentation size.
///
/// Identity for anything that is not a recognized Cloudinary URL.
pub fn optimized_image_url(url: &str, preset: ImagePreset) -> String {
    match CLOUDINARY_URL.captures(url) {
        Some(parts) => format!("{}{}/{}", &parts[1], preset.transformation(), &parts[2]),
        None => url.to_string(),
    }
}

static SLUG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]{0,127}$").expect("slug pattern is valid"));

/// Guard applied to slug path parameters before they reach the content
/// store. Slugs are lowercase kebab-case, at most 128 characters.
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG.is_match(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELIVERY: &str =
        "https://res.cloudinary.com/atelier-sauvage/image/upload/v1712/objets/banc-lueur.jpg";

    #[test]
    fn test_inserts_transformation_after_upload() {
        assert_eq!(
            optimized_image_url(DELIVERY, ImagePreset::Card),
            "https://res.cloudinary.com/atelier-sauvage/image/upload/f_auto,q_auto,c_limit,w_640/v1712/objets/banc-lueur.jpg"
        );
    }

    #[test]
    fn test_each_preset_has_distinct_width() {
        let widths: Vec<String> =
            [ImagePreset::Thumbnail, ImagePreset::Card, ImagePreset::Gallery, ImagePreset::Hero]
                .iter()
                .map(|preset| optimized_image_url(DELIVERY, *preset))
                .collect();
        assert!(widths[0].contains("w_200"));
        assert!(widths[1].contains("w_640"));
        assert!(widths[2].contains("w_1280"));
        assert!(widths[3].contains("w_1920"));
    }

    #[test]
    fn test_identity_for_foreign_urls() {
        for url in [
            "https://example.com/photo.jpg",
            "https://res.cloudinary.com/atelier-sauvage/video/upload/v1/clip.mp4",
            "not a url",
            "",
        ] {
            assert_eq!(optimized_image_url(url, ImagePreset::Hero), url);
        }
    }

    #[test]
    fn test_slug_guard() {
        assert!(is_valid_slug("banc-lueur"));
        assert!(is_valid_slug("table-basse-7"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("-leading-dash"));
        assert!(!is_valid_slug("Majuscule"));
        assert!(!is_valid_slug("a b"));
        assert!(!is_valid_slug(&"a".repeat(129)));
    }
}
