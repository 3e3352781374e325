//! Internationalization utilities for the server
//!
//! This module provides locale extraction from HTTP requests and
//! thread-local storage for the current locale. The locale router and the
//! API locale middleware both write here; localized error messages read it.

use std::cell::RefCell;

// Thread-local storage for current locale
thread_local! {
    static CURRENT_LOCALE: RefCell<String> = RefCell::new("fr".to_string());
}

/// Fallback used when no request context is available. The authoritative
/// supported set lives in [`crate::locale::LocaleRegistry`].
pub const DEFAULT_LOCALE: &str = "fr";

/// Set the current locale for the current thread
pub fn set_locale(locale: &str) {
    let locale = normalize_locale(locale);
    CURRENT_LOCALE.with(|l| {
        *l.borrow_mut() = locale;
    });
}

/// Get the current locale for the current thread
pub fn get_locale() -> String {
    CURRENT_LOCALE.with(|l| l.borrow().clone())
}

/// Normalize locale string to supported format
/// Accepts: "fr", "fr-FR", "fr_FR", "en", "en-US", "en_US", etc.
fn normalize_locale(locale: &str) -> String {
    let locale = locale.trim().to_lowercase();

    // Extract primary language tag
    let primary = locale
        .split(|c| c == '-' || c == '_' || c == ',')
        .next()
        .unwrap_or(DEFAULT_LOCALE);

    if primary.starts_with("fr") {
        "fr".to_string()
    } else if primary.starts_with("en") {
        "en".to_string()
    } else {
        DEFAULT_LOCALE.to_string()
    }
}

/// Extract locale from Accept-Language header value
pub fn extract_locale_from_header(header_value: Option<&str>) -> String {
    match header_value {
        Some(value) => normalize_locale(value),
        None => DEFAULT_LOCALE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale("fr"), "fr");
        assert_eq!(normalize_locale("fr-FR"), "fr");
        assert_eq!(normalize_locale("fr_CA"), "fr");
        assert_eq!(normalize_locale("en"), "en");
        assert_eq!(normalize_locale("en-US"), "en");
        assert_eq!(normalize_locale("en_GB"), "en");
        assert_eq!(normalize_locale("de"), "fr"); // Unsupported, fallback to default
        assert_eq!(normalize_locale(""), "fr");
    }

    #[test]
    fn test_set_get_locale() {
        set_locale("en");
        assert_eq!(get_locale(), "en");

        set_locale("fr-FR");
        assert_eq!(get_locale(), "fr");
    }

    #[test]
    fn test_extract_locale_from_header() {
        assert_eq!(extract_locale_from_header(Some("en-US,en;q=0.9")), "en");
        assert_eq!(extract_locale_from_header(Some("fr")), "fr");
        assert_eq!(extract_locale_from_header(None), "fr");
    }
}
