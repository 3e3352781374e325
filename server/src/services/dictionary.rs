//! UI dictionary bundles
//!
//! The front end fetches its translated strings as one JSON bundle per
//! locale. Bundles are embedded in the binary at build time and parsed
//! once on first access; lookups after that are allocation-free.

use once_cell::sync::Lazy;
use rust_embed::RustEmbed;
use serde_json::Value;
use std::collections::HashMap;

#[derive(RustEmbed)]
#[folder = "dictionaries/"]
struct DictionaryBundles;

static PARSED: Lazy<HashMap<String, Value>> = Lazy::new(|| {
    let mut bundles = HashMap::new();
    for file in DictionaryBundles::iter() {
        let Some(locale) = file.strip_suffix(".json") else {
            continue;
        };
        let Some(content) = DictionaryBundles::get(&file) else {
            continue;
        };
        match serde_json::from_slice::<Value>(&content.data) {
            Ok(bundle) if bundle.is_object() => {
                bundles.insert(locale.to_string(), bundle);
            },
            Ok(_) => tracing::warn!("Dictionary bundle {} is not a JSON object, skipped", file),
            Err(e) => tracing::warn!("Failed to parse dictionary bundle {}: {}", file, e),
        }
    }
    bundles
});

/// The key/value bundle for a locale, `None` when no bundle ships for it.
pub fn get_dictionary(locale: &str) -> Option<&'static Value> {
    PARSED.get(locale)
}

/// Locales a bundle ships for.
pub fn bundled_locales() -> Vec<&'static str> {
    let mut locales: Vec<&'static str> = PARSED.keys().map(String::as_str).collect();
    locales.sort_unstable();
    locales
}
