//! Locale registry
//!
//! Single source of truth for the locales the site is served in. Built once
//! at startup from configuration and shared read-only behind an `Arc`; the
//! set never changes while the process runs.

use anyhow::bail;

/// Immutable set of supported locales plus the designated default.
///
/// Validation lives in the constructor so every other component can assume
/// the invariants hold: at least one locale, no duplicates, and the default
/// is a member of the set.
#[derive(Debug, Clone)]
pub struct LocaleRegistry {
    locales: Vec<String>,
    default: String,
}

impl LocaleRegistry {
    pub fn new(
        locales: impl IntoIterator<Item = impl Into<String>>,
        default: impl Into<String>,
    ) -> Result<Self, anyhow::Error> {
        let locales: Vec<String> = locales.into_iter().map(Into::into).collect();
        let default = default.into();

        if locales.is_empty() {
            bail!("locale.supported cannot be empty");
        }
        for (i, code) in locales.iter().enumerate() {
            if code.is_empty() {
                bail!("locale codes cannot be empty");
            }
            if locales[..i].contains(code) {
                bail!("duplicate locale code: {}", code);
            }
        }
        if !locales.contains(&default) {
            bail!("default locale '{}' is not in the supported set", default);
        }

        Ok(Self { locales, default })
    }

    /// Exact, case-sensitive membership test. Invalid input yields `false`,
    /// never an error.
    pub fn is_valid(&self, candidate: &str) -> bool {
        self.locales.iter().any(|code| code == candidate)
    }

    pub fn default_locale(&self) -> &str {
        &self.default
    }

    /// Supported codes in declaration order. Order only matters for UI
    /// display (language switcher), not for resolution.
    pub fn locales(&self) -> &[String] {
        &self.locales
    }
}
