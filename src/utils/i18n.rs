use tracing::warn;

/// Locale used when the configured one has no translations
pub const FALLBACK_LOCALE: &str = "en";

/// Set the process-wide locale, falling back to English for unknown codes.
///
/// Returns the locale that was applied.
pub fn set_locale(locale: &str) -> &str {
    let available = rust_i18n::available_locales!();
    if available.iter().any(|l| *l == locale) {
        rust_i18n::set_locale(locale);
        locale
    } else {
        warn!(
            "Locale {} not available (have {:?}), using {}",
            locale, available, FALLBACK_LOCALE
        );
        rust_i18n::set_locale(FALLBACK_LOCALE);
        FALLBACK_LOCALE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_locale_falls_back() {
        assert_eq!(set_locale("xx"), FALLBACK_LOCALE);
    }

    #[test]
    fn test_bundled_locales_are_available() {
        let available = rust_i18n::available_locales!();
        assert!(available.contains(&"en"));
        assert!(available.contains(&"ko"));
    }
}
