//! Request locale handling.
//!
//! The product surface is bilingual (Chinese-first), so error messages
//! follow the caller's `Accept-Language`. The locale middleware parses the
//! header once per request and stores the result in thread-local storage.

use std::cell::Cell;

/// Supported response languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    /// Simplified Chinese, the product default.
    #[default]
    Zh,
    En,
}

impl Locale {
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::Zh => "zh",
            Locale::En => "en",
        }
    }

    /// Parse an `Accept-Language` style value: "en-US,en;q=0.9", "zh_CN",
    /// "EN". Anything that is not recognizably English maps to Chinese.
    pub fn parse(value: &str) -> Self {
        let primary = value
            .split([',', ';', '-', '_'])
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();
        if primary == "en" { Locale::En } else { Locale::Zh }
    }
}

thread_local! {
    static REQUEST_LOCALE: Cell<Locale> = const { Cell::new(Locale::Zh) };
}

/// Set the locale for the current thread (called by the locale middleware).
pub fn set_locale(locale: Locale) {
    REQUEST_LOCALE.with(|l| l.set(locale));
}

/// Locale of the request currently being served on this thread.
pub fn current_locale() -> Locale {
    REQUEST_LOCALE.with(|l| l.get())
}

/// Resolve the locale from an optional `Accept-Language` header value.
pub fn locale_from_header(header: Option<&str>) -> Locale {
    header.map(Locale::parse).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locale() {
        assert_eq!(Locale::parse("zh"), Locale::Zh);
        assert_eq!(Locale::parse("zh-CN"), Locale::Zh);
        assert_eq!(Locale::parse("zh_CN"), Locale::Zh);
        assert_eq!(Locale::parse("en"), Locale::En);
        assert_eq!(Locale::parse("en-US,en;q=0.9"), Locale::En);
        assert_eq!(Locale::parse("EN"), Locale::En);
        // Unsupported languages fall back to the default
        assert_eq!(Locale::parse("fr"), Locale::Zh);
        assert_eq!(Locale::parse(""), Locale::Zh);
    }

    #[test]
    fn test_set_and_get_locale() {
        set_locale(Locale::En);
        assert_eq!(current_locale(), Locale::En);

        set_locale(Locale::Zh);
        assert_eq!(current_locale(), Locale::Zh);
    }

    #[test]
    fn test_locale_from_header() {
        assert_eq!(locale_from_header(None), Locale::Zh);
        assert_eq!(locale_from_header(Some("en-GB")), Locale::En);
    }
}
