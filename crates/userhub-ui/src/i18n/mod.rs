//! JSON-backed translations with English fallback and a persisted language choice.

use std::sync::LazyLock;

use serde_json::Value;

use crate::core::storage::KeyValueStorage;

/// Storage key holding the selected language tag.
pub const LANGUAGE_KEY: &str = "app-lang";

/// Supported UI locales.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LocaleCode {
    /// English.
    En,
    /// Turkish.
    Tr,
}

impl LocaleCode {
    /// Selector order.
    #[must_use]
    pub const fn all() -> [Self; 2] {
        [Self::En, Self::Tr]
    }

    /// Two-letter tag sent as `Accept-Language` and persisted under [`LANGUAGE_KEY`].
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Tr => "tr",
        }
    }

    /// Label for the language selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Tr => "Türkçe",
        }
    }

    /// Map a browser language tag (`en-US`, `tr`) onto a supported locale.
    #[must_use]
    pub fn from_lang_tag(tag: &str) -> Option<Self> {
        let lowered = tag.trim().to_ascii_lowercase();
        let primary = lowered.split(['-', '_']).next().unwrap_or_default();
        Self::all().into_iter().find(|candidate| candidate.code() == primary)
    }
}

/// Used when neither storage nor the browser names a supported language.
pub const DEFAULT_LOCALE: LocaleCode = LocaleCode::En;

/// Pick the startup locale: stored choice, then browser language, then English.
#[must_use]
pub fn initial_locale(stored: Option<&str>, navigator: Option<&str>) -> LocaleCode {
    stored
        .and_then(LocaleCode::from_lang_tag)
        .or_else(|| navigator.and_then(LocaleCode::from_lang_tag))
        .unwrap_or(DEFAULT_LOCALE)
}

/// Startup locale from storage and the browser language.
#[must_use]
pub fn load_locale(storage: &impl KeyValueStorage, navigator: Option<&str>) -> LocaleCode {
    initial_locale(storage.get(LANGUAGE_KEY).as_deref(), navigator)
}

/// Remember the selected locale.
pub fn persist_locale(storage: &impl KeyValueStorage, locale: LocaleCode) {
    if let Err(err) = storage.set(LANGUAGE_KEY, locale.code()) {
        tracing::warn!(error = %err, locale = locale.code(), "failed to persist language");
    }
}

/// Parsed translation tree for one locale.
#[derive(Clone, Debug)]
pub struct TranslationBundle {
    /// Language of `tree`.
    pub locale: LocaleCode,
    tree: Value,
}

impl PartialEq for TranslationBundle {
    fn eq(&self, other: &Self) -> bool {
        // Trees are embedded per locale, so the code identifies the content.
        self.locale.eq(&other.locale)
    }
}

impl TranslationBundle {
    /// Bundle for `locale`; missing keys fall back to English.
    #[must_use]
    pub fn new(locale: LocaleCode) -> Self {
        let tree = serde_json::from_str(embedded_json(locale)).unwrap_or_else(|err| {
            tracing::warn!(error = %err, locale = locale.code(), "translation bundle is not valid json");
            Value::Null
        });
        Self { locale, tree }
    }

    /// Text at dotted `path`: this locale, then English, then `default`.
    #[must_use]
    pub fn text(&self, path: &str, default: &str) -> String {
        lookup(&self.tree, path)
            .or_else(|| lookup(&ENGLISH.tree, path))
            .map_or_else(|| default.to_owned(), str::to_owned)
    }
}

static ENGLISH: LazyLock<TranslationBundle> =
    LazyLock::new(|| TranslationBundle::new(DEFAULT_LOCALE));

fn lookup<'a>(tree: &'a Value, path: &str) -> Option<&'a str> {
    path.split('.')
        .try_fold(tree, |node, key| node.get(key))
        .and_then(Value::as_str)
}

const fn embedded_json(locale: LocaleCode) -> &'static str {
    match locale {
        LocaleCode::En => include_str!("../../i18n/en.json"),
        LocaleCode::Tr => include_str!("../../i18n/tr.json"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStorage;

    #[test]
    fn stored_choice_wins_over_browser() {
        assert_eq!(initial_locale(Some("tr"), Some("en-US")), LocaleCode::Tr);
        assert_eq!(initial_locale(None, Some("tr-TR")), LocaleCode::Tr);
        assert_eq!(initial_locale(Some("xx"), Some("de-DE")), LocaleCode::En);
        assert_eq!(initial_locale(None, None), LocaleCode::En);
    }

    #[test]
    fn selection_round_trips_through_storage() {
        let storage = MemoryStorage::new();
        persist_locale(&storage, LocaleCode::Tr);
        assert_eq!(storage.get(LANGUAGE_KEY).as_deref(), Some("tr"));
        assert_eq!(load_locale(&storage, Some("en")), LocaleCode::Tr);
    }

    #[test]
    fn missing_key_falls_back_to_english_then_default() {
        let tr = TranslationBundle::new(LocaleCode::Tr);
        assert_eq!(tr.text("signUp", "Sign Up"), "Kayıt Ol");
        assert_eq!(tr.text("loading", "x"), "Loading");
        assert_eq!(tr.text("nope.missing", "fallback"), "fallback");
    }

    #[test]
    fn bundles_share_the_lifecycle_keys() {
        for locale in LocaleCode::all() {
            let tree = TranslationBundle::new(locale).tree;
            assert!(lookup(&tree, "genericError").is_some());
            assert!(lookup(&tree, "passwordMismatch").is_some());
        }
    }
}
