use std::sync::Arc;

use core_types::Locale;
use thiserror::Error;
use tracing::warn;

mod context;
mod resolve;
mod table;

pub use context::LocaleContext;
pub use resolve::{
    LANGUAGE_ENV_VARS, RenderMode, detect_language_from, detect_system_language,
    resolve_initial_locale, stored_locale,
};
pub use table::TranslationTable;

#[derive(Debug, Error)]
pub enum I18nError {
    #[error("failed to parse `{locale}` translation catalog")]
    Parse {
        locale: Locale,
        #[source]
        source: serde_json::Error,
    },
    #[error("no translation catalog for `{0}`")]
    MissingCatalog(Locale),
    #[error("`{locale}` catalog is missing keys: {}", .keys.join(", "))]
    MissingKeys { locale: Locale, keys: Vec<String> },
}

#[derive(Debug, Clone)]
pub struct I18n {
    lang: Locale,
    table: Arc<TranslationTable>,
}

impl I18n {
    pub fn new(lang: Locale) -> Result<Self, I18nError> {
        Ok(Self::with_table(lang, TranslationTable::embedded()?))
    }

    pub fn with_table(lang: Locale, table: Arc<TranslationTable>) -> Self {
        Self { lang, table }
    }

    pub fn set_language(&mut self, lang: Locale) {
        self.lang = lang;
    }

    pub fn language(&self) -> Locale {
        self.lang
    }

    pub fn table(&self) -> &TranslationTable {
        &self.table
    }

    /// Looks up a dotted key in the active locale. A missing key is logged
    /// and returned as-is so it shows up as a visible placeholder.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        match self.table.lookup(self.lang, key) {
            Some(text) => text,
            None => {
                warn!(key, locale = %self.lang, "translation key not found");
                key
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_chinese_translation() {
        let i18n = I18n::new(Locale::Zh).expect("i18n");
        assert_eq!(i18n.t("nav.home"), "首页");
    }

    #[test]
    fn falls_back_to_key_when_missing() {
        let i18n = I18n::new(Locale::En).expect("i18n");
        assert_eq!(i18n.t("not.exists"), "not.exists");
        assert_eq!(i18n.t("contact"), "contact");
        assert_eq!(i18n.t("..."), "...");
    }

    #[test]
    fn switching_language_changes_lookups() {
        let mut i18n = I18n::new(Locale::En).expect("i18n");
        assert_eq!(i18n.t("projects.clearFilters"), "Clear filters");
        i18n.set_language(Locale::Zh);
        assert_eq!(i18n.language(), Locale::Zh);
        assert_eq!(i18n.t("projects.clearFilters"), "清除筛选");
    }
}
