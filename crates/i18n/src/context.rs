use std::sync::Arc;

use anyhow::{Context, Result};
use core_types::{LOCALE_PREFERENCE_KEY, Locale, PreferenceStore};
use tokio::sync::watch;
use tracing::info;

use crate::{I18n, I18nError, RenderMode, resolve_initial_locale};

/// The active locale of a session together with its lookup table and the
/// store that remembers the user's choice.
pub struct LocaleContext {
    i18n: I18n,
    store: Arc<dyn PreferenceStore>,
    changes: watch::Sender<Locale>,
}

impl LocaleContext {
    pub fn new(i18n: I18n, store: Arc<dyn PreferenceStore>) -> Self {
        let (changes, _) = watch::channel(i18n.language());
        Self {
            i18n,
            store,
            changes,
        }
    }

    /// Resolves the startup locale and builds a context over the embedded catalogs.
    pub fn initialize(
        mode: RenderMode,
        store: Arc<dyn PreferenceStore>,
        runtime_language: Option<&str>,
    ) -> Result<Self, I18nError> {
        let locale = resolve_initial_locale(mode, store.as_ref(), runtime_language);
        info!(%locale, ?mode, "resolved initial locale");
        Ok(Self::new(I18n::new(locale)?, store))
    }

    pub fn locale(&self) -> Locale {
        self.i18n.language()
    }

    pub fn i18n(&self) -> &I18n {
        &self.i18n
    }

    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.i18n.t(key)
    }

    /// Switches the active locale and persists it. The in-memory switch and
    /// the notification to subscribers happen even if persisting fails.
    pub fn set_locale(&mut self, locale: Locale) -> Result<()> {
        self.i18n.set_language(locale);
        self.changes.send_replace(locale);
        self.store
            .set(LOCALE_PREFERENCE_KEY, locale.code())
            .with_context(|| format!("failed to persist locale `{locale}`"))
    }

    pub fn subscribe(&self) -> watch::Receiver<Locale> {
        self.changes.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use config::MemoryStorage;

    use super::*;

    struct ReadOnlyStore;

    impl PreferenceStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(anyhow!("read-only"))
        }
    }

    #[test]
    fn set_locale_persists_choice() {
        let store = Arc::new(MemoryStorage::new());
        let mut ctx =
            LocaleContext::initialize(RenderMode::Interactive, store.clone(), None).expect("ctx");
        assert_eq!(ctx.locale(), Locale::En);

        ctx.set_locale(Locale::Zh).expect("persist");
        assert_eq!(ctx.locale(), Locale::Zh);
        assert_eq!(ctx.t("nav.skills"), "技能");
        assert_eq!(
            store.get(LOCALE_PREFERENCE_KEY).expect("read").as_deref(),
            Some("zh")
        );

        let next = LocaleContext::initialize(RenderMode::Interactive, store, Some("en_US"))
            .expect("ctx");
        assert_eq!(next.locale(), Locale::Zh);
    }

    #[test]
    fn subscribers_observe_switches() {
        let mut ctx =
            LocaleContext::initialize(RenderMode::Interactive, Arc::new(MemoryStorage::new()), None)
                .expect("ctx");
        let mut rx = ctx.subscribe();
        assert!(!rx.has_changed().expect("sender alive"));

        ctx.set_locale(Locale::Zh).expect("persist");
        assert!(rx.has_changed().expect("sender alive"));
        assert_eq!(*rx.borrow_and_update(), Locale::Zh);
    }

    #[test]
    fn persistence_failure_keeps_in_memory_switch() {
        let mut ctx = LocaleContext::new(I18n::new(Locale::En).expect("i18n"), Arc::new(ReadOnlyStore));
        let err = ctx.set_locale(Locale::Zh).expect_err("store is read-only");
        assert!(err.to_string().contains("failed to persist locale"));
        assert_eq!(ctx.locale(), Locale::Zh);
    }
}
