use std::env;

use core_types::{LOCALE_PREFERENCE_KEY, Locale, PreferenceStore};
use tracing::{debug, warn};

/// Environment variables consulted for the runtime language, highest priority first.
pub const LANGUAGE_ENV_VARS: [&str; 4] = ["PORTFOLIO_LOCALE", "LC_ALL", "LC_MESSAGES", "LANG"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// A user session with access to stored preferences and the runtime language.
    #[default]
    Interactive,
    /// Non-interactive rendering; output must not depend on the user's machine.
    Static,
}

/// Picks the startup locale: stored preference, then runtime language, then `en`.
pub fn resolve_initial_locale(
    mode: RenderMode,
    store: &dyn PreferenceStore,
    runtime_language: Option<&str>,
) -> Locale {
    if mode == RenderMode::Static {
        return Locale::default();
    }

    if let Some(locale) = stored_locale(store) {
        debug!(%locale, "using stored locale preference");
        return locale;
    }

    match runtime_language.and_then(Locale::from_language_tag) {
        Some(Locale::Zh) => Locale::Zh,
        _ => Locale::default(),
    }
}

/// Reads the persisted locale. Absent, unreadable or invalid values count as unset.
pub fn stored_locale(store: &dyn PreferenceStore) -> Option<Locale> {
    let raw = match store.get(LOCALE_PREFERENCE_KEY) {
        Ok(value) => value?,
        Err(err) => {
            warn!(error = %err, "failed to read stored locale preference");
            return None;
        }
    };
    let locale = Locale::parse(&raw);
    if locale.is_none() {
        debug!(value = %raw, "ignoring invalid stored locale");
    }
    locale
}

pub fn detect_system_language() -> Option<String> {
    detect_language_from(|var| env::var(var).ok())
}

pub fn detect_language_from<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    LANGUAGE_ENV_VARS
        .iter()
        .filter_map(|var| lookup(var))
        .find(|value| !value.trim().is_empty())
}
