use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, OnceLock};

use core_types::Locale;
use serde::Deserialize;

use crate::I18nError;

const EN_CATALOG: &str = include_str!("../locales/en.json");
const ZH_CATALOG: &str = include_str!("../locales/zh.json");

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TranslationNode {
    Text(String),
    Group(BTreeMap<String, TranslationNode>),
}

impl TranslationNode {
    fn lookup(&self, key: &str) -> Option<&str> {
        let mut node = self;
        for segment in key.split('.') {
            match node {
                TranslationNode::Group(children) => node = children.get(segment)?,
                TranslationNode::Text(_) => return None,
            }
        }
        match node {
            TranslationNode::Text(text) => Some(text),
            TranslationNode::Group(_) => None,
        }
    }

    fn collect_keys(&self, prefix: &str, out: &mut BTreeSet<String>) {
        match self {
            TranslationNode::Text(_) => {
                out.insert(prefix.to_string());
            }
            TranslationNode::Group(children) => {
                for (name, child) in children {
                    let path = if prefix.is_empty() {
                        name.clone()
                    } else {
                        format!("{prefix}.{name}")
                    };
                    child.collect_keys(&path, out);
                }
            }
        }
    }
}

/// Nested label catalogs, one per locale, addressed by dotted keys.
#[derive(Debug, Clone)]
pub struct TranslationTable {
    catalogs: BTreeMap<Locale, TranslationNode>,
}

impl TranslationTable {
    /// The catalogs compiled into the binary, parsed once per process.
    pub fn embedded() -> Result<Arc<TranslationTable>, I18nError> {
        static EMBEDDED: OnceLock<Arc<TranslationTable>> = OnceLock::new();

        if let Some(table) = EMBEDDED.get() {
            return Ok(Arc::clone(table));
        }
        let table = Arc::new(Self::from_catalogs([
            (Locale::En, EN_CATALOG),
            (Locale::Zh, ZH_CATALOG),
        ])?);
        Ok(Arc::clone(EMBEDDED.get_or_init(|| table)))
    }

    /// Builds a table from JSON catalogs. Every supported locale must be present.
    pub fn from_catalogs<'a>(
        catalogs: impl IntoIterator<Item = (Locale, &'a str)>,
    ) -> Result<Self, I18nError> {
        let mut parsed = BTreeMap::new();
        for (locale, json) in catalogs {
            let node: TranslationNode = serde_json::from_str(json)
                .map_err(|source| I18nError::Parse { locale, source })?;
            parsed.insert(locale, node);
        }
        if let Some(missing) = Locale::ALL
            .into_iter()
            .find(|locale| !parsed.contains_key(locale))
        {
            return Err(I18nError::MissingCatalog(missing));
        }
        Ok(Self { catalogs: parsed })
    }

    pub fn lookup(&self, locale: Locale, key: &str) -> Option<&str> {
        self.catalogs.get(&locale)?.lookup(key)
    }

    /// All leaf keys of one locale's catalog, sorted.
    pub fn keys(&self, locale: Locale) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        if let Some(root) = self.catalogs.get(&locale) {
            root.collect_keys("", &mut out);
        }
        out
    }

    /// Checks that every locale carries every key any other locale has.
    pub fn validate(&self) -> Result<(), I18nError> {
        let all_keys: BTreeSet<String> = Locale::ALL
            .iter()
            .flat_map(|locale| self.keys(*locale))
            .collect();

        for locale in Locale::ALL {
            let present = self.keys(locale);
            let missing: Vec<String> = all_keys.difference(&present).cloned().collect();
            if !missing.is_empty() {
                return Err(I18nError::MissingKeys {
                    locale,
                    keys: missing,
                });
            }
        }
        Ok(())
    }
}
