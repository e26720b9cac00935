use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Key under which the chosen locale is persisted in a [`PreferenceStore`].
pub const LOCALE_PREFERENCE_KEY: &str = "locale";

#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, Eq, PartialEq, Hash, Ord, PartialOrd,
)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Zh];

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh",
        }
    }

    /// Parses an exact locale code such as a stored preference. Only `en`
    /// and `zh` are accepted, with no case or whitespace folding.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "en" => Some(Locale::En),
            "zh" => Some(Locale::Zh),
            _ => None,
        }
    }

    /// Matches a runtime language tag (`zh-CN`, `zh_TW.UTF-8`, `en_US`) by prefix.
    pub fn from_language_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_ascii_lowercase();
        if tag.starts_with("zh") {
            Some(Locale::Zh)
        } else if tag.starts_with("en") {
            Some(Locale::En)
        } else {
            None
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One value per supported locale. Every field is required, so a mapping
/// can never miss a locale.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LocaleMap<T> {
    pub en: T,
    pub zh: T,
}

impl<T> LocaleMap<T> {
    pub fn get(&self, locale: Locale) -> &T {
        match locale {
            Locale::En => &self.en,
            Locale::Zh => &self.zh,
        }
    }
}

/// Content that is either shared by all locales or translated per locale.
///
/// The variant is fixed when the content is deserialized: an object with
/// exactly the `en` and `zh` keys is `PerLocale`, any other shape is `Plain`.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(untagged)]
pub enum Localized<T> {
    PerLocale(LocaleMap<T>),
    Plain(T),
}

impl<T> Localized<T> {
    pub fn plain(value: T) -> Self {
        Localized::Plain(value)
    }

    pub fn per_locale(en: T, zh: T) -> Self {
        Localized::PerLocale(LocaleMap { en, zh })
    }

    pub fn resolve(&self, locale: Locale) -> &T {
        match self {
            Localized::Plain(value) => value,
            Localized::PerLocale(map) => map.get(locale),
        }
    }

    pub fn is_per_locale(&self) -> bool {
        matches!(self, Localized::PerLocale(_))
    }
}

impl<T> From<T> for Localized<T> {
    fn from(value: T) -> Self {
        Localized::Plain(value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub degree: Localized<String>,
    pub location: String,
    pub period: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courses: Option<Localized<Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievements: Option<Localized<Vec<String>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub role: Localized<String>,
    pub location: String,
    pub period: String,
    pub bullets: Localized<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: Localized<String>,
    pub role: Localized<String>,
    pub period: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub problem: Localized<String>,
    pub dataset: Localized<String>,
    pub approach: Localized<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    pub impact: Localized<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_steps: Option<Localized<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_study_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<String>,
}

/// Title and description live in the translation table under
/// `focusAreas.<key>.title` and `focusAreas.<key>.description`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusArea {
    pub key: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub location: String,
    pub email: String,
    pub phone: String,
    pub headline: Localized<String>,
    pub summary: Localized<String>,
    pub about: Localized<String>,
    pub avatar: Avatar,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
    #[serde(default)]
    pub social: Vec<SocialLink>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skills: Vec<SkillCategory>,
    #[serde(default)]
    pub focus_areas: Vec<FocusArea>,
}

/// Client-local key/value storage for user preferences.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
