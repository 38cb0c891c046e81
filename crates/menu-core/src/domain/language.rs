// ============================================================================
// Menu Core - Language
// File: crates/menu-core/src/domain/language.rs
// Description: Display language and bilingual field selection
// ============================================================================

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Display language of the public menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Tr,
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Tr => "tr",
            Language::En => "en",
        }
    }

    /// Query value if it names a language, `default` otherwise
    pub fn from_query(raw: Option<&str>, default: Language) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or(default)
    }

    pub fn toggled(&self) -> Self {
        match self {
            Language::Tr => Language::En,
            Language::En => Language::Tr,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown language: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tr" => Ok(Language::Tr),
            "en" => Ok(Language::En),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}

/// English value when requested and non-empty, Turkish value otherwise.
pub fn localized<'a>(tr: &'a str, en: Option<&'a str>, lang: Language) -> &'a str {
    match (lang, en) {
        (Language::En, Some(en)) if !en.trim().is_empty() => en,
        _ => tr,
    }
}

/// Same selection for pairs where the Turkish value is optional too.
pub fn localized_opt<'a>(tr: Option<&'a str>, en: Option<&'a str>, lang: Language) -> Option<&'a str> {
    let tr = tr.filter(|v| !v.trim().is_empty());
    match lang {
        Language::En => en.filter(|v| !v.trim().is_empty()).or(tr),
        Language::Tr => tr,
    }
}

/// Comma separated list, trimmed, empty entries dropped
pub fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
