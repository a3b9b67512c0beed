//! Bilingual messages and the translation boundary.
//!
//! Engines never look up localized strings themselves. Messages that go
//! straight to the player carry both languages in a [`BilingualText`];
//! engines that build text from keys take a [`Translator`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    /// English.
    #[default]
    En,
    /// Vietnamese.
    Vi,
}

/// A message carried in both supported languages.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BilingualText {
    /// English text.
    pub en: String,
    /// Vietnamese text.
    pub vi: String,
}

impl BilingualText {
    /// Create a message from both translations.
    pub fn new(en: impl Into<String>, vi: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            vi: vi.into(),
        }
    }

    /// Pick the text for a language.
    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.en,
            Language::Vi => &self.vi,
        }
    }
}

impl fmt::Display for BilingualText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.en)
    }
}

/// Opaque key-to-string mapping injected into engines.
pub trait Translator {
    /// Translate a key. Unknown keys should come back unchanged.
    fn t(&self, key: &str) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str) -> String,
{
    fn t(&self, key: &str) -> String {
        self(key)
    }
}

/// A translator that returns every key unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyEchoTranslator;

impl Translator for KeyEchoTranslator {
    fn t(&self, key: &str) -> String {
        key.to_string()
    }
}
