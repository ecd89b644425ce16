//! Stopword filtering
//!
//! Stopword lists come from the `stop-words` crate; Dutch is the default.
//! Lists can be extended or trimmed after construction.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

use crate::error::{Error, Result};

/// A filter for removing stopwords from text
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Set of stopwords (lowercase)
    stopwords: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::dutch()
    }
}

impl StopwordFilter {
    /// The Dutch stopword list
    pub fn dutch() -> Self {
        Self {
            stopwords: Self::load(LANGUAGE::Dutch),
        }
    }

    /// Stopword list for a language code or English language name
    pub fn for_language(language: &str) -> Result<Self> {
        let lang = match language.to_lowercase().as_str() {
            "nl" | "dutch" => LANGUAGE::Dutch,
            "en" | "english" => LANGUAGE::English,
            "de" | "german" => LANGUAGE::German,
            "fr" | "french" => LANGUAGE::French,
            _ => return Err(Error::UnsupportedLanguage(language.to_string())),
        };
        Ok(Self {
            stopwords: Self::load(lang),
        })
    }

    /// Create an empty stopword filter (no filtering)
    pub fn empty() -> Self {
        Self {
            stopwords: FxHashSet::default(),
        }
    }

    /// Create a stopword filter from a custom list
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            stopwords: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Add additional stopwords to the filter
    pub fn add_stopwords(&mut self, words: &[&str]) {
        self.stopwords
            .extend(words.iter().map(|w| w.to_lowercase()));
    }

    /// Remove stopwords from the filter
    pub fn remove_stopwords(&mut self, words: &[&str]) {
        for word in words {
            self.stopwords.remove(&word.to_lowercase());
        }
    }

    /// Check if a word is a stopword (case-insensitive)
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }

    fn load(lang: LANGUAGE) -> FxHashSet<String> {
        get(lang).iter().map(|s| s.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dutch_default() {
        let filter = StopwordFilter::default();
        assert!(filter.is_stopword("de"));
        assert!(filter.is_stopword("het"));
        assert!(filter.is_stopword("En"));
        assert!(!filter.is_stopword("fiets"));
    }

    #[test]
    fn test_for_language() {
        assert!(StopwordFilter::for_language("Dutch").unwrap().is_stopword("een"));
        assert!(StopwordFilter::for_language("en").unwrap().is_stopword("the"));
        assert!(matches!(
            StopwordFilter::for_language("xx"),
            Err(Error::UnsupportedLanguage(_))
        ));
    }

    #[test]
    fn test_custom_list() {
        let mut filter = StopwordFilter::from_list(&["Foo", "bar"]);
        assert!(filter.is_stopword("foo"));

        filter.add_stopwords(&["baz"]);
        filter.remove_stopwords(&["BAR"]);
        assert!(filter.is_stopword("baz"));
        assert!(!filter.is_stopword("bar"));
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn test_empty_filter() {
        let filter = StopwordFilter::empty();
        assert!(filter.is_empty());
        assert!(!filter.is_stopword("de"));
    }
}
