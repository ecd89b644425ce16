//! Language models
//!
//! A [`LanguageModel`] bundles the language-specific pieces the TextRank
//! engine needs: sentence splitting, tokenization, tagging, stemming and the
//! tag predicates that decide which tokens become graph nodes.

pub mod dutch;

use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::nlp::stopwords::StopwordFilter;

pub use dutch::LanguageDutch;

/// Language-specific text processing consumed by [`crate::textrank::TextRank`]
pub trait LanguageModel: Send + Sync {
    /// Split paragraph text into sentences
    fn split_paragraph(&self, text: &str) -> Vec<String>;

    /// Tokenize a sentence into normalized tokens
    fn tokenize_sentence(&self, text: &str) -> Vec<String>;

    /// Tag a token list; the result has one tag per token
    fn tag_tokens(&self, tokens: &[String]) -> Vec<String>;

    /// Whether the tag denotes a noun
    fn is_noun(&self, pos: &str) -> bool;

    /// Whether the tag denotes an adjective
    fn is_adjective(&self, pos: &str) -> bool;

    /// Stem a single token
    fn stem_token(&self, token: &str) -> String;

    /// Stopwords for this language
    fn stopwords(&self) -> &StopwordFilter;

    /// Whether a token with this tag becomes a graph node
    fn is_relevant(&self, pos: &str) -> bool {
        self.is_noun(pos) || self.is_adjective(pos)
    }

    /// Strip edge punctuation and embedded straight quotes
    fn scrub_token(&self, text: &str) -> String {
        text.trim_matches(|c: char| !c.is_alphanumeric())
            .chars()
            .filter(|&c| c != '"' && c != '\'')
            .collect()
    }

    /// Stable graph node key: tag initial followed by the lowercased stem
    fn node_key(&self, text: &str, pos: &str) -> Result<String> {
        let initial = pos
            .chars()
            .next()
            .ok_or_else(|| Error::EmptyTag(text.to_string()))?;
        let stem = self.stem_token(&self.scrub_token(text)).to_lowercase();
        Ok(format!("{initial}{stem}"))
    }
}

/// Build the language model for `lang_code`, loading resources from `path`
pub fn load_language(path: impl AsRef<Path>, lang_code: &str) -> Result<Arc<dyn LanguageModel>> {
    match lang_code.to_lowercase().as_str() {
        "nl" | "dutch" => Ok(Arc::new(LanguageDutch::new(path)?)),
        other => Err(Error::UnsupportedLanguage(other.to_string())),
    }
}

/// Build the language model for `lang_code` from the models compiled into the crate
pub fn bundled_language(lang_code: &str) -> Result<Arc<dyn LanguageModel>> {
    match lang_code.to_lowercase().as_str() {
        "nl" | "dutch" => Ok(Arc::new(LanguageDutch::bundled()?)),
        other => Err(Error::UnsupportedLanguage(other.to_string())),
    }
}
