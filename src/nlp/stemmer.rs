//! Snowball stemming
//!
//! Thin wrapper over `rust-stemmers` so callers depend on one concrete type
//! per language.

use rust_stemmers::{Algorithm, Stemmer};

/// Snowball stemmer for Dutch
pub struct DutchStemmer {
    inner: Stemmer,
}

impl std::fmt::Debug for DutchStemmer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DutchStemmer").finish_non_exhaustive()
    }
}

impl Default for DutchStemmer {
    fn default() -> Self {
        Self::new()
    }
}

impl DutchStemmer {
    pub fn new() -> Self {
        Self {
            inner: Stemmer::create(Algorithm::Dutch),
        }
    }

    /// Stem a single token
    pub fn stem(&self, token: &str) -> String {
        self.inner.stem(token).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_en() {
        let stemmer = DutchStemmer::new();
        assert_eq!(stemmer.stem("boeken"), "boek");
        assert_eq!(stemmer.stem("fietsen"), "fiets");
    }

    #[test]
    fn test_inflections_share_stem() {
        let stemmer = DutchStemmer::new();
        assert_eq!(stemmer.stem("boeken"), stemmer.stem("boek"));
    }

    #[test]
    fn test_empty_token() {
        assert_eq!(DutchStemmer::new().stem(""), "");
    }
}
