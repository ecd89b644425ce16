//! Natural Language Processing components
//!
//! Sentence detection, tokenization, part-of-speech tagging, stemming and
//! stopword filtering. The first three are driven by plain-text model files
//! loaded from a resource directory.

pub mod sentence;
pub mod stemmer;
pub mod stopwords;
pub mod tagger;
pub mod tokenizer;

use std::path::Path;

use crate::error::{Error, Result};

/// Read a model file and return its meaningful lines with 1-based line numbers
///
/// Blank lines and lines starting with `#` are skipped; surrounding
/// whitespace is trimmed except for tabs, which separate fields.
pub(crate) fn model_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_matches(|c: char| c == ' ' || c == '\r')))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

/// Load a model file into memory
pub(crate) fn read_model(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::io(path, e))
}
