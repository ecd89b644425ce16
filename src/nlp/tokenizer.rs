//! Word tokenization
//!
//! Splits a sentence on whitespace and peels punctuation off word edges.
//! Tokens listed in the [`TokenizerModel`] (clitics such as `z'n` or `'s`,
//! dotted abbreviations) are never split.

use std::path::Path;

use rustc_hash::FxHashSet;

use super::{model_lines, read_model};
use crate::error::Result;

/// Tokens the tokenizer must keep intact
#[derive(Debug, Clone, Default)]
pub struct TokenizerModel {
    /// Lowercase
    protected: FxHashSet<String>,
}

impl TokenizerModel {
    /// Load a model file (one protected token per line)
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = read_model(path.as_ref())?;
        Ok(Self::parse(&text))
    }

    /// Parse model text
    pub fn parse(text: &str) -> Self {
        let protected = model_lines(text)
            .map(|(_, line)| line.to_lowercase())
            .collect();
        Self { protected }
    }

    /// Build a model from a list of protected tokens
    pub fn from_list(tokens: &[&str]) -> Self {
        Self {
            protected: tokens.iter().map(|t| t.to_lowercase()).collect(),
        }
    }

    /// Case-insensitive membership test
    pub fn is_protected(&self, token: &str) -> bool {
        !self.protected.is_empty() && self.protected.contains(&token.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.protected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.protected.is_empty()
    }
}

/// Punctuation that is split off the edges of a word
fn is_edge_punct(c: char) -> bool {
    matches!(
        c,
        '.' | ',' | ';' | ':' | '!' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '"' | '\''
            | '«' | '»' | '…' | '‘' | '’' | '“' | '”' | '„'
    )
}

/// `d.w.z.`, `o.a.`: letters separated by periods
fn is_dotted_abbreviation(word: &str) -> bool {
    let Some(body) = word.strip_suffix('.') else {
        return false;
    };
    body.contains('.')
        && body
            .split('.')
            .all(|part| !part.is_empty() && part.chars().all(char::is_alphabetic))
}

/// Sentence tokenizer
#[derive(Debug, Clone)]
pub struct Tokenizer<'m> {
    model: &'m TokenizerModel,
}

impl<'m> Tokenizer<'m> {
    pub fn new(model: &'m TokenizerModel) -> Self {
        Self { model }
    }

    /// Tokenize one sentence, preserving the original casing
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        for chunk in text.split_whitespace() {
            self.split_chunk(chunk, &mut tokens);
        }
        tokens
    }

    fn split_chunk(&self, chunk: &str, out: &mut Vec<String>) {
        let mut rest = chunk;

        while let Some(c) = rest.chars().next() {
            if self.model.is_protected(rest) || !is_edge_punct(c) {
                break;
            }
            let len = if c == '.' {
                rest.len() - rest.trim_start_matches('.').len()
            } else {
                c.len_utf8()
            };
            out.push(rest[..len].to_string());
            rest = &rest[len..];
        }

        let mut trailing: Vec<String> = Vec::new();
        while let Some(c) = rest.chars().next_back() {
            if self.model.is_protected(rest) {
                break;
            }
            // A run of periods is one token
            let dots = rest.len() - rest.trim_end_matches('.').len();
            if dots > 1 {
                trailing.push(rest[rest.len() - dots..].to_string());
                rest = &rest[..rest.len() - dots];
                continue;
            }
            if !is_edge_punct(c) || (c == '.' && is_dotted_abbreviation(rest)) {
                break;
            }
            trailing.push(c.to_string());
            rest = &rest[..rest.len() - c.len_utf8()];
        }

        if !rest.is_empty() {
            out.push(rest.to_string());
        }
        out.extend(trailing.into_iter().rev());
    }
}
