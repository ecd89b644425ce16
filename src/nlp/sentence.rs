//! Sentence boundary detection
//!
//! A rule-based detector parameterized by a [`SentenceModel`], the list of
//! abbreviations after which a period does not end a sentence.

use std::path::Path;

use rustc_hash::FxHashSet;

use super::{model_lines, read_model};
use crate::error::Result;

/// Abbreviations known to the sentence detector
#[derive(Debug, Clone, Default)]
pub struct SentenceModel {
    /// Lowercase, without the trailing period
    abbreviations: FxHashSet<String>,
}

impl SentenceModel {
    /// Load a model file (one abbreviation per line)
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = read_model(path.as_ref())?;
        Ok(Self::parse(&text))
    }

    /// Parse model text
    pub fn parse(text: &str) -> Self {
        let abbreviations = model_lines(text)
            .map(|(_, line)| normalize_abbreviation(line))
            .filter(|a| !a.is_empty())
            .collect();
        Self { abbreviations }
    }

    /// Build a model from a list of abbreviations
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            abbreviations: words.iter().map(|w| normalize_abbreviation(w)).collect(),
        }
    }

    /// Check whether `word` (with or without trailing period) is an abbreviation
    pub fn is_abbreviation(&self, word: &str) -> bool {
        self.abbreviations.contains(&normalize_abbreviation(word))
    }

    pub fn len(&self) -> usize {
        self.abbreviations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abbreviations.is_empty()
    }
}

fn normalize_abbreviation(word: &str) -> String {
    word.trim().trim_end_matches('.').to_lowercase()
}

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '…')
}

fn is_closer(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '»' | '’' | '”')
}

fn is_opener(c: char) -> bool {
    matches!(c, '"' | '\'' | '(' | '[' | '«' | '‘' | '“' | '„')
}

/// Characters that may open a new sentence after a terminal run
fn starts_sentence(c: char) -> bool {
    c.is_uppercase() || c.is_ascii_digit() || matches!(c, '"' | '\'' | '«' | '‘' | '“' | '„')
}

/// Splits paragraph text into sentences
#[derive(Debug, Clone)]
pub struct SentenceDetector<'m> {
    model: &'m SentenceModel,
}

impl<'m> SentenceDetector<'m> {
    pub fn new(model: &'m SentenceModel) -> Self {
        Self { model }
    }

    /// Split `text` into trimmed, non-empty sentences
    pub fn detect(&self, text: &str) -> Vec<String> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let byte_at = |i: usize| chars.get(i).map(|&(b, _)| b).unwrap_or(text.len());

        let mut sentences = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i].1;

            // A blank line always separates sentences
            if c == '\n' {
                let mut j = i + 1;
                while j < chars.len() && matches!(chars[j].1, '\r' | ' ' | '\t') {
                    j += 1;
                }
                if j < chars.len() && chars[j].1 == '\n' {
                    push_trimmed(&mut sentences, &text[start..byte_at(i)]);
                    start = byte_at(j + 1);
                    i = j + 1;
                    continue;
                }
            }

            if is_terminal(c) {
                let mut j = i;
                while j < chars.len() && is_terminal(chars[j].1) {
                    j += 1;
                }
                let single_period = j == i + 1 && c == '.';
                while j < chars.len() && is_closer(chars[j].1) {
                    j += 1;
                }

                if self.is_boundary(text, start, byte_at(i), &chars, j, single_period) {
                    push_trimmed(&mut sentences, &text[start..byte_at(j)]);
                    start = byte_at(j);
                }
                i = j;
                continue;
            }

            i += 1;
        }

        push_trimmed(&mut sentences, &text[start..]);
        sentences
    }

    /// Decide whether the terminal run ending before char index `after` ends a sentence
    fn is_boundary(
        &self,
        text: &str,
        start: usize,
        terminal_byte: usize,
        chars: &[(usize, char)],
        after: usize,
        single_period: bool,
    ) -> bool {
        if after >= chars.len() {
            return true;
        }
        // "3.5", "www.example.nl" and the like
        if !chars[after].1.is_whitespace() {
            return false;
        }

        let next = chars[after..]
            .iter()
            .map(|&(_, c)| c)
            .find(|c| !c.is_whitespace());
        let Some(next) = next else {
            return true;
        };

        if single_period {
            let before = &text[start..terminal_byte];
            let word = before
                .rsplit(char::is_whitespace)
                .next()
                .unwrap_or("")
                .trim_start_matches(is_opener);
            let mut letters = word.chars();
            let is_initial = matches!((letters.next(), letters.next()), (Some(l), None) if l.is_alphabetic());
            if is_initial || self.model.is_abbreviation(word) {
                return false;
            }
        }

        starts_sentence(next)
    }
}

fn push_trimmed(sentences: &mut Vec<String>, s: &str) {
    let s = s.trim();
    if !s.is_empty() {
        sentences.push(s.to_string());
    }
}
