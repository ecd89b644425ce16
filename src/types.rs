//! Core data types shared across the crate

use serde::{Deserialize, Serialize};

/// Coarse part-of-speech category
///
/// Derived from the fine-grained tag produced by a language model's tagger.
/// The raw tag is kept on [`Token::tag`]; this enum is what the chunker and
/// graph code match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PosTag {
    Noun,
    ProperNoun,
    Verb,
    Adjective,
    Adverb,
    Determiner,
    Pronoun,
    Preposition,
    Conjunction,
    Numeral,
    Punctuation,
    Interjection,
    Other,
}

impl PosTag {
    /// Map a CoNLL-2002 Dutch tag (`N`, `Adj`, `Art`, ...) to its coarse category
    pub fn from_dutch_tag(tag: &str) -> Self {
        // Subtype suffixes such as "N(eigen)" share the base category
        let base = tag.split('(').next().unwrap_or(tag);
        match base {
            "N" if tag.contains("eigen") => PosTag::ProperNoun,
            "N" => PosTag::Noun,
            "V" => PosTag::Verb,
            "Adj" => PosTag::Adjective,
            "Adv" => PosTag::Adverb,
            "Art" => PosTag::Determiner,
            "Pron" => PosTag::Pronoun,
            "Prep" => PosTag::Preposition,
            "Conj" => PosTag::Conjunction,
            "Num" => PosTag::Numeral,
            "Punc" => PosTag::Punctuation,
            "Int" => PosTag::Interjection,
            _ => PosTag::Other,
        }
    }

    /// Check if this is a noun (common or proper)
    pub fn is_noun(&self) -> bool {
        matches!(self, PosTag::Noun | PosTag::ProperNoun)
    }

    /// Check if this is an adjective
    pub fn is_adjective(&self) -> bool {
        matches!(self, PosTag::Adjective)
    }
}

/// A tagged token within a document
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Normalized token text (quotes removed, lowercased)
    pub text: String,
    /// Raw tag as emitted by the tagger
    pub tag: String,
    /// Coarse category of `tag`
    pub pos: PosTag,
    /// Graph node key; `None` for tokens that never become nodes
    pub key: Option<String>,
    /// Index of the sentence within the document
    pub sentence_idx: usize,
    /// Index of the token within the document
    pub token_idx: usize,
    /// Whether the token is a stopword
    pub is_stopword: bool,
}

impl Token {
    /// Create a token without a node key
    pub fn new(
        text: impl Into<String>,
        tag: impl Into<String>,
        sentence_idx: usize,
        token_idx: usize,
    ) -> Self {
        let tag = tag.into();
        Self {
            text: text.into(),
            pos: PosTag::from_dutch_tag(&tag),
            tag,
            key: None,
            sentence_idx,
            token_idx,
            is_stopword: false,
        }
    }

    /// Attach a node key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Mark as stopword
    pub fn with_stopword(mut self, is_stopword: bool) -> Self {
        self.is_stopword = is_stopword;
        self
    }

    /// Whether this token contributes a node to the co-occurrence graph
    pub fn is_graph_candidate(&self) -> bool {
        self.key.is_some() && !self.is_stopword
    }
}

/// A contiguous span of tokens forming a candidate phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSpan {
    /// First token index (document-level, inclusive)
    pub start_token: usize,
    /// Last token index (document-level, exclusive)
    pub end_token: usize,
    pub sentence_idx: usize,
}

impl ChunkSpan {
    /// Number of tokens in the span
    pub fn len(&self) -> usize {
        self.end_token - self.start_token
    }

    pub fn is_empty(&self) -> bool {
        self.end_token == self.start_token
    }
}

/// A ranked graph node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keyword {
    /// Node key (tag initial + stem)
    pub key: String,
    /// Most frequent surface form observed for the key
    pub text: String,
    pub score: f64,
    /// Number of occurrences in the document
    pub count: usize,
}

/// A ranked multi-token phrase
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Phrase {
    /// Surface text of the first occurrence
    pub text: String,
    /// Node keys of the member tokens, space separated
    pub key: String,
    pub score: f64,
    /// Number of occurrences in the document
    pub count: usize,
}
