//! Noun chunk detection
//!
//! Identifies candidate phrases using pattern matching on POS tags.
//! Pattern: (ADJ)* (NOUN)+, restricted to graph candidates so that every
//! member of a chunk has a ranked node behind it.

use crate::types::{ChunkSpan, Token};

/// Configuration for noun chunk detection
#[derive(Debug, Clone)]
pub struct ChunkerConfig {
    /// Minimum number of tokens in a chunk
    pub min_length: usize,
    /// Maximum number of tokens in a chunk
    pub max_length: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            min_length: 1,
            max_length: 5,
        }
    }
}

/// Noun chunk detector
#[derive(Debug, Clone, Default)]
pub struct NounChunker {
    config: ChunkerConfig,
}

impl NounChunker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ChunkerConfig) -> Self {
        Self { config }
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.config.min_length = min_length;
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.config.max_length = max_length;
        self
    }

    /// Extract chunks from document tokens
    ///
    /// `tokens[i].token_idx` must equal `i`; spans index into `tokens`.
    pub fn extract_chunks(&self, tokens: &[Token]) -> Vec<ChunkSpan> {
        let mut chunks = Vec::new();

        for sentence in tokens.chunk_by(|a, b| a.sentence_idx == b.sentence_idx) {
            self.extract_from_sentence(sentence, &mut chunks);
        }

        chunks
    }

    fn extract_from_sentence(&self, tokens: &[Token], chunks: &mut Vec<ChunkSpan>) {
        let mut i = 0;
        while i < tokens.len() {
            match self.match_at(tokens, i) {
                Some(end) if (self.config.min_length..=self.config.max_length).contains(&(end - i)) => {
                    chunks.push(ChunkSpan {
                        start_token: tokens[i].token_idx,
                        end_token: tokens[end - 1].token_idx + 1,
                        sentence_idx: tokens[i].sentence_idx,
                    });
                    i = end;
                }
                _ => i += 1,
            }
        }
    }

    /// End (exclusive, sentence-local) of a chunk starting at `start`
    fn match_at(&self, tokens: &[Token], start: usize) -> Option<usize> {
        let is_adj = |t: &Token| t.is_graph_candidate() && t.pos.is_adjective();
        let is_noun = |t: &Token| t.is_graph_candidate() && t.pos.is_noun();

        let mut end = start;
        while end < tokens.len() && is_adj(&tokens[end]) {
            end += 1;
        }
        let noun_start = end;
        while end < tokens.len() && is_noun(&tokens[end]) {
            end += 1;
        }

        (end > noun_start).then_some(end)
    }
}

/// Surface text of a chunk
pub fn chunk_text(tokens: &[Token], chunk: &ChunkSpan) -> String {
    tokens[chunk.start_token..chunk.end_token]
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Space-separated node keys of a chunk
pub fn chunk_key(tokens: &[Token], chunk: &ChunkSpan) -> String {
    tokens[chunk.start_token..chunk.end_token]
        .iter()
        .filter_map(|t| t.key.as_deref())
        .collect::<Vec<_>>()
        .join(" ")
}
