//! Phrase scoring
//!
//! Turns noun chunks into ranked [`Phrase`]s. A chunk scores the sum of its
//! members' node scores; chunks with identical key sequences are merged and
//! keep the surface text of their first occurrence.

use rustc_hash::FxHashMap;

use super::chunker::{chunk_key, chunk_text, NounChunker};
use crate::graph::csr::CsrGraph;
use crate::pagerank::PageRankResult;
use crate::types::{Phrase, Token};

/// Builds ranked phrases from tokens and node scores
#[derive(Debug, Clone, Default)]
pub struct PhraseExtractor {
    chunker: NounChunker,
}

impl PhraseExtractor {
    pub fn new(chunker: NounChunker) -> Self {
        Self { chunker }
    }

    /// Extract, merge and rank phrases; at most `top_n` are returned
    pub fn extract(
        &self,
        tokens: &[Token],
        graph: &CsrGraph,
        ranks: &PageRankResult,
        top_n: usize,
    ) -> Vec<Phrase> {
        let node_ids: FxHashMap<&str, u32> = graph
            .keys
            .iter()
            .enumerate()
            .map(|(i, k)| (k.as_str(), i as u32))
            .collect();

        let mut merged: Vec<Phrase> = Vec::new();
        let mut by_key: FxHashMap<String, usize> = FxHashMap::default();

        for chunk in self.chunker.extract_chunks(tokens) {
            let key = chunk_key(tokens, &chunk);
            if let Some(&idx) = by_key.get(&key) {
                merged[idx].count += 1;
                continue;
            }

            let score: f64 = tokens[chunk.start_token..chunk.end_token]
                .iter()
                .filter_map(|t| t.key.as_deref())
                .filter_map(|k| node_ids.get(k))
                .map(|&id| ranks.score(id))
                .sum();

            by_key.insert(key.clone(), merged.len());
            merged.push(Phrase {
                text: chunk_text(tokens, &chunk),
                key,
                score,
                count: 1,
            });
        }

        merged.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.key.cmp(&b.key)));
        merged.truncate(top_n);
        merged
    }
}
