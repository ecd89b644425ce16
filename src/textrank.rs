//! TextRank keyword and phrase extraction
//!
//! [`TextRank::analyze`] drives a [`LanguageModel`] over a document, builds
//! the co-occurrence graph over relevant tokens, ranks it with PageRank and
//! returns the top keywords and noun phrases.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::{debug, debug_span, warn};

use crate::config::TextRankConfig;
use crate::error::Result;
use crate::graph::builder::build_graph_parallel;
use crate::graph::csr::CsrGraph;
use crate::language::LanguageModel;
use crate::pagerank::standard::StandardPageRank;
use crate::pagerank::PageRankResult;
use crate::phrase::chunker::{ChunkerConfig, NounChunker};
use crate::phrase::extraction::PhraseExtractor;
use crate::types::{Keyword, Phrase, PosTag, Token};

/// Ranked output of one document
#[derive(Debug, Clone, Default, Serialize)]
pub struct TextRankResult {
    pub keywords: Vec<Keyword>,
    pub phrases: Vec<Phrase>,
    /// Number of sentences found
    pub sentences: usize,
    /// PageRank iterations performed
    pub iterations: usize,
    pub converged: bool,
}

/// TextRank engine bound to a language model
#[derive(Clone)]
pub struct TextRank {
    language: Arc<dyn LanguageModel>,
    config: TextRankConfig,
}

impl std::fmt::Debug for TextRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRank")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TextRank {
    /// Create an engine; fails if the configuration is out of range
    pub fn new(language: Arc<dyn LanguageModel>, config: TextRankConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { language, config })
    }

    pub fn config(&self) -> &TextRankConfig {
        &self.config
    }

    /// Split, tokenize and tag a document
    ///
    /// Paragraphs are separated by blank lines. Token indices run over the
    /// whole document; sentence indices likewise.
    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        let _span = debug_span!("tokenize", bytes = text.len()).entered();
        let lang = self.language.as_ref();
        let stopwords = lang.stopwords();

        let mut tokens = Vec::new();
        let mut sentence_idx = 0;

        for paragraph in text.split("\n\n") {
            for sentence in lang.split_paragraph(paragraph) {
                let words = lang.tokenize_sentence(&sentence);
                let tags = lang.tag_tokens(&words);

                for (word, tag) in words.into_iter().zip(tags) {
                    let mut token = Token::new(word, tag, sentence_idx, tokens.len());
                    token.is_stopword = stopwords.is_stopword(&token.text);
                    if lang.is_relevant(&token.tag)
                        && !token.is_stopword
                        && !lang.scrub_token(&token.text).is_empty()
                    {
                        token.key = Some(lang.node_key(&token.text, &token.tag)?);
                        // The chunker matches on the coarse category
                        if lang.is_noun(&token.tag) {
                            if !token.pos.is_noun() {
                                token.pos = PosTag::Noun;
                            }
                        } else if lang.is_adjective(&token.tag) {
                            token.pos = PosTag::Adjective;
                        }
                    }
                    tokens.push(token);
                }
                sentence_idx += 1;
            }
        }

        debug!(sentences = sentence_idx, tokens = tokens.len(), "tokenized document");
        Ok(tokens)
    }

    /// Rank a document
    pub fn analyze(&self, text: &str) -> Result<TextRankResult> {
        let tokens = self.tokenize(text)?;
        Ok(self.rank_tokens(&tokens))
    }

    /// Rank pre-tagged tokens
    ///
    /// `tokens[i].token_idx` must equal `i`, as produced by [`TextRank::tokenize`].
    pub fn rank_tokens(&self, tokens: &[Token]) -> TextRankResult {
        let cfg = &self.config;
        let sentences = tokens
            .last()
            .map_or(0, |t| t.sentence_idx + 1);

        let graph = {
            let _span = debug_span!("graph").entered();
            let builder = build_graph_parallel(
                tokens,
                cfg.window_size,
                cfg.use_edge_weights,
                cfg.parallel_threshold,
            );
            debug!(
                nodes = builder.node_count(),
                edges = builder.edge_count(),
                "built co-occurrence graph"
            );
            CsrGraph::from_builder(&builder)
        };

        let ranks = {
            let _span = debug_span!("pagerank").entered();
            StandardPageRank::from_config(cfg).run(&graph)
        };
        if !ranks.converged {
            warn!(
                iterations = ranks.iterations,
                delta = ranks.delta,
                "PageRank did not converge"
            );
        }

        let keywords = self.keywords(tokens, &graph, &ranks);
        let chunker = NounChunker::with_config(ChunkerConfig {
            min_length: cfg.min_phrase_length,
            max_length: cfg.max_phrase_length,
        });
        let phrases = PhraseExtractor::new(chunker).extract(tokens, &graph, &ranks, cfg.top_n);

        TextRankResult {
            keywords,
            phrases,
            sentences,
            iterations: ranks.iterations,
            converged: ranks.converged,
        }
    }

    fn keywords(&self, tokens: &[Token], graph: &CsrGraph, ranks: &PageRankResult) -> Vec<Keyword> {
        // key -> surface text -> occurrences
        let mut forms: FxHashMap<&str, FxHashMap<&str, usize>> = FxHashMap::default();
        for token in tokens.iter().filter(|t| t.is_graph_candidate()) {
            if let Some(key) = token.key.as_deref() {
                *forms
                    .entry(key)
                    .or_default()
                    .entry(token.text.as_str())
                    .or_insert(0) += 1;
            }
        }

        let mut keywords: Vec<Keyword> = (0..graph.num_nodes as u32)
            .map(|id| {
                let key = graph.key(id);
                let counts = forms.get(key);
                // Most frequent form, ties to the lexicographically smallest
                let text = counts
                    .and_then(|c| {
                        c.iter()
                            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
                            .map(|(t, _)| t.to_string())
                    })
                    .unwrap_or_else(|| key.to_string());
                Keyword {
                    key: key.to_string(),
                    text,
                    score: ranks.score(id),
                    count: counts.map_or(0, |c| c.values().sum()),
                }
            })
            .collect();

        keywords.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.key.cmp(&b.key)));
        keywords.truncate(self.config.top_n);
        keywords
    }
}
