//! Graph builder with efficient edge handling
//!
//! This module provides a mutable graph builder that uses FxHashMap
//! for O(1) edge lookups during construction. Nodes are identified by the
//! node keys produced by a [`crate::language::LanguageModel`].

use crate::types::Token;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// A node in the graph builder
#[derive(Debug, Clone)]
pub struct BuilderNode {
    /// The node key (tag initial + stem)
    pub key: String,
    /// Adjacency list: target node ID -> edge weight
    pub edges: FxHashMap<u32, f64>,
}

impl BuilderNode {
    /// Create a new node
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            edges: FxHashMap::default(),
        }
    }
}

/// A mutable graph builder optimized for incremental construction
#[derive(Debug, Default)]
pub struct GraphBuilder {
    /// Maps node key -> node ID
    key_to_id: FxHashMap<String, u32>,
    /// Node storage
    nodes: Vec<BuilderNode>,
}

impl GraphBuilder {
    /// Create a new empty graph builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph builder with pre-allocated capacity
    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            key_to_id: FxHashMap::with_capacity_and_hasher(node_capacity, Default::default()),
            nodes: Vec::with_capacity(node_capacity),
        }
    }

    /// Get or create a node for the given key, returning its ID
    pub fn get_or_create_node(&mut self, key: &str) -> u32 {
        if let Some(&id) = self.key_to_id.get(key) {
            return id;
        }

        let id = self.nodes.len() as u32;
        self.key_to_id.insert(key.to_string(), id);
        self.nodes.push(BuilderNode::new(key));
        id
    }

    /// Increment the edge weight between two nodes
    ///
    /// If the edge doesn't exist, it's created with `weight`.
    pub fn increment_edge(&mut self, from: u32, to: u32, weight: f64) {
        if from == to {
            return;
        }

        // Undirected: store both directions
        if let Some(node) = self.nodes.get_mut(from as usize) {
            *node.edges.entry(to).or_insert(0.0) += weight;
        }
        if let Some(node) = self.nodes.get_mut(to as usize) {
            *node.edges.entry(from).or_insert(0.0) += weight;
        }
    }

    /// Create an edge of weight 1.0 unless one already exists
    pub fn link(&mut self, from: u32, to: u32) {
        if from == to {
            return;
        }
        if let Some(node) = self.nodes.get_mut(from as usize) {
            node.edges.entry(to).or_insert(1.0);
        }
        if let Some(node) = self.nodes.get_mut(to as usize) {
            node.edges.entry(from).or_insert(1.0);
        }
    }

    fn connect(&mut self, from: u32, to: u32, use_weights: bool) {
        if use_weights {
            self.increment_edge(from, to, 1.0);
        } else {
            self.link(from, to);
        }
    }

    /// Build a graph from tokens using a sliding window
    ///
    /// Only graph candidates become nodes. The window slides over the
    /// candidate sequence of each sentence, so two candidates are linked when
    /// fewer than `window_size` candidates separate their positions. With
    /// `use_weights` repeated co-occurrences accumulate; otherwise edges are
    /// binary.
    pub fn from_tokens(tokens: &[Token], window_size: usize, use_weights: bool) -> Self {
        let mut builder = Self::with_capacity(tokens.len() / 2);

        let candidates: Vec<(&str, usize)> = tokens
            .iter()
            .filter(|t| t.is_graph_candidate())
            .filter_map(|t| t.key.as_deref().map(|k| (k, t.sentence_idx)))
            .collect();

        // No edges across sentences
        let mut i = 0;
        while i < candidates.len() {
            let sent_idx = candidates[i].1;
            let sent_start = i;
            while i < candidates.len() && candidates[i].1 == sent_idx {
                i += 1;
            }
            let sent_end = i;

            for j in sent_start..sent_end {
                let node_j = builder.get_or_create_node(candidates[j].0);
                for k in (j + 1)..std::cmp::min(j + window_size, sent_end) {
                    let node_k = builder.get_or_create_node(candidates[k].0);
                    builder.connect(node_j, node_k, use_weights);
                }
            }
        }

        builder
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the total number of edges (counting each undirected edge once)
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum::<usize>() / 2
    }

    /// Get a node by ID
    pub fn get_node(&self, id: u32) -> Option<&BuilderNode> {
        self.nodes.get(id as usize)
    }

    /// Get a node ID by key
    pub fn get_node_id(&self, key: &str) -> Option<u32> {
        self.key_to_id.get(key).copied()
    }

    /// Get the key for a node ID
    pub fn get_key(&self, id: u32) -> Option<&str> {
        self.nodes.get(id as usize).map(|n| n.key.as_str())
    }

    /// Iterate over all nodes
    pub fn nodes(&self) -> impl Iterator<Item = (u32, &BuilderNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as u32, n))
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Build a graph from tokens in parallel (for large documents)
///
/// Sentences are processed in parallel into partial edge maps which are then
/// merged. Node IDs are assigned in first-occurrence order, so the result
/// matches [`GraphBuilder::from_tokens`] node for node.
pub fn build_graph_parallel(
    tokens: &[Token],
    window_size: usize,
    use_weights: bool,
    threshold: usize,
) -> GraphBuilder {
    if tokens.len() < threshold {
        return GraphBuilder::from_tokens(tokens, window_size, use_weights);
    }

    let mut sentences: Vec<Vec<&str>> = Vec::new();
    let mut current_sent = Vec::new();
    let mut current_idx = None;

    for token in tokens.iter().filter(|t| t.is_graph_candidate()) {
        let Some(key) = token.key.as_deref() else {
            continue;
        };
        if current_idx != Some(token.sentence_idx) {
            if !current_sent.is_empty() {
                sentences.push(std::mem::take(&mut current_sent));
            }
            current_idx = Some(token.sentence_idx);
        }
        current_sent.push(key);
    }
    if !current_sent.is_empty() {
        sentences.push(current_sent);
    }

    let partial_graphs: Vec<Vec<(&str, &str)>> = sentences
        .par_iter()
        .map(|keys| {
            let mut pairs = Vec::new();
            for i in 0..keys.len() {
                for j in (i + 1)..std::cmp::min(i + window_size, keys.len()) {
                    pairs.push((keys[i], keys[j]));
                }
            }
            pairs
        })
        .collect();

    // Sequential merge keeps node numbering deterministic
    let mut builder = GraphBuilder::with_capacity(tokens.len() / 2);
    for (keys, pairs) in sentences.iter().zip(partial_graphs) {
        for key in keys {
            builder.get_or_create_node(key);
        }
        for (a, b) in pairs {
            let id_a = builder.get_or_create_node(a);
            let id_b = builder.get_or_create_node(b);
            builder.connect(id_a, id_b, use_weights);
        }
    }

    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_token(key: &str, sent_idx: usize, tok_idx: usize) -> Token {
        Token::new(key, "N", sent_idx, tok_idx).with_key(key)
    }

    #[test]
    fn test_graph_builder_basic() {
        let mut builder = GraphBuilder::new();

        let id_a = builder.get_or_create_node("Nmachin");
        let id_b = builder.get_or_create_node("Nler");
        let id_c = builder.get_or_create_node("Nmachin");

        assert_eq!(id_a, id_c);
        assert_ne!(id_a, id_b);
        assert_eq!(builder.node_count(), 2);
    }

    #[test]
    fn test_edge_incrementing() {
        let mut builder = GraphBuilder::new();

        let id_a = builder.get_or_create_node("a");
        let id_b = builder.get_or_create_node("b");

        builder.increment_edge(id_a, id_b, 1.0);
        builder.increment_edge(id_a, id_b, 1.0);

        assert_eq!(builder.get_node(id_a).unwrap().edges.get(&id_b), Some(&2.0));
        assert_eq!(builder.get_node(id_b).unwrap().edges.get(&id_a), Some(&2.0));
    }

    #[test]
    fn test_link_is_binary() {
        let mut builder = GraphBuilder::new();
        let a = builder.get_or_create_node("a");
        let b = builder.get_or_create_node("b");

        builder.link(a, b);
        builder.link(b, a);

        assert_eq!(builder.get_node(a).unwrap().edges.get(&b), Some(&1.0));
        assert_eq!(builder.edge_count(), 1);
    }

    #[test]
    fn test_from_tokens_window() {
        let tokens = vec![
            make_token("a", 0, 0),
            make_token("b", 0, 1),
            make_token("c", 0, 2),
            make_token("d", 0, 3),
        ];

        let builder = GraphBuilder::from_tokens(&tokens, 3, true);

        assert_eq!(builder.node_count(), 4);
        let a = builder.get_node_id("a").unwrap();
        let c = builder.get_node_id("c").unwrap();
        let d = builder.get_node_id("d").unwrap();
        let node_a = builder.get_node(a).unwrap();
        assert!(node_a.edges.contains_key(&c));
        assert!(!node_a.edges.contains_key(&d));
    }

    #[test]
    fn test_non_candidates_are_skipped() {
        let tokens = vec![
            make_token("a", 0, 0),
            Token::new("de", "Art", 0, 1),
            make_token("b", 0, 2).with_stopword(true),
            make_token("c", 0, 3),
        ];

        let builder = GraphBuilder::from_tokens(&tokens, 2, true);

        assert_eq!(builder.node_count(), 2);
        assert!(builder.get_node_id("b").is_none());
        // "a" and "c" are adjacent candidates
        let a = builder.get_node_id("a").unwrap();
        let c = builder.get_node_id("c").unwrap();
        assert!(builder.get_node(a).unwrap().edges.contains_key(&c));
    }

    #[test]
    fn test_no_cross_sentence_edges() {
        let tokens = vec![
            make_token("machine", 0, 0),
            make_token("learning", 0, 1),
            make_token("deep", 1, 2),
            make_token("neural", 1, 3),
        ];

        let builder = GraphBuilder::from_tokens(&tokens, 3, true);

        let learning_id = builder.get_node_id("learning").unwrap();
        let deep_id = builder.get_node_id("deep").unwrap();
        let learning_node = builder.get_node(learning_id).unwrap();
        assert!(!learning_node.edges.contains_key(&deep_id));
    }

    #[test]
    fn test_self_loops_prevented() {
        let mut builder = GraphBuilder::new();
        let id_a = builder.get_or_create_node("test");

        builder.increment_edge(id_a, id_a, 1.0);
        builder.link(id_a, id_a);

        assert!(builder.get_node(id_a).unwrap().edges.is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let keys = ["a", "b", "c", "a", "d", "e", "b"];
        let tokens: Vec<Token> = keys
            .iter()
            .enumerate()
            .map(|(i, k)| make_token(k, i / 3, i))
            .collect();

        let seq = GraphBuilder::from_tokens(&tokens, 3, true);
        let par = build_graph_parallel(&tokens, 3, true, 0);

        assert_eq!(seq.node_count(), par.node_count());
        for (id, node) in seq.nodes() {
            assert_eq!(par.get_key(id), Some(node.key.as_str()));
            assert_eq!(par.get_node(id).unwrap().edges, node.edges);
        }
    }
}
