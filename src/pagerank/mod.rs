//! PageRank over the co-occurrence graph

pub mod standard;

/// Result of a PageRank computation
#[derive(Debug, Clone)]
pub struct PageRankResult {
    /// Scores for each node (indexed by node ID)
    pub scores: Vec<f64>,
    /// Number of iterations performed
    pub iterations: usize,
    /// Final convergence delta (L1)
    pub delta: f64,
    /// Whether the delta fell below the threshold
    pub converged: bool,
}

impl PageRankResult {
    pub fn new(scores: Vec<f64>, iterations: usize, delta: f64, converged: bool) -> Self {
        Self {
            scores,
            iterations,
            delta,
            converged,
        }
    }

    /// Top `n` nodes by score; equal scores keep ascending node order
    pub fn top_n(&self, n: usize) -> Vec<(u32, f64)> {
        let mut indexed: Vec<_> = self
            .scores
            .iter()
            .enumerate()
            .map(|(i, &s)| (i as u32, s))
            .collect();
        indexed.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        indexed.truncate(n);
        indexed
    }

    /// Score of a node, 0.0 when out of range
    pub fn score(&self, node: u32) -> f64 {
        self.scores.get(node as usize).copied().unwrap_or(0.0)
    }
}
