//! Standard PageRank algorithm
//!
//! Power iteration with uniform teleportation. Mass held by dangling nodes
//! (isolated keywords) is spread uniformly so scores keep summing to one.

use super::PageRankResult;
use crate::config::TextRankConfig;
use crate::graph::csr::CsrGraph;

/// Standard PageRank implementation
#[derive(Debug, Clone)]
pub struct StandardPageRank {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Maximum number of iterations
    pub max_iterations: usize,
    /// Convergence threshold
    pub threshold: f64,
    /// Propagate along edge weights instead of treating edges as equal
    pub weighted: bool,
}

impl Default for StandardPageRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            threshold: 1e-6,
            weighted: true,
        }
    }
}

impl StandardPageRank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take damping, iteration and weighting settings from a config
    pub fn from_config(cfg: &TextRankConfig) -> Self {
        Self {
            damping: cfg.damping,
            max_iterations: cfg.max_iterations,
            threshold: cfg.convergence_threshold,
            weighted: cfg.use_edge_weights,
        }
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }

    /// Run PageRank on a graph
    ///
    /// Returns the result even if convergence wasn't achieved, with `converged=false`.
    pub fn run(&self, graph: &CsrGraph) -> PageRankResult {
        let n = graph.num_nodes;
        if n == 0 {
            return PageRankResult::new(vec![], 0, 0.0, true);
        }

        let mut scores = vec![1.0 / n as f64; n];
        let mut new_scores = vec![0.0; n];

        // Out-mass per node: total edge weight, or degree when unweighted
        let out_mass: Vec<f64> = (0..n as u32)
            .map(|node| {
                if self.weighted {
                    graph.node_total_weight(node)
                } else {
                    graph.degree(node) as f64
                }
            })
            .collect();
        let dangling_nodes = graph.dangling_nodes();

        let teleport = (1.0 - self.damping) / n as f64;
        let mut iterations = 0;
        let mut delta = f64::MAX;

        while iterations < self.max_iterations && delta > self.threshold {
            iterations += 1;

            let dangling_mass: f64 = dangling_nodes.iter().map(|&d| scores[d as usize]).sum();
            new_scores.fill(teleport + self.damping * dangling_mass / n as f64);

            for (node, &node_score) in scores.iter().enumerate() {
                let mass = out_mass[node];
                if mass <= 0.0 {
                    continue;
                }
                for (neighbor, weight) in graph.neighbors(node as u32) {
                    let w = if self.weighted { weight } else { 1.0 };
                    new_scores[neighbor as usize] += self.damping * node_score * w / mass;
                }
            }

            delta = scores
                .iter()
                .zip(new_scores.iter())
                .map(|(old, new)| (old - new).abs())
                .sum();

            std::mem::swap(&mut scores, &mut new_scores);
        }

        // Guard against drift; scores already sum to ~1
        let sum: f64 = scores.iter().sum();
        if sum > 0.0 {
            for score in &mut scores {
                *score /= sum;
            }
        }

        PageRankResult::new(scores, iterations, delta, delta <= self.threshold)
    }
}
