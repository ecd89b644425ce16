//! TextRank configuration
//!
//! ```json
//! {
//!   "damping": 0.85,
//!   "window_size": 3,
//!   "top_n": 10,
//!   "language": "nl"
//! }
//! ```
//!
//! Every field is optional; omitted fields take the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Parameters for graph construction, ranking and result selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextRankConfig {
    /// PageRank damping factor, in (0, 1)
    pub damping: f64,
    /// Upper bound on power iterations
    pub max_iterations: usize,
    /// L1 delta below which PageRank is considered converged
    pub convergence_threshold: f64,
    /// Co-occurrence window over graph candidates (>= 2)
    pub window_size: usize,
    /// Number of keywords and phrases to return
    pub top_n: usize,
    /// Accumulate repeated co-occurrences as edge weight
    pub use_edge_weights: bool,
    pub min_phrase_length: usize,
    pub max_phrase_length: usize,
    /// Language code passed to [`crate::language::load_language`]
    pub language: String,
    /// Token count above which the graph is built in parallel
    pub parallel_threshold: usize,
}

impl Default for TextRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            convergence_threshold: 1e-6,
            window_size: 3,
            top_n: 10,
            use_edge_weights: true,
            min_phrase_length: 1,
            max_phrase_length: 5,
            language: "nl".to_string(),
            parallel_threshold: 1000,
        }
    }
}

impl TextRankConfig {
    /// Parse a configuration from JSON and validate it
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read a JSON configuration file and validate it
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json_str(&json)
    }

    /// Set the number of results
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Set the co-occurrence window
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(Error::InvalidConfig(format!(
                "damping must be in (0, 1), got {}",
                self.damping
            )));
        }
        if self.max_iterations == 0 {
            return Err(Error::InvalidConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if self.convergence_threshold.is_nan() || self.convergence_threshold < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "convergence_threshold must be non-negative, got {}",
                self.convergence_threshold
            )));
        }
        if self.window_size < 2 {
            return Err(Error::InvalidConfig(format!(
                "window_size must be at least 2, got {}",
                self.window_size
            )));
        }
        if self.min_phrase_length == 0 || self.min_phrase_length > self.max_phrase_length {
            return Err(Error::InvalidConfig(format!(
                "phrase length bounds {}..={} are empty",
                self.min_phrase_length, self.max_phrase_length
            )));
        }
        Ok(())
    }
}
