//! TextRank keyword and phrase extraction for Dutch text
//!
//! ```no_run
//! use std::sync::Arc;
//! use textrank_nl::{LanguageDutch, TextRank, TextRankConfig};
//!
//! let dutch = LanguageDutch::bundled()?;
//! let engine = TextRank::new(Arc::new(dutch), TextRankConfig::default())?;
//! let result = engine.analyze("De nieuwe trein rijdt naar Utrecht.")?;
//! for kw in &result.keywords {
//!     println!("{:.4}  {}", kw.score, kw.text);
//! }
//! # Ok::<(), textrank_nl::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod language;
pub mod nlp;
pub mod pagerank;
pub mod phrase;
pub mod textrank;
pub mod types;

pub use config::TextRankConfig;
pub use error::{Error, Result};
pub use language::{bundled_language, load_language, LanguageDutch, LanguageModel};
pub use textrank::{TextRank, TextRankResult};
pub use types::{Keyword, Phrase, PosTag, Token};
