//! Phrase extraction components
//!
//! Noun chunk detection and phrase scoring.

pub mod chunker;
pub mod extraction;
