//! Co-occurrence graph
//!
//! [`builder::GraphBuilder`] accumulates nodes and edges while scanning
//! tokens; [`csr::CsrGraph`] is the frozen form PageRank iterates over.

pub mod builder;
pub mod csr;
