//! # Quanda
//!
//! A keyword question answering engine over knowledge graphs for Rust.
//!
//! Quanda resolves short, ungrammatical questions ("birthplace bill gates
//! wife") into knowledge-base entities: question spans are matched against
//! a dictionary of entity surface forms, the resulting candidates are
//! connected through knowledge-base relations into a per-question graph,
//! and the best-explained node of that graph is the answer.
//!
//! ## Features
//!
//! - Greedy longest-match-first segmentation of the question
//! - Exact and fuzzy (edit-distance tolerant) dictionary backends
//! - Bounded, evidence-propagating candidate-graph expansion
//! - Pluggable knowledge-base relation lookup

pub mod analysis;
pub mod cli;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod graph;
pub mod import;
pub mod kb;
pub mod segment;

pub mod prelude {
    pub use crate::dictionary::{Dictionary, FuzzyConfig, FuzzyDictionary, HashMapDictionary};
    pub use crate::engine::{AnswerEngine, EngineConfig};
    pub use crate::error::{QuandaError, Result};
    pub use crate::graph::{CandidateGraph, ExpansionLimits};
    pub use crate::import::{ImportSource, TsvSource};
    pub use crate::kb::{KnowledgeSource, MemoryKnowledge, Relation};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
