//! Relation lookup against a knowledge base.
//!
//! The candidate graph treats the knowledge base as a black box: given an
//! entity identifier, a [`KnowledgeSource`] returns the relations leaving
//! it in one hop. Latency and completeness of the backend are outside the
//! engine's control; a failed lookup degrades to "no neighbors" at the
//! call site.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::AHashMap;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One outgoing relation of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// Identifier of the relation (predicate URI).
    pub predicate: String,
    /// Identifier of the neighbor entity.
    pub target: String,
}

/// One-hop relation lookup. Implementations must be safe for concurrent
/// read access; the engine never mutates the source while answering.
pub trait KnowledgeSource: Send + Sync {
    /// All (predicate, neighbor) pairs reachable from the entity in one hop.
    fn relations(&self, entity: &str) -> Result<Vec<Relation>>;
}

/// In-memory triple table, used by tests and the CLI.
#[derive(Debug, Clone, Default)]
pub struct MemoryKnowledge {
    triples: AHashMap<String, Vec<Relation>>,
}

impl MemoryKnowledge {
    /// Create an empty knowledge source.
    pub fn new() -> Self {
        MemoryKnowledge {
            triples: AHashMap::new(),
        }
    }

    /// Add a (subject, predicate, object) triple.
    pub fn add_triple(&mut self, subject: &str, predicate: &str, object: &str) {
        self.triples
            .entry(subject.to_string())
            .or_default()
            .push(Relation {
                predicate: predicate.to_string(),
                target: object.to_string(),
            });
    }

    /// Load triples from a `SUBJ\tPRED\tOBJ` file, one triple per line.
    /// Malformed lines are skipped with a logged warning.
    pub fn from_tsv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut knowledge = MemoryKnowledge::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            match fields.as_slice() {
                [subject, predicate, object] => {
                    knowledge.add_triple(subject, predicate, object);
                }
                _ => warn!(
                    "Skipping malformed triple in '{}': '{}'",
                    path.display(),
                    line
                ),
            }
        }
        Ok(knowledge)
    }

    /// Number of subjects with at least one relation.
    pub fn subject_count(&self) -> usize {
        self.triples.len()
    }
}

impl KnowledgeSource for MemoryKnowledge {
    fn relations(&self, entity: &str) -> Result<Vec<Relation>> {
        Ok(self.triples.get(entity).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_relations_for_unknown_entity_are_empty() {
        let knowledge = MemoryKnowledge::new();
        assert!(knowledge.relations("http://e/Nobody").unwrap().is_empty());
    }

    #[test]
    fn test_add_and_query_triples() {
        let mut knowledge = MemoryKnowledge::new();
        knowledge.add_triple("http://e/Bill_Gates", "http://o/spouse", "http://e/Melinda");
        let relations = knowledge.relations("http://e/Bill_Gates").unwrap();
        assert_eq!(
            relations,
            vec![Relation {
                predicate: "http://o/spouse".to_string(),
                target: "http://e/Melinda".to_string(),
            }]
        );
    }

    #[test]
    fn test_from_tsv_skips_malformed_lines() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "http://e/A\thttp://o/p\thttp://e/B").unwrap();
        writeln!(file, "not a triple").unwrap();
        writeln!(file).unwrap();
        let knowledge = MemoryKnowledge::from_tsv(file.path()).unwrap();
        assert_eq!(knowledge.subject_count(), 1);
    }
}
