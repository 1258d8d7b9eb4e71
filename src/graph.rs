//! Per-question candidate graph and its bounded expansion.
//!
//! Nodes live in an arena (`Vec<Node>`) keyed by entity identifier through
//! a side map, so merges are O(1) and edges can reference plain indices
//! even when the knowledge graph contains cycles. Each node carries the
//! set of question spans that explain it (its "origins", a bitmask over
//! the spans registered for this question) and an `explanation` strength:
//! the word count of the evidence behind the node.
//!
//! Expansion walks the knowledge base breadth-first from the dictionary
//! hits. Traversing an edge whose relation identifier was itself matched
//! from a question span (a relation hint, e.g. "wife" -> spouse) consumes
//! that span into the target node. Expansion stops as soon as one node is
//! explained by every matched span, or when the configured bounds are
//! reached; the graph is then used as-is.

use ahash::{AHashMap, AHashSet};
use log::{debug, warn};
use serde::Serialize;

use crate::kb::KnowledgeSource;

/// Index of a node in the graph arena.
pub type NodeId = usize;

/// Maximum number of question spans trackable per graph (bitmask width).
const MAX_SPANS: usize = 64;

/// A candidate entity discovered while answering.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    /// Entity identifier (or the literal matched text before resolution).
    pub content: String,
    /// Word count of the evidence explaining this node; higher is stronger.
    pub explanation: usize,
    /// Bitmask of the question spans this node is explained by.
    pub origins: u64,
}

/// A directed, relation-labeled edge between two nodes.
#[derive(Debug, Clone, Serialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub relation: String,
}

/// Relation identifiers that were themselves matched from question spans,
/// with the origins and word count of the matching span.
#[derive(Debug, Default)]
pub struct RelationHints {
    map: AHashMap<String, (u64, usize)>,
}

impl RelationHints {
    /// Create an empty hint table.
    pub fn new() -> Self {
        RelationHints {
            map: AHashMap::new(),
        }
    }

    /// Register a matched relation identifier.
    pub fn add(&mut self, predicate: &str, origins: u64, words: usize) {
        let entry = self.map.entry(predicate.to_string()).or_insert((0, 0));
        entry.0 |= origins;
        entry.1 = entry.1.max(words);
    }

    fn get(&self, predicate: &str) -> Option<(u64, usize)> {
        self.map.get(predicate).copied()
    }
}

/// Bounds halting graph growth regardless of knowledge-base density.
#[derive(Debug, Clone)]
pub struct ExpansionLimits {
    /// Maximum breadth-first rounds away from the dictionary hits.
    pub max_rounds: usize,
    /// Maximum number of nodes the graph may hold.
    pub max_nodes: usize,
}

impl Default for ExpansionLimits {
    fn default() -> Self {
        ExpansionLimits {
            max_rounds: 6,
            max_nodes: 10_000,
        }
    }
}

/// The directed graph of candidate entities built for one question.
#[derive(Debug, Default)]
pub struct CandidateGraph {
    nodes: Vec<Node>,
    index: AHashMap<String, NodeId>,
    edges: Vec<Edge>,
    edge_set: AHashSet<(NodeId, NodeId, String)>,
    span_words: Vec<usize>,
}

impl CandidateGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        CandidateGraph::default()
    }

    /// Register a matched question span of `word_count` words, returning
    /// its origin bit.
    pub fn register_span(&mut self, word_count: usize) -> u64 {
        if self.span_words.len() >= MAX_SPANS {
            warn!("Span limit reached; folding span into the last origin bit");
            return 1 << (MAX_SPANS - 1);
        }
        let bit = 1u64 << self.span_words.len();
        self.span_words.push(word_count);
        bit
    }

    /// Bitmask covering every registered span.
    pub fn full_coverage(&self) -> u64 {
        if self.span_words.is_empty() {
            0
        } else {
            // Shift-safe at the 64-span limit, where a plain `1 << len`
            // would overflow.
            u64::MAX >> (MAX_SPANS - self.span_words.len())
        }
    }

    /// Total word count of the spans in an origin set.
    pub fn coverage_words(&self, origins: u64) -> usize {
        self.span_words
            .iter()
            .enumerate()
            .filter(|(i, _)| origins & (1u64 << i) != 0)
            .map(|(_, w)| w)
            .sum()
    }

    /// Add a node for a direct dictionary hit, merging on existing content.
    ///
    /// A merge keeps the larger explanation and the union of origins,
    /// regardless of discovery order.
    pub fn add_node(&mut self, content: &str, explanation: usize, origins: u64) -> NodeId {
        match self.index.get(content) {
            Some(&id) => {
                let node = &mut self.nodes[id];
                node.explanation = node.explanation.max(explanation);
                node.origins |= origins;
                id
            }
            None => {
                let id = self.nodes.len();
                self.nodes.push(Node {
                    content: content.to_string(),
                    explanation,
                    origins,
                });
                self.index.insert(content.to_string(), id);
                id
            }
        }
    }

    /// Add an edge, ignoring exact duplicates from re-expansion.
    fn add_edge(&mut self, from: NodeId, to: NodeId, relation: &str) {
        let key = (from, to, relation.to_string());
        if self.edge_set.insert(key) {
            self.edges.push(Edge {
                from,
                to,
                relation: relation.to_string(),
            });
        }
    }

    /// All nodes currently in the graph.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges currently in the graph.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Look up a node by its content.
    pub fn node_by_content(&self, content: &str) -> Option<&Node> {
        self.index.get(content).map(|&id| &self.nodes[id])
    }

    /// Nodes explained by every registered span.
    pub fn fully_explained(&self) -> impl Iterator<Item = &Node> {
        let target = self.full_coverage();
        self.nodes
            .iter()
            .filter(move |n| target != 0 && n.origins & target == target)
    }

    /// Expand the graph from its current nodes through the knowledge base.
    ///
    /// Relation-lookup failures for a single node are logged and treated
    /// as "no neighbors"; they never abort the expansion.
    pub fn expand(
        &mut self,
        knowledge: &dyn KnowledgeSource,
        hints: &RelationHints,
        limits: &ExpansionLimits,
    ) {
        let target = self.full_coverage();
        let mut frontier: Vec<NodeId> = (0..self.nodes.len()).collect();

        for round in 0..limits.max_rounds {
            if frontier.is_empty() {
                break;
            }
            if target != 0 && self.nodes.iter().any(|n| n.origins & target == target) {
                debug!("Expansion connected all spans after {round} rounds");
                break;
            }

            let mut next: Vec<NodeId> = Vec::new();
            for u in frontier {
                if self.nodes.len() >= limits.max_nodes {
                    debug!(
                        "Expansion node bound ({}) reached; using graph as-is",
                        limits.max_nodes
                    );
                    return;
                }
                let content = self.nodes[u].content.clone();
                let relations = match knowledge.relations(&content) {
                    Ok(relations) => relations,
                    Err(e) => {
                        warn!("Relation lookup failed for '{content}': {e}");
                        continue;
                    }
                };
                for relation in relations {
                    let (hint_origins, hint_words) =
                        hints.get(&relation.predicate).unwrap_or((0, 0));
                    let (u_origins, u_explanation) = {
                        let node = &self.nodes[u];
                        (node.origins, node.explanation)
                    };
                    let v_old = self
                        .index
                        .get(&relation.target)
                        .map(|&id| (id, self.nodes[id].origins, self.nodes[id].explanation));

                    // Evidence flows forward into the edge target; crossing
                    // a hinted relation consumes the hint's span.
                    let gained = hint_origins & !u_origins != 0;
                    let incoming = u_explanation + if gained { hint_words } else { 0 };
                    let v = self.propagate(
                        &relation.target,
                        u_origins | hint_origins,
                        incoming,
                        &mut next,
                    );

                    // Evidence also flows backward, but only from a target
                    // that already carried evidence of its own; a freshly
                    // discovered neighbor has nothing to contribute yet.
                    if let Some((_, v_origins, v_explanation)) = v_old {
                        if v_origins != 0 {
                            let gained = (v_origins | hint_origins) & !u_origins != 0;
                            let incoming =
                                v_explanation + if gained { hint_words } else { 0 };
                            self.merge_into(u, v_origins | hint_origins, incoming, &mut next);
                        }
                    }

                    self.add_edge(u, v, &relation.predicate);
                }
            }
            frontier = next;
            frontier.sort_unstable();
            frontier.dedup();
        }
    }

    /// Merge propagated evidence into the target of an edge, creating the
    /// node if needed and enqueueing it for re-expansion whenever its
    /// origin set grows.
    fn propagate(
        &mut self,
        content: &str,
        origins: u64,
        explanation: usize,
        next: &mut Vec<NodeId>,
    ) -> NodeId {
        match self.index.get(content) {
            Some(&id) => {
                self.merge_into(id, origins, explanation, next);
                id
            }
            None => {
                let id = self.nodes.len();
                self.nodes.push(Node {
                    content: content.to_string(),
                    explanation: explanation.max(self.coverage_words(origins)),
                    origins,
                });
                self.index.insert(content.to_string(), id);
                next.push(id);
                id
            }
        }
    }

    /// Merge an origin set and explanation strength into an existing node.
    /// The explanation never drops below the word coverage of the merged
    /// origins, so it stays a faithful evidence count after unions.
    fn merge_into(&mut self, id: NodeId, origins: u64, explanation: usize, next: &mut Vec<NodeId>) {
        let merged = self.nodes[id].origins | origins;
        if merged != self.nodes[id].origins {
            let strength = explanation
                .max(self.nodes[id].explanation)
                .max(self.coverage_words(merged));
            let node = &mut self.nodes[id];
            node.origins = merged;
            node.explanation = strength;
            next.push(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::kb::{MemoryKnowledge, Relation};

    use super::*;

    #[test]
    fn test_add_node_merges_on_content() {
        let mut graph = CandidateGraph::new();
        let s1 = graph.register_span(1);
        let s2 = graph.register_span(2);
        let a = graph.add_node("http://e/A", 1, s1);
        let b = graph.add_node("http://e/A", 2, s2);
        assert_eq!(a, b);
        assert_eq!(graph.nodes().len(), 1);
        let node = graph.node_by_content("http://e/A").unwrap();
        assert_eq!(node.explanation, 2);
        assert_eq!(node.origins, s1 | s2);
    }

    #[test]
    fn test_merge_keeps_larger_explanation_regardless_of_order() {
        let mut graph = CandidateGraph::new();
        let s1 = graph.register_span(2);
        graph.add_node("http://e/A", 2, s1);
        graph.add_node("http://e/A", 1, s1);
        assert_eq!(graph.node_by_content("http://e/A").unwrap().explanation, 2);

        let mut graph = CandidateGraph::new();
        let s1 = graph.register_span(2);
        graph.add_node("http://e/A", 1, s1);
        graph.add_node("http://e/A", 2, s1);
        assert_eq!(graph.node_by_content("http://e/A").unwrap().explanation, 2);
    }

    #[test]
    fn test_full_coverage_at_span_limit() {
        let mut graph = CandidateGraph::new();
        for _ in 0..MAX_SPANS {
            graph.register_span(1);
        }
        assert_eq!(graph.full_coverage(), u64::MAX);
        // Spans past the limit fold onto the last bit and leave the
        // coverage target unchanged.
        assert_eq!(graph.register_span(1), 1 << (MAX_SPANS - 1));
        assert_eq!(graph.full_coverage(), u64::MAX);
    }

    #[test]
    fn test_expansion_consumes_relation_hints() {
        let mut knowledge = MemoryKnowledge::new();
        knowledge.add_triple("http://e/Bill_Gates", "http://o/spouse", "http://e/Melinda");

        let mut graph = CandidateGraph::new();
        let s_person = graph.register_span(2);
        let s_wife = graph.register_span(1);
        graph.add_node("http://e/Bill_Gates", 2, s_person);
        graph.add_node("http://o/spouse", 1, s_wife);

        let mut hints = RelationHints::new();
        hints.add("http://o/spouse", s_wife, 1);

        graph.expand(&knowledge, &hints, &ExpansionLimits::default());

        let melinda = graph.node_by_content("http://e/Melinda").unwrap();
        assert_eq!(melinda.origins, s_person | s_wife);
        assert_eq!(melinda.explanation, 3);
        assert!(graph
            .edges()
            .iter()
            .any(|e| e.relation == "http://o/spouse"));
    }

    #[test]
    fn test_expansion_terminates_on_dense_graph() {
        /// A knowledge source where every entity links to every other.
        struct DenseKnowledge;

        impl KnowledgeSource for DenseKnowledge {
            fn relations(&self, entity: &str) -> crate::error::Result<Vec<Relation>> {
                let _ = entity;
                Ok((0..100)
                    .map(|i| Relation {
                        predicate: format!("http://o/p{i}"),
                        target: format!("http://e/E{i}"),
                    })
                    .collect())
            }
        }

        let mut graph = CandidateGraph::new();
        let s1 = graph.register_span(1);
        let s2 = graph.register_span(1);
        graph.add_node("http://e/Seed", 1, s1);
        graph.add_node("http://e/Other", 1, s2);

        let limits = ExpansionLimits {
            max_rounds: 4,
            max_nodes: 50,
        };
        graph.expand(&DenseKnowledge, &hints_empty(), &limits);
        assert!(graph.nodes().len() <= 50 + 100);
    }

    fn hints_empty() -> RelationHints {
        RelationHints::new()
    }

    #[test]
    fn test_failed_relation_lookup_degrades_to_no_neighbors() {
        struct BrokenKnowledge;

        impl KnowledgeSource for BrokenKnowledge {
            fn relations(&self, _entity: &str) -> crate::error::Result<Vec<Relation>> {
                Err(crate::error::QuandaError::knowledge("backend unreachable"))
            }
        }

        let mut graph = CandidateGraph::new();
        let s1 = graph.register_span(1);
        graph.add_node("http://e/Seed", 1, s1);
        graph.expand(
            &BrokenKnowledge,
            &RelationHints::new(),
            &ExpansionLimits::default(),
        );
        assert_eq!(graph.nodes().len(), 1);
        assert!(graph.edges().is_empty());
    }
}
