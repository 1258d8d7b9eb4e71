//! The answer engine: orchestrates segmentation, dictionary lookup, graph
//! construction and expansion, and the final selection rule.
//!
//! One engine instance serves many questions concurrently: each `answer`
//! or `graph_for` call builds and owns its own [`CandidateGraph`], and the
//! dictionary and knowledge source are only ever read.

use std::collections::HashSet;
use std::sync::Arc;

use log::debug;

use crate::dictionary::Dictionary;
use crate::graph::{CandidateGraph, ExpansionLimits, RelationHints};
use crate::kb::KnowledgeSource;
use crate::segment::Segmenter;

/// Engine-level configuration.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Bounds on candidate-graph expansion.
    pub expansion: ExpansionLimits,
}

/// Resolves keyword questions into sets of entity identifiers.
pub struct AnswerEngine {
    dictionary: Box<dyn Dictionary>,
    knowledge: Arc<dyn KnowledgeSource>,
    config: EngineConfig,
}

impl AnswerEngine {
    /// Create an engine with default configuration.
    pub fn new(dictionary: Box<dyn Dictionary>, knowledge: Arc<dyn KnowledgeSource>) -> Self {
        Self::with_config(dictionary, knowledge, EngineConfig::default())
    }

    /// Create an engine with explicit configuration.
    pub fn with_config(
        dictionary: Box<dyn Dictionary>,
        knowledge: Arc<dyn KnowledgeSource>,
        config: EngineConfig,
    ) -> Self {
        AnswerEngine {
            dictionary,
            knowledge,
            config,
        }
    }

    /// Answer a keyword question.
    ///
    /// Returns `None` for an empty or whitespace-only question. Returns
    /// `Some` with an empty set when no span of the question resolves to
    /// any candidate, or when the candidates cannot be connected; the set
    /// holds all tied best-explained entities otherwise.
    pub fn answer(&self, question: &str) -> Option<HashSet<String>> {
        let graph = self.resolve(question)?;
        let mut best = 0;
        let mut answers = HashSet::new();
        for node in graph.fully_explained() {
            if node.explanation > best {
                best = node.explanation;
                answers.clear();
            }
            if node.explanation == best {
                answers.insert(node.content.clone());
            }
        }
        Some(answers)
    }

    /// Build and return the candidate graph for a question, for
    /// diagnostics and testing. An empty question yields an empty graph.
    pub fn graph_for(&self, question: &str) -> CandidateGraph {
        self.resolve(question).unwrap_or_default()
    }

    /// Run segmentation, dictionary lookups, and expansion.
    fn resolve(&self, question: &str) -> Option<CandidateGraph> {
        let mut segmenter = Segmenter::new(question);
        if segmenter.words().is_empty() {
            return None;
        }

        let mut graph = CandidateGraph::new();
        let mut hints = RelationHints::new();
        let mut matched_spans = 0;

        while let Some(span) = segmenter.next_candidate() {
            let phrase = segmenter.phrase(&span);
            let candidates = self.dictionary.lookup(&phrase);
            if candidates.is_empty() {
                continue;
            }
            segmenter.consume(&span);
            matched_spans += 1;
            let origin = graph.register_span(span.word_count());
            debug!(
                "Span '{}' matched {} candidate(s)",
                phrase,
                candidates.len()
            );
            for entity in &candidates {
                graph.add_node(entity, span.word_count(), origin);
                // Any candidate may turn out to be a relation identifier;
                // the hint only fires if an edge actually carries it.
                hints.add(entity, origin, span.word_count());
            }
        }

        if matched_spans > 0 {
            graph.expand(self.knowledge.as_ref(), &hints, &self.config.expansion);
        }
        Some(graph)
    }
}

#[cfg(test)]
mod tests {
    use crate::dictionary::{HashMapDictionary, MutableDictionary};
    use crate::kb::MemoryKnowledge;

    use super::*;

    fn gates_engine() -> AnswerEngine {
        let mut dictionary = HashMapDictionary::new();
        dictionary.insert("bill gates", "http://e/Bill_Gates");
        dictionary.insert("wife", "http://o/spouse");
        dictionary.insert("birthplace", "http://o/birthPlace");

        let mut knowledge = MemoryKnowledge::new();
        knowledge.add_triple("http://e/Bill_Gates", "http://o/spouse", "http://e/Melinda");
        knowledge.add_triple("http://e/Melinda", "http://o/birthPlace", "http://e/Dallas");

        AnswerEngine::new(Box::new(dictionary), Arc::new(knowledge))
    }

    #[test]
    fn test_empty_question_is_no_result() {
        let engine = gates_engine();
        assert!(engine.answer("").is_none());
        assert!(engine.answer("   \t ").is_none());
    }

    #[test]
    fn test_all_miss_question_is_empty_set() {
        let engine = gates_engine();
        let answer = engine.answer("completely unknown words").unwrap();
        assert!(answer.is_empty());
    }

    #[test]
    fn test_connected_chain_resolves_to_terminal() {
        let engine = gates_engine();
        let answer = engine.answer("birthplace bill gates wife").unwrap();
        assert_eq!(
            answer,
            HashSet::from(["http://e/Dallas".to_string()])
        );
    }

    #[test]
    fn test_single_span_question_answers_itself() {
        let engine = gates_engine();
        let answer = engine.answer("bill gates").unwrap();
        assert_eq!(
            answer,
            HashSet::from(["http://e/Bill_Gates".to_string()])
        );
    }

    #[test]
    fn test_graph_for_reports_span_word_counts() {
        let engine = gates_engine();
        let graph = engine.graph_for("bill gates wife");
        let gates = graph.node_by_content("http://e/Bill_Gates").unwrap();
        assert_eq!(gates.explanation, 2);
        let spouse = graph.node_by_content("http://o/spouse").unwrap();
        assert_eq!(spouse.explanation, 1);
    }

    #[test]
    fn test_graph_for_empty_question_is_empty_graph() {
        let engine = gates_engine();
        let graph = engine.graph_for("");
        assert!(graph.nodes().is_empty());
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_ambiguous_candidates_tie_into_answer_set() {
        let mut dictionary = HashMapDictionary::new();
        dictionary.insert("springfield", "http://e/Springfield_Illinois");
        dictionary.insert("springfield", "http://e/Springfield_Missouri");
        let engine =
            AnswerEngine::new(Box::new(dictionary), Arc::new(MemoryKnowledge::new()));
        let answer = engine.answer("springfield").unwrap();
        assert_eq!(answer.len(), 2);
    }
}
