//! Approximate dictionary backend with per-word edit-distance tolerance.
//!
//! Surface-form keys are indexed word by word into an inverted index. A
//! lookup splits the query phrase into words, matches every word against
//! the indexed vocabulary within a small edit distance, and accepts a key
//! only if the matched words occur in it in the same order with no gap
//! between them. Hits are ranked by an edit-distance-penalized similarity
//! against the matched key and capped at a configurable maximum.
//!
//! The index state is an explicitly scoped resource: acquired at
//! construction, shared read-only between concurrent lookups, and released
//! exactly once by [`FuzzyDictionary::close`]. Lookups after close degrade
//! to an empty result with a logged warning.

use std::collections::HashSet;

use ahash::AHashMap;
use lazy_static::lazy_static;
use log::{debug, warn};
use parking_lot::RwLock;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::{normalize_phrase, tokenize};
use crate::dictionary::levenshtein::distance_within;
use crate::dictionary::similarity;
use crate::dictionary::{Dictionary, MutableDictionary};
use crate::error::{QuandaError, Result};
use crate::import::ImportSource;

lazy_static! {
    /// Phrases for which the search is omitted entirely.
    static ref STOP_WORDS: HashSet<&'static str> =
        ["the", "of", "on", "in", "for", "at", "to"].into_iter().collect();
}

/// Configuration for the fuzzy dictionary backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuzzyConfig {
    /// Maximum edit distance per query word.
    pub max_edit_distance: usize,
    /// Maximum number of ranked hits considered per lookup.
    pub max_results: usize,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        FuzzyConfig {
            max_edit_distance: 1,
            max_results: 100,
        }
    }
}

/// One indexed surface form and the entity it names.
#[derive(Debug, Clone)]
struct IndexedEntry {
    /// The normalized key, kept for ranking against the query.
    key: String,
    /// The key split into words, for the adjacency check.
    words: Vec<String>,
    entity: String,
}

/// Position of a word within an indexed entry.
#[derive(Debug, Clone, Copy)]
struct Posting {
    entry: u32,
    position: u32,
}

/// The index proper. Lives behind the dictionary's lock so that close()
/// can release it exactly once.
#[derive(Debug, Default)]
struct IndexState {
    entries: Vec<IndexedEntry>,
    postings: AHashMap<String, Vec<Posting>>,
}

impl IndexState {
    fn add(&mut self, key: &str, entity: &str) {
        let words = tokenize(key);
        if words.is_empty() {
            warn!("Ignoring surface form with no words for entity '{entity}'");
            return;
        }
        let entry_id = self.entries.len() as u32;
        for (position, word) in words.iter().enumerate() {
            self.postings.entry(word.clone()).or_default().push(Posting {
                entry: entry_id,
                position: position as u32,
            });
        }
        self.entries.push(IndexedEntry {
            key: key.to_string(),
            words,
            entity: entity.to_string(),
        });
    }

    /// Index terms within the edit-distance bound of a query word.
    fn fuzzy_terms(&self, word: &str, max_distance: usize) -> Vec<(&String, usize)> {
        self.postings
            .par_iter()
            .filter_map(|(term, _)| {
                distance_within(word, term, max_distance).map(|d| (term, d))
            })
            .collect()
    }
}

/// A scored phrase match, prior to the result cap.
#[derive(Debug)]
struct ScoredHit<'a> {
    entity: &'a str,
    score: f64,
}

/// Approximate dictionary with per-word fuzzy matching and a strict
/// ordered-adjacency phrase constraint.
pub struct FuzzyDictionary {
    config: FuzzyConfig,
    state: RwLock<Option<IndexState>>,
}

impl FuzzyDictionary {
    /// Create an empty fuzzy dictionary with the given configuration.
    pub fn new(config: FuzzyConfig) -> Self {
        FuzzyDictionary {
            config,
            state: RwLock::new(Some(IndexState::default())),
        }
    }

    /// Build a fuzzy dictionary from an import source.
    ///
    /// Fails if the source yields no usable entries at all: a dictionary
    /// must not present itself as ready with no data behind it.
    pub fn from_source(config: FuzzyConfig, source: &mut dyn ImportSource) -> Result<Self> {
        let mut dictionary = Self::new(config);
        let count = crate::dictionary::builder::add_all(&mut dictionary, source);
        if count == 0 {
            return Err(QuandaError::dictionary(format!(
                "no entries imported from '{}'",
                source.source_name()
            )));
        }
        debug!(
            "Loaded fuzzy dictionary. Total number of entries in index: {count}"
        );
        Ok(dictionary)
    }

    /// Number of indexed (surface form, entity) entries.
    pub fn entry_count(&self) -> usize {
        self.state.read().as_ref().map_or(0, |s| s.entries.len())
    }

    /// Drop all indexed entries while keeping the dictionary open.
    pub fn clear(&self) -> Result<()> {
        let mut guard = self.state.write();
        match guard.as_mut() {
            Some(state) => {
                *state = IndexState::default();
                Ok(())
            }
            None => Err(QuandaError::invalid_operation(
                "clear on closed fuzzy dictionary",
            )),
        }
    }

    /// Release the index. Must be called exactly once; a second close is
    /// an invalid operation.
    pub fn close(&self) -> Result<()> {
        let mut guard = self.state.write();
        match guard.take() {
            Some(state) => {
                debug!(
                    "Closing fuzzy dictionary with {} entries",
                    state.entries.len()
                );
                Ok(())
            }
            None => Err(QuandaError::invalid_operation(
                "fuzzy dictionary already closed",
            )),
        }
    }

    /// Whether the index has been released.
    pub fn is_closed(&self) -> bool {
        self.state.read().is_none()
    }

    /// Match the query words against the index under the adjacency
    /// constraint and rank the results.
    fn search<'a>(
        state: &'a IndexState,
        config: &FuzzyConfig,
        phrase: &str,
        words: &[String],
    ) -> Vec<ScoredHit<'a>> {
        // Anchor on the first word; every candidate position for the rest
        // of the phrase is fixed by the adjacency constraint.
        let anchors = state.fuzzy_terms(&words[0], config.max_edit_distance);
        if anchors.is_empty() {
            return Vec::new();
        }

        let mut hits = Vec::new();
        for (term, anchor_distance) in anchors {
            let Some(postings) = state.postings.get(term) else {
                continue;
            };
            for posting in postings {
                let entry = &state.entries[posting.entry as usize];
                let start = posting.position as usize;
                if start + words.len() > entry.words.len() {
                    continue;
                }
                let mut total_distance = anchor_distance;
                let mut matched = true;
                for (offset, word) in words.iter().enumerate().skip(1) {
                    match distance_within(
                        word,
                        &entry.words[start + offset],
                        config.max_edit_distance,
                    ) {
                        Some(d) => total_distance += d,
                        None => {
                            matched = false;
                            break;
                        }
                    }
                }
                if matched {
                    hits.push(ScoredHit {
                        entity: &entry.entity,
                        score: similarity::weigh(phrase, &entry.key, total_distance),
                    });
                }
            }
        }

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.entity.cmp(b.entity))
        });
        hits.truncate(config.max_results);
        hits
    }
}

impl Dictionary for FuzzyDictionary {
    fn lookup(&self, phrase: &str) -> HashSet<String> {
        let normalized = normalize_phrase(phrase);
        if STOP_WORDS.contains(normalized.as_str()) {
            return HashSet::new();
        }
        let words = tokenize(&normalized);
        if words.is_empty() {
            return HashSet::new();
        }

        let guard = self.state.read();
        let Some(state) = guard.as_ref() else {
            warn!("Lookup on closed fuzzy dictionary -> '{phrase}'");
            return HashSet::new();
        };

        Self::search(state, &self.config, &normalized, &words)
            .into_iter()
            .map(|hit| hit.entity.to_string())
            .collect()
    }
}

impl MutableDictionary for FuzzyDictionary {
    fn insert(&mut self, surface_form: &str, entity: &str) {
        let mut guard = self.state.write();
        match guard.as_mut() {
            Some(state) => state.add(surface_form, entity),
            None => warn!("Insert into closed fuzzy dictionary dropped -> '{surface_form}'"),
        }
    }

    fn len(&self) -> usize {
        self.entry_count()
    }
}
