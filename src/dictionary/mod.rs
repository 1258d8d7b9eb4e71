//! Dictionaries mapping surface forms to entity identifiers.
//!
//! A dictionary answers one question: given a phrase from the input
//! question, which knowledge-base entities might it refer to? Two
//! interchangeable backends implement [`Dictionary`]:
//!
//! - [`HashMapDictionary`]: exact lookup against lower-cased keys.
//! - [`FuzzyDictionary`]: approximate lookup tolerating one edit per word,
//!   with an ordered-adjacency phrase constraint.
//!
//! Both are populated through [`builder`] from an
//! [`ImportSource`](crate::import::ImportSource).

pub mod builder;
pub mod fuzzy;
pub mod hash_map;
pub mod levenshtein;
pub mod similarity;

pub use fuzzy::{FuzzyConfig, FuzzyDictionary};
pub use hash_map::HashMapDictionary;

use std::collections::HashSet;

/// Lookup capability shared by all dictionary backends.
///
/// A miss is an empty set, never an error: per-query failures inside a
/// backend are logged and degrade to "no evidence".
pub trait Dictionary: Send + Sync {
    /// Return the entity identifiers the phrase may refer to.
    fn lookup(&self, phrase: &str) -> HashSet<String>;
}

/// A dictionary that can be populated entry by entry.
pub trait MutableDictionary: Dictionary {
    /// Union an entity into the candidate set for a surface-form key.
    ///
    /// The key is expected to be normalized (lower-cased, single-spaced)
    /// already; [`builder::add_all`] takes care of that.
    fn insert(&mut self, surface_form: &str, entity: &str);

    /// Number of distinct surface-form keys.
    fn len(&self) -> usize;

    /// Whether the dictionary holds no keys at all.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
