//! Exact in-memory dictionary backend.

use std::collections::HashSet;

use ahash::AHashMap;

use crate::analysis::normalize_phrase;
use crate::dictionary::{Dictionary, MutableDictionary};

/// A hash-table dictionary with exact, lower-cased key matching.
///
/// Lookup is O(1) expected; a phrase that does not equal a stored key is a
/// plain miss. This is the deterministic backend used by tests and small
/// deployments.
#[derive(Debug, Clone, Default)]
pub struct HashMapDictionary {
    map: AHashMap<String, HashSet<String>>,
}

impl HashMapDictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        HashMapDictionary {
            map: AHashMap::new(),
        }
    }

    /// Exact borrow of the candidate set for a normalized key, if present.
    pub fn get(&self, key: &str) -> Option<&HashSet<String>> {
        self.map.get(key)
    }

    /// Iterate over all (key, candidate set) entries.
    pub fn entries(&self) -> impl Iterator<Item = (&String, &HashSet<String>)> {
        self.map.iter()
    }
}

impl Dictionary for HashMapDictionary {
    fn lookup(&self, phrase: &str) -> HashSet<String> {
        let key = normalize_phrase(phrase);
        self.map.get(&key).cloned().unwrap_or_default()
    }
}

impl MutableDictionary for HashMapDictionary {
    fn insert(&mut self, surface_form: &str, entity: &str) {
        self.map
            .entry(surface_form.to_string())
            .or_default()
            .insert(entity.to_string());
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut dictionary = HashMapDictionary::new();
        dictionary.insert("bill gates", "http://e/Bill_Gates");
        let hits = dictionary.lookup("Bill Gates");
        assert!(hits.contains("http://e/Bill_Gates"));
    }

    #[test]
    fn test_miss_is_empty_set() {
        let dictionary = HashMapDictionary::new();
        assert!(dictionary.lookup("unknown phrase").is_empty());
    }

    #[test]
    fn test_insert_unions_entities() {
        let mut dictionary = HashMapDictionary::new();
        dictionary.insert("gates", "http://e/Bill_Gates");
        dictionary.insert("gates", "http://e/Gates_(structure)");
        dictionary.insert("gates", "http://e/Bill_Gates");
        let hits = dictionary.lookup("gates");
        assert_eq!(hits.len(), 2);
        assert_eq!(dictionary.len(), 1);
    }

    #[test]
    fn test_get_exposes_stored_set() {
        let mut dictionary = HashMapDictionary::new();
        dictionary.insert("wife", "http://o/spouse");
        assert!(dictionary.get("wife").is_some());
        assert!(dictionary.get("husband").is_none());
    }
}
