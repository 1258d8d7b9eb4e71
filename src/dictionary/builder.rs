//! Populating dictionaries from import sources.

use log::{debug, error, warn};

use crate::analysis::normalize_phrase;
use crate::dictionary::{HashMapDictionary, MutableDictionary};
use crate::import::ImportSource;

/// Add every (surface form, entity) pair from the source to a dictionary.
///
/// Keys are normalized to their lower-cased, single-spaced form before
/// insertion; inserting the same pair twice is a no-op (set semantics).
/// A read failure on the source stops the import gracefully: the pairs
/// already added remain valid, and the failure is logged rather than
/// propagated.
///
/// Returns the number of pairs handed to the dictionary.
pub fn add_all(dictionary: &mut dyn MutableDictionary, source: &mut dyn ImportSource) -> usize {
    debug!("Starting import from '{}'", source.source_name());
    let mut count = 0;
    loop {
        match source.next_entry() {
            Ok(Some((form, entity))) => {
                let key = normalize_phrase(&form);
                if key.is_empty() {
                    warn!(
                        "Skipping empty surface form for '{}' in '{}'",
                        entity,
                        source.source_name()
                    );
                    continue;
                }
                dictionary.insert(&key, &entity);
                count += 1;
            }
            Ok(None) => break,
            Err(e) => {
                error!(
                    "Import from '{}' stopped after {} entries: {}",
                    source.source_name(),
                    count,
                    e
                );
                break;
            }
        }
    }
    debug!(
        "Number of entries added: {}. Total keys in dictionary: {}",
        count,
        dictionary.len()
    );
    count
}

/// Build an exact dictionary from an import source.
///
/// A truncated source yields a partial but usable dictionary.
pub fn build(source: &mut dyn ImportSource) -> HashMapDictionary {
    let mut dictionary = HashMapDictionary::new();
    add_all(&mut dictionary, source);
    dictionary
}

#[cfg(test)]
mod tests {
    use crate::dictionary::Dictionary;
    use crate::error::{QuandaError, Result};

    use super::*;

    /// Source yielding a fixed list of pairs, optionally failing afterwards.
    struct VecSource {
        pairs: Vec<(String, String)>,
        fail_at_end: bool,
    }

    impl VecSource {
        fn new(pairs: &[(&str, &str)], fail_at_end: bool) -> Self {
            VecSource {
                pairs: pairs
                    .iter()
                    .rev()
                    .map(|(f, e)| (f.to_string(), e.to_string()))
                    .collect(),
                fail_at_end,
            }
        }
    }

    impl ImportSource for VecSource {
        fn next_entry(&mut self) -> Result<Option<(String, String)>> {
            match self.pairs.pop() {
                Some(pair) => Ok(Some(pair)),
                None if self.fail_at_end => {
                    Err(QuandaError::import("source truncated"))
                }
                None => Ok(None),
            }
        }

        fn source_name(&self) -> &str {
            "vec-source"
        }
    }

    #[test]
    fn test_build_normalizes_and_unions() {
        let mut source = VecSource::new(
            &[
                ("Bill Gates", "http://e/Bill_Gates"),
                ("bill gates", "http://e/Bill_Gates"),
                ("bill gates", "http://e/Bill_Gates_Sr."),
            ],
            false,
        );
        let dictionary = build(&mut source);
        assert_eq!(dictionary.len(), 1);
        assert_eq!(dictionary.lookup("bill gates").len(), 2);
    }

    #[test]
    fn test_duplicate_import_is_idempotent() {
        let pairs = [("wife", "http://o/spouse")];
        let mut dictionary = HashMapDictionary::new();
        add_all(&mut dictionary, &mut VecSource::new(&pairs, false));
        let first = dictionary.lookup("wife");
        add_all(&mut dictionary, &mut VecSource::new(&pairs, false));
        assert_eq!(dictionary.lookup("wife"), first);
    }

    #[test]
    fn test_truncated_source_keeps_partial_dictionary() {
        let mut source = VecSource::new(&[("gates", "http://e/Bill_Gates")], true);
        let dictionary = build(&mut source);
        assert!(dictionary.lookup("gates").contains("http://e/Bill_Gates"));
    }
}
