//! Text analysis helpers for questions and surface forms.
//!
//! Questions and dictionary keys go through the same normalization so that
//! lookups compare like with like: Unicode word segmentation followed by
//! lower-casing. Identifiers (entity URIs) are never analyzed.

use unicode_segmentation::UnicodeSegmentation;

/// Split text into lower-cased words using Unicode word boundaries.
///
/// Punctuation is discarded. An empty or whitespace-only input yields an
/// empty vector.
pub fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words().map(|w| w.to_lowercase()).collect()
}

/// Normalize a phrase to its dictionary-key form: tokenized and re-joined
/// with single spaces, lower-cased.
pub fn normalize_phrase(phrase: &str) -> String {
    tokenize(phrase).join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_basic() {
        let tokens = tokenize("birthplace Bill Gates wife");
        assert_eq!(tokens, vec!["birthplace", "bill", "gates", "wife"]);
    }

    #[test]
    fn test_tokenize_empty_and_whitespace() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t  ").is_empty());
    }

    #[test]
    fn test_tokenize_strips_punctuation() {
        let tokens = tokenize("Elton John's spouse?");
        assert_eq!(tokens, vec!["elton", "john's", "spouse"]);
    }

    #[test]
    fn test_normalize_phrase() {
        assert_eq!(normalize_phrase("  Bill   Gates "), "bill gates");
    }
}
