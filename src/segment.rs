//! Greedy longest-match-first segmentation of a question into n-grams.
//!
//! The segmenter enumerates every contiguous word span of the question,
//! longest spans first, so multi-word entity mentions win over their
//! sub-spans. Once a span is consumed by a successful dictionary match,
//! its words are never re-offered as shorter sub-spans in the same pass
//! (maximal munch, no backtracking).

use crate::analysis::tokenize;

/// A contiguous word span of the question: `len` words starting at word
/// index `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub len: usize,
}

impl Span {
    /// Word count of the span.
    pub fn word_count(&self) -> usize {
        self.len
    }

    /// Whether two spans share any word position.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.start + other.len && other.start < self.start + self.len
    }
}

/// Candidate n-gram producer for one question.
pub struct Segmenter {
    words: Vec<String>,
    consumed: Vec<bool>,
    // cursor over the (length desc, start asc) enumeration
    len: usize,
    start: usize,
}

impl Segmenter {
    /// Segment a raw question. Empty or whitespace-only input produces a
    /// segmenter that offers no candidates at all.
    pub fn new(question: &str) -> Self {
        let words = tokenize(question);
        let len = words.len();
        Segmenter {
            consumed: vec![false; words.len()],
            words,
            len,
            start: 0,
        }
    }

    /// The tokenized question words.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Join the words of a span into a lookup phrase.
    pub fn phrase(&self, span: &Span) -> String {
        self.words[span.start..span.start + span.len].join(" ")
    }

    /// Offer the next candidate span, longest first, skipping spans that
    /// touch already-consumed words. `None` once the enumeration is done.
    pub fn next_candidate(&mut self) -> Option<Span> {
        loop {
            if self.len == 0 {
                return None;
            }
            if self.start + self.len > self.words.len() {
                self.len -= 1;
                self.start = 0;
                continue;
            }
            let span = Span {
                start: self.start,
                len: self.len,
            };
            self.start += 1;
            if !self.is_free(&span) {
                continue;
            }
            return Some(span);
        }
    }

    /// Mark a span's words as consumed by a successful match.
    pub fn consume(&mut self, span: &Span) {
        for flag in &mut self.consumed[span.start..span.start + span.len] {
            *flag = true;
        }
    }

    fn is_free(&self, span: &Span) -> bool {
        !self.consumed[span.start..span.start + span.len]
            .iter()
            .any(|&c| c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans_of(question: &str) -> Vec<(usize, usize)> {
        let mut segmenter = Segmenter::new(question);
        let mut spans = Vec::new();
        while let Some(span) = segmenter.next_candidate() {
            spans.push((span.start, span.len));
        }
        spans
    }

    #[test]
    fn test_longest_first_order() {
        let spans = spans_of("bill gates wife");
        assert_eq!(
            spans,
            vec![
                (0, 3),
                (0, 2),
                (1, 2),
                (0, 1),
                (1, 1),
                (2, 1),
            ]
        );
    }

    #[test]
    fn test_empty_question_yields_nothing() {
        assert!(spans_of("").is_empty());
        assert!(spans_of("   \t ").is_empty());
    }

    #[test]
    fn test_consumed_words_not_reoffered() {
        let mut segmenter = Segmenter::new("birthplace bill gates wife");
        let mut offered = Vec::new();
        while let Some(span) = segmenter.next_candidate() {
            // Accept exactly the "bill gates" 2-word span.
            if span == (Span { start: 1, len: 2 }) {
                segmenter.consume(&span);
            }
            offered.push(span);
        }
        // No later candidate may overlap the consumed words.
        let consumed = Span { start: 1, len: 2 };
        let after: Vec<_> = offered
            .iter()
            .skip_while(|s| *s != &consumed)
            .skip(1)
            .collect();
        assert!(!after.is_empty());
        assert!(after.iter().all(|s| !s.overlaps(&consumed)));
        // The 1-word sub-spans "bill" and "gates" are never offered.
        assert!(!after.contains(&&Span { start: 1, len: 1 }));
        assert!(!after.contains(&&Span { start: 2, len: 1 }));
    }

    #[test]
    fn test_phrase_joins_span_words() {
        let segmenter = Segmenter::new("birthplace Bill Gates wife");
        assert_eq!(
            segmenter.phrase(&Span { start: 1, len: 2 }),
            "bill gates"
        );
    }
}
