//! Curated word lists for draft analysis.
//!
//! The stop-word set filters glue/function words out of keyword and n-gram
//! extraction so that frequency counts reflect topical vocabulary.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Function words excluded from tokenization and n-gram counting.
pub static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "an", "the", "and", "or", "but", "to", "for", "of", "in", "on", "with", "without",
        "as", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do",
        "does", "did", "this", "that", "these", "those", "it", "its", "by", "from", "at", "into",
        "if", "then", "than", "so", "such", "also", "we", "you", "they", "our", "your", "their",
        "not", "no", "yes", "very", "more", "most", "much", "many", "few", "several", "over",
        "under", "between", "about", "across", "after", "before", "during", "within", "through",
        "up", "down", "out", "off", "near", "far", "any", "each", "other", "own", "same", "can",
        "will", "would", "should", "could", "may", "might", "must", "just", "who", "what", "when",
        "where", "why", "how", "which", "don't", "isn't", "etc",
    ]
    .into_iter()
    .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_common_function_words() {
        assert!(STOP_WORDS.contains("the"));
        assert!(STOP_WORDS.contains("is"));
        assert!(STOP_WORDS.contains("how"));
        assert!(STOP_WORDS.contains("we"));
    }

    #[test]
    fn keeps_topical_words_out() {
        assert!(!STOP_WORDS.contains("ai"));
        assert!(!STOP_WORDS.contains("blog"));
        assert!(!STOP_WORDS.contains("writing"));
    }
}
