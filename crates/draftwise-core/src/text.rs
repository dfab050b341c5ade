//! Text statistics primitives.
//!
//! Tokenization, n-gram frequency extraction, syllable counting, and
//! sentence segmentation with exact source offsets. Everything here is a
//! pure function; analysis modules re-tokenize on every call rather than
//! caching normalized text.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::word_lists::STOP_WORDS;

/// Word tokens: a leading letter plus at least one more letter, hyphen, or
/// apostrophe. Single-character fragments never match.
static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z][A-Za-z\-']+").expect("valid regex"));

/// Bare word-character runs, used for counting and histogram building.
static BARE_WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("valid regex"));

/// A sentence recovered from a draft together with its exact byte range.
///
/// The range is half-open and delimiter-exclusive: `&draft[start..end]`
/// equals [`text`](Self::text).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceSpan {
    /// Trimmed sentence text, without the trailing period.
    pub text: String,
    /// Byte offset of the sentence's first character in the source.
    pub start: usize,
    /// Byte offset one past the sentence's last character.
    pub end: usize,
}

/// Lower-cased word tokens with stop-words removed.
pub fn tokenize(text: &str) -> Vec<String> {
    WORD_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .filter(|w| !STOP_WORDS.contains(w.as_str()))
        .collect()
}

/// Iterate bare word-character runs without lowercasing or filtering.
pub fn bare_words(text: &str) -> impl Iterator<Item = &str> {
    BARE_WORD_PATTERN.find_iter(text).map(|m| m.as_str())
}

/// Count bare word tokens. No stop-word filtering.
pub fn word_count(text: &str) -> usize {
    bare_words(text).count()
}

/// Top `k` unigrams and adjacent-pair bigrams by frequency.
///
/// Bigrams are built over the stop-filtered token sequence, so they can span
/// removed function words. Ties rank by first occurrence, unigrams before
/// bigrams.
#[tracing::instrument(skip_all, fields(text_len = text.len(), k))]
pub fn top_ngrams(text: &str, k: usize) -> Vec<String> {
    let words = tokenize(text);
    if words.is_empty() {
        return Vec::new();
    }

    let bigrams: Vec<String> = words
        .windows(2)
        .map(|pair| format!("{} {}", pair[0], pair[1]))
        .collect();

    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (idx, gram) in words.iter().chain(bigrams.iter()).enumerate() {
        let entry = counts.entry(gram.as_str()).or_insert((0, idx));
        entry.0 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(gram, (count, first_seen))| (gram, count, first_seen))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked.into_iter().take(k).map(|(gram, _, _)| gram.to_string()).collect()
}

/// Count syllables as maximal vowel runs (`a e i o u y`), at least 1.
pub fn count_syllables(word: &str) -> usize {
    let mut count = 0;
    let mut prev_was_vowel = false;
    for ch in word.chars() {
        let is_vowel = matches!(ch.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if is_vowel && !prev_was_vowel {
            count += 1;
        }
        prev_was_vowel = is_vowel;
    }
    count.max(1)
}

/// Split a draft into period-delimited sentences with exact byte offsets.
///
/// Offsets are recovered by forward-scanning from the end of the previous
/// sentence, so repeated sentences map to their own occurrence. Empty
/// segments (runs of periods, trailing whitespace) are skipped.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn split_sentences(text: &str) -> Vec<SentenceSpan> {
    let mut spans = Vec::new();
    let mut search_from = 0;

    for segment in text.split('.') {
        let trimmed = segment.trim();
        if trimmed.is_empty() {
            continue;
        }
        let Some(found) = text[search_from..].find(trimmed) else {
            continue;
        };
        let start = search_from + found;
        let end = start + trimmed.len();
        search_from = end;
        spans.push(SentenceSpan {
            text: trimmed.to_string(),
            start,
            end,
        });
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_lowercases_and_drops_stop_words() {
        let tokens = tokenize("The Cat sat on the Mat");
        assert_eq!(tokens, vec!["cat", "sat", "mat"]);
    }

    #[test]
    fn tokenize_keeps_hyphens_and_apostrophes() {
        let tokens = tokenize("She's well-known");
        assert_eq!(tokens, vec!["she's", "well-known"]);
    }

    #[test]
    fn top_ngrams_ranks_by_frequency_then_first_seen() {
        let grams = top_ngrams("AI is transforming how we write blogs. AI helps writers.", 5);
        assert_eq!(grams[0], "ai");
        assert!(grams.contains(&"transforming".to_string()));
        assert!(!grams.contains(&"is".to_string()));
        assert!(!grams.contains(&"how".to_string()));
        assert!(!grams.contains(&"we".to_string()));
    }

    #[test]
    fn top_ngrams_includes_bigrams() {
        let grams = top_ngrams("machine learning. machine learning. machine learning.", 3);
        assert!(grams.contains(&"machine learning".to_string()));
    }

    #[test]
    fn top_ngrams_empty_input() {
        assert!(top_ngrams("", 10).is_empty());
        assert!(top_ngrams("the and or", 10).is_empty());
    }

    #[test]
    fn syllables_count_maximal_vowel_runs() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("banana"), 3);
        // The "eau" run collapses to one syllable under run counting.
        assert_eq!(count_syllables("beautiful"), 3);
    }

    #[test]
    fn syllables_never_zero() {
        assert_eq!(count_syllables("tsk"), 1);
        assert_eq!(count_syllables(""), 1);
    }

    #[test]
    fn sentence_offsets_round_trip() {
        let draft = "First sentence here. Second one follows.  Third.";
        let spans = split_sentences(draft);
        assert_eq!(spans.len(), 3);
        for span in &spans {
            assert_eq!(&draft[span.start..span.end], span.text);
        }
        assert_eq!(spans[0].text, "First sentence here");
        assert_eq!(spans[2].text, "Third");
    }

    #[test]
    fn duplicate_sentences_anchor_to_their_own_occurrence() {
        let draft = "Same words. Same words.";
        let spans = split_sentences(draft);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].start, 0);
        assert!(spans[1].start > spans[0].end);
        assert_eq!(&draft[spans[1].start..spans[1].end], "Same words");
    }

    #[test]
    fn split_sentences_skips_empty_segments() {
        assert!(split_sentences("...").is_empty());
        assert!(split_sentences("").is_empty());
        assert_eq!(split_sentences("One... two.").len(), 2);
    }

    #[test]
    fn word_count_ignores_punctuation() {
        assert_eq!(word_count("Hello, world!"), 2);
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("a b c"), 3);
    }
}
