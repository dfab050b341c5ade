//! Weak-section detection.
//!
//! Flags sentences that are simultaneously long (more than 20 words) and
//! hard to read (Flesch Reading Ease below 50), reporting each flagged
//! sentence's exact byte range in the draft.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::readability;
use crate::text;

/// Reason attached to every flagged section.
const WEAK_REASON: &str = "Hard to read (long/complex)";

/// Words-per-sentence threshold; longer sentences are flag candidates.
const LONG_SENTENCE_WORDS: usize = 20;

/// Reading-ease threshold; sentences below this read as hard.
const HARD_EASE: f64 = 50.0;

/// A hard-to-read span of the draft.
///
/// `start..end` is a half-open byte range; `&draft[start..end]` is exactly
/// the flagged sentence, trailing delimiter excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WeakSection {
    /// Byte offset of the span's first character.
    pub start: usize,
    /// Byte offset one past the span's last character.
    pub end: usize,
    /// Why the span was flagged.
    pub reason: String,
}

/// Find the weak sections of a draft, in document order.
#[tracing::instrument(skip_all, fields(draft_len = draft.len()))]
pub fn detect_weak_sections(draft: &str) -> Vec<WeakSection> {
    text::split_sentences(draft)
        .into_iter()
        .filter(|sentence| {
            text::word_count(&sentence.text) > LONG_SENTENCE_WORDS
                && readability::flesch_reading_ease(&sentence.text) < HARD_EASE
        })
        .map(|sentence| WeakSection {
            start: sentence.start,
            end: sentence.end,
            reason: WEAK_REASON.to_string(),
        })
        .collect()
}
