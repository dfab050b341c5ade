//! Readability estimation.
//!
//! Two classic Flesch metrics over the same word/sentence/syllable counts:
//!
//! - Grade level: `0.39 * (words/sentences) + 11.8 * (syllables/words) - 15.59`
//!   (higher = harder).
//! - Reading ease: `206.835 - 1.015 * (words/sentences) - 84.6 * (syllables/words)`
//!   (higher = easier).
//!
//! Word and sentence counts are floored at 1, so both functions return a
//! finite number for any input, empty text included.

use crate::text;

/// Per-text counts shared by both formulas.
struct TextCounts {
    words: f64,
    sentences: f64,
    syllables: f64,
}

fn counts(text: &str) -> TextCounts {
    let mut words = 0usize;
    let mut syllables = 0usize;
    for word in text::bare_words(text) {
        words += 1;
        syllables += text::count_syllables(word);
    }
    let sentences = text
        .split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .count();

    TextCounts {
        words: words.max(1) as f64,
        sentences: sentences.max(1) as f64,
        syllables: syllables as f64,
    }
}

/// Flesch-Kincaid Grade Level. Higher = harder to read.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn flesch_kincaid_grade(text: &str) -> f64 {
    let c = counts(text);
    0.39f64.mul_add(c.words / c.sentences, 11.8 * (c.syllables / c.words)) - 15.59
}

/// Flesch Reading Ease. Higher = easier to read; below 50 reads as hard.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn flesch_reading_ease(text: &str) -> f64 {
    let c = counts(text);
    206.835 - 1.015f64.mul_add(c.words / c.sentences, 84.6 * (c.syllables / c.words))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_simple_sentence_scores_low_grade() {
        let grade = flesch_kincaid_grade("The cat sat.");
        assert!(grade < 3.0, "expected an easy grade, got {grade}");
    }

    #[test]
    fn simple_sentence_reads_easy() {
        let ease = flesch_reading_ease("The cat sat on the mat.");
        assert!(ease > 50.0, "expected easy prose, got {ease}");
    }

    #[test]
    fn dense_vocabulary_reads_hard() {
        let ease = flesch_reading_ease(
            "Interdepartmental organizational restructuring necessitated comprehensive \
             procedural documentation dissemination",
        );
        assert!(ease < 50.0, "expected hard prose, got {ease}");
    }

    #[test]
    fn empty_input_is_finite() {
        assert!(flesch_kincaid_grade("").is_finite());
        assert!(flesch_reading_ease("").is_finite());
        assert!(flesch_kincaid_grade("...").is_finite());
    }

    #[test]
    fn long_sentences_raise_the_grade() {
        let short = flesch_kincaid_grade("We ship. We test. We learn.");
        let long = flesch_kincaid_grade(
            "We ship the release and then we test the release and then we learn from \
             the release before we ship again without pausing to reflect on anything",
        );
        assert!(long > short);
    }
}
