//! Composite blog scoring.
//!
//! Blends keyword relevance (60%) with an inverted readability term (40%),
//! then applies profile adjustment. A grade of 10 or more zeroes the
//! readability term, so dense prose leans entirely on its keywords.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::profile::{UserProfile, user_profile_adjustment};
use crate::readability;
use crate::relevance::{SimilarityOracle, TfIdfSimilarity, keyword_relevance_with};
use crate::text;

/// Composite quality breakdown for one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoreBreakdown {
    /// Blended quality score after profile adjustment, always in `[0, 100]`.
    pub final_score: f64,
    /// Keyword relevance component in `[0, 100]`.
    pub keyword_score: f64,
    /// Flesch-Kincaid grade of the text; unbounded, typically 0-20.
    pub readability_grade: f64,
    /// Whether a profile influenced `final_score`.
    pub adjusted_for_profile: bool,
}

/// Score a text against a keyword set using the built-in TF-IDF oracle.
#[tracing::instrument(skip_all, fields(text_len = text.len(), keywords = keywords.len()))]
pub fn blog_score(
    text: &str,
    keywords: &[String],
    profile: Option<&UserProfile>,
) -> ScoreBreakdown {
    blog_score_with(&TfIdfSimilarity, text, keywords, profile)
}

/// Score a text against a keyword set with a caller-supplied similarity
/// oracle.
///
/// Texts with no words at all report a neutral floor: `final_score` and
/// `keyword_score` both 0, with the structurally computed grade still in
/// the breakdown.
pub fn blog_score_with(
    oracle: &dyn SimilarityOracle,
    text: &str,
    keywords: &[String],
    profile: Option<&UserProfile>,
) -> ScoreBreakdown {
    let readability = readability::flesch_kincaid_grade(text);

    if text::word_count(text) == 0 {
        return ScoreBreakdown {
            final_score: 0.0,
            keyword_score: 0.0,
            readability_grade: round2(readability),
            adjusted_for_profile: profile.is_some(),
        };
    }

    let keyword_score = keyword_relevance_with(oracle, text, keywords).clamp(0.0, 100.0);
    let readability_term = readability.mul_add(-10.0, 100.0).max(0.0);
    let base = keyword_score.mul_add(0.6, readability_term * 0.4);
    let final_score = user_profile_adjustment(base, text, profile).clamp(0.0, 100.0);

    ScoreBreakdown {
        final_score: round2(final_score),
        keyword_score: round2(keyword_score),
        readability_grade: round2(readability),
        adjusted_for_profile: profile.is_some(),
    }
}

/// Round to two decimal places for reporting.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| (*w).to_string()).collect()
    }

    #[test]
    fn empty_text_scores_zero() {
        let breakdown = blog_score("", &[], None);
        assert_eq!(breakdown.final_score, 0.0);
        assert_eq!(breakdown.keyword_score, 0.0);
        assert!(!breakdown.adjusted_for_profile);
        assert!(breakdown.readability_grade.is_finite());
    }

    #[test]
    fn empty_keywords_zero_keyword_score() {
        let breakdown = blog_score("Plain readable text about nothing in particular.", &[], None);
        assert_eq!(breakdown.keyword_score, 0.0);
        let with_profile = blog_score(
            "Plain readable text about nothing in particular.",
            &[],
            Some(&UserProfile::default()),
        );
        assert_eq!(with_profile.keyword_score, 0.0);
        assert!(with_profile.adjusted_for_profile);
    }

    #[test]
    fn readable_text_earns_readability_credit() {
        let breakdown = blog_score("The cat sat. The dog ran.", &[], None);
        // keyword_score 0, so everything comes from the readability term.
        assert!(breakdown.final_score > 0.0);
        assert!(breakdown.final_score <= 100.0);
    }

    #[test]
    fn final_score_always_in_bounds() {
        let adversarial = UserProfile {
            preferred_topics: ["cat", "dog", "mat", "ran"]
                .iter()
                .map(|t| (*t).to_string())
                .collect(),
            reading_level: Some(50.0),
            ..UserProfile::default()
        };
        let cases: &[(&str, Vec<String>, Option<&UserProfile>)] = &[
            ("", vec![], None),
            ("", vec![], Some(&adversarial)),
            ("The cat sat on the mat. The dog ran.", kw(&["cat", "dog"]), Some(&adversarial)),
            ("cat cat cat cat cat", kw(&["cat"]), Some(&adversarial)),
            ("!!!", kw(&["cat"]), None),
        ];
        for (text, keywords, profile) in cases {
            let breakdown = blog_score(text, keywords, *profile);
            assert!(
                (0.0..=100.0).contains(&breakdown.final_score),
                "final_score {} out of range for {text:?}",
                breakdown.final_score
            );
        }
    }

    #[test]
    fn matching_keywords_raise_the_score() {
        let text = "Rust gives memory safety without garbage collection. Rust programs \
                    compile to fast native code.";
        let matched = blog_score(text, &kw(&["rust", "memory"]), None);
        let unmatched = blog_score(text, &kw(&["gardening", "cooking"]), None);
        assert!(matched.keyword_score > unmatched.keyword_score);
        assert!(matched.final_score >= unmatched.final_score);
    }

    #[test]
    fn profile_flag_reflects_presence() {
        let profile = UserProfile::default();
        assert!(blog_score("Some text.", &[], Some(&profile)).adjusted_for_profile);
        assert!(!blog_score("Some text.", &[], None).adjusted_for_profile);
    }

    #[test]
    fn scores_are_rounded_for_reporting() {
        let text = "The quick brown fox jumps over the lazy dog.";
        let breakdown = blog_score(text, &kw(&["fox"]), None);
        let rounded = (breakdown.final_score * 100.0).round() / 100.0;
        assert!((breakdown.final_score - rounded).abs() < f64::EPSILON);
    }

    #[test]
    fn round2_behaves() {
        assert!((round2(1.005) - 1.01).abs() < 1e-9 || (round2(1.005) - 1.0).abs() < 1e-9);
        assert!((round2(33.333_333) - 33.33).abs() < 1e-9);
        assert_eq!(round2(0.0), 0.0);
    }
}
