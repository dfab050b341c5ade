//! Suggestion ranking.
//!
//! Takes raw candidate phrases (from an oracle or the n-gram fallback),
//! scores each against the draft, filters banned words, deduplicates by
//! normalized phrase, and orders the survivors.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::profile::UserProfile;
use crate::relevance::{SimilarityOracle, TfIdfSimilarity, keyword_relevance_with};
use crate::score::round2;
use crate::text;

/// Relevance carries the ranking; frequency breaks near-ties.
const RELEVANCE_WEIGHT: f64 = 0.85;
const FREQUENCY_WEIGHT: f64 = 0.15;

/// A raw candidate phrase, before scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Candidate {
    /// The suggested phrase.
    pub phrase: String,
    /// Optional free-text justification from the proposer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Candidate {
    /// Build a reason-less candidate from a phrase.
    pub fn bare<S: Into<String>>(phrase: S) -> Self {
        Self {
            phrase: phrase.into(),
            reason: None,
        }
    }
}

/// A candidate with its computed ranking score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RankedSuggestion {
    /// The suggested phrase, trimmed.
    pub phrase: String,
    /// Justification carried over from the winning candidate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Blended relevance/frequency score in `[0, 100]`.
    pub relevance_score: f64,
}

/// Accumulated phrase weights from writing history and the current draft.
///
/// Keys are lower-cased; inserting an existing key increments its weight.
#[derive(Debug, Clone, Default)]
pub struct FrequencyMap {
    weights: HashMap<String, u32>,
}

impl FrequencyMap {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `weight` to a phrase, creating the entry if needed.
    pub fn add(&mut self, phrase: &str, weight: u32) {
        *self.weights.entry(phrase.to_lowercase()).or_insert(0) += weight;
    }

    /// Look up a phrase's weight; absent phrases weigh 0.
    pub fn weight(&self, phrase: &str) -> u32 {
        self.weights.get(&phrase.to_lowercase()).copied().unwrap_or(0)
    }

    /// Seed from history keywords (weight 2 each) and the draft's top
    /// n-grams (weight 1 each, up to `ngram_cap`).
    #[tracing::instrument(skip_all, fields(history = history_keywords.len(), ngram_cap))]
    pub fn from_sources(history_keywords: &[String], draft: &str, ngram_cap: usize) -> Self {
        let mut map = Self::new();
        for keyword in history_keywords {
            map.add(keyword, 2);
        }
        for gram in text::top_ngrams(draft, ngram_cap) {
            map.add(&gram, 1);
        }
        map
    }

    /// Number of distinct phrases tracked.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether the map tracks no phrases at all.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Rank candidates against a draft using the built-in TF-IDF oracle.
#[tracing::instrument(skip_all, fields(draft_len = draft.len(), candidates = candidates.len()))]
pub fn rank_suggestions(
    draft: &str,
    candidates: &[Candidate],
    profile: Option<&UserProfile>,
    freq_map: &FrequencyMap,
) -> Vec<RankedSuggestion> {
    rank_suggestions_with(&TfIdfSimilarity, draft, candidates, profile, freq_map)
}

/// Rank candidates with a caller-supplied similarity oracle.
///
/// Per candidate: `score = relevance * 0.85 + min(freq_weight * 10, 100) * 0.15`,
/// where `relevance` is the candidate's keyword relevance against the draft
/// and `freq_weight` its frequency-map weight. Candidates matching a banned
/// word are dropped; duplicates (same trimmed, lower-cased phrase) keep the
/// highest score, first-seen on ties. The result is sorted descending with
/// input order preserved among equal scores, untruncated. Callers cut to
/// their own maximum.
pub fn rank_suggestions_with(
    oracle: &dyn SimilarityOracle,
    draft: &str,
    candidates: &[Candidate],
    profile: Option<&UserProfile>,
    freq_map: &FrequencyMap,
) -> Vec<RankedSuggestion> {
    let banned = profile.map(|p| &p.banned_words);

    let mut order: Vec<String> = Vec::new();
    let mut best: HashMap<String, RankedSuggestion> = HashMap::new();

    for candidate in candidates {
        let normalized = candidate.phrase.trim().to_lowercase();
        if normalized.is_empty() || is_banned(&normalized, banned) {
            continue;
        }

        let relevance = keyword_relevance_with(oracle, draft, std::slice::from_ref(&normalized));
        let frequency = (f64::from(freq_map.weight(&normalized)) * 10.0).min(100.0);
        let score = relevance.mul_add(RELEVANCE_WEIGHT, frequency * FREQUENCY_WEIGHT);

        let scored = RankedSuggestion {
            phrase: candidate.phrase.trim().to_string(),
            reason: candidate.reason.clone(),
            relevance_score: round2(score),
        };

        match best.entry(normalized) {
            Entry::Vacant(slot) => {
                order.push(slot.key().clone());
                slot.insert(scored);
            }
            Entry::Occupied(mut slot) => {
                // Strictly greater so ties keep the first-seen entry.
                if scored.relevance_score > slot.get().relevance_score {
                    slot.insert(scored);
                }
            }
        }
    }

    let mut ranked: Vec<RankedSuggestion> = order
        .iter()
        .filter_map(|key| best.remove(key))
        .collect();
    ranked.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}

/// A candidate is banned when its normalized phrase equals a banned word or
/// contains one as a whole whitespace-separated token.
fn is_banned(normalized: &str, banned: Option<&std::collections::BTreeSet<String>>) -> bool {
    let Some(banned) = banned else {
        return false;
    };
    banned.iter().any(|word| {
        let word = word.trim().to_lowercase();
        !word.is_empty()
            && (normalized == word || normalized.split_whitespace().any(|token| token == word))
    })
}
