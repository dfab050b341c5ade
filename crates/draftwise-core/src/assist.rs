//! End-to-end assistance flows: draft recommendations and post analysis.
//!
//! These routines tie the oracles, rankers, and scorers together. They
//! never raise on oracle trouble: a dead or incoherent oracle degrades to
//! n-grams extracted from the text itself, and the output records which
//! path was taken.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::oracle::{
    self, CandidateOracle, CandidateSource, SentimentOracle, SentimentScores, TokenUsage,
    TopicOracle,
};
use crate::profile::UserProfile;
use crate::readability;
use crate::retry::{self, RetryPolicy};
use crate::score::{self, ScoreBreakdown};
use crate::suggest::{self, FrequencyMap, RankedSuggestion};
use crate::text;
use crate::weak::{self, WeakSection};

/// Topics drawn from a post when the topic reply is missing or malformed.
const FALLBACK_TOPICS: usize = 8;
/// Keywords drawn from a post when the topic reply is missing or malformed.
const FALLBACK_KEYWORDS: usize = 20;
/// N-grams appended to a well-parsed keyword list before dedup.
const PARSED_NGRAM_TOPUP: usize = 15;

/// Knobs for [`recommend_for_draft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendOptions {
    /// Suggestions kept after ranking.
    pub max_suggestions: usize,
    /// Draft n-grams seeded into the frequency map.
    pub ngram_cap: usize,
    /// Retry schedule for the candidate oracle.
    pub retry: RetryPolicy,
}

impl Default for RecommendOptions {
    fn default() -> Self {
        Self {
            max_suggestions: 8,
            ngram_cap: 50,
            retry: RetryPolicy::default(),
        }
    }
}

/// Everything a writer gets back for one draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DraftRecommendation {
    /// Ranked suggestions, best first, truncated to the configured cap.
    pub suggestions: Vec<RankedSuggestion>,
    /// Flesch reading-ease of the draft.
    pub readability: f64,
    /// Composite quality score computed against the kept suggestions.
    pub score: ScoreBreakdown,
    /// Hard-to-read stretches of the draft.
    pub weak_sections: Vec<WeakSection>,
    /// Token spend for the oracle call, zero when none was made.
    pub token_usage: TokenUsage,
    /// Whether suggestions came from the oracle or the draft itself.
    pub source: CandidateSource,
}

/// Analysis of one archived post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PostAnalysis {
    /// Emotional polarity of the post.
    pub sentiment: SentimentScores,
    /// Topics covered, from the oracle or the post's n-grams.
    pub topics: Vec<String>,
    /// Seed keywords for future drafts, first occurrence kept on ties.
    pub initial_keywords: Vec<String>,
    /// Composite quality score against the seed keywords.
    pub score: ScoreBreakdown,
}

/// Output of [`analyze_posts`] over a whole archive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalyzeReport {
    /// One entry per input post, in input order.
    pub results: Vec<PostAnalysis>,
    /// Token spend accumulated across every oracle call.
    pub token_usage: TokenUsage,
}

/// Produce ranked suggestions, scores, and weak sections for a draft.
///
/// With no oracle, or an oracle that stays down through the retry
/// schedule, candidates come from the draft's own top n-grams.
#[tracing::instrument(skip_all, fields(draft_len = draft.len()))]
pub fn recommend_for_draft(
    candidate_oracle: Option<&dyn CandidateOracle>,
    draft: &str,
    profile: Option<&UserProfile>,
    history_keywords: &[String],
    options: &RecommendOptions,
) -> DraftRecommendation {
    let reply = candidate_oracle.and_then(|oracle| {
        match retry::with_backoff(&options.retry, || oracle.propose(draft, profile)) {
            Ok(reply) => Some(reply),
            Err(err) => {
                tracing::warn!(error = %err, "candidate oracle unavailable, using draft n-grams");
                None
            }
        }
    });

    let token_usage = reply.as_ref().map(|reply| reply.usage).unwrap_or_default();
    let (candidates, source) = oracle::candidates_or_fallback(reply.as_ref(), draft);
    let freq_map = FrequencyMap::from_sources(history_keywords, draft, options.ngram_cap);

    let mut suggestions = suggest::rank_suggestions(draft, &candidates, profile, &freq_map);
    suggestions.truncate(options.max_suggestions);

    let kept_phrases: Vec<String> = suggestions
        .iter()
        .map(|suggestion| suggestion.phrase.clone())
        .collect();

    DraftRecommendation {
        score: score::blog_score(draft, &kept_phrases, profile),
        suggestions,
        readability: readability::flesch_reading_ease(draft),
        weak_sections: weak::detect_weak_sections(draft),
        token_usage,
        source,
    }
}

/// Score and summarize an archive of published posts.
///
/// The topic oracle is optional; without it, and whenever a reply fails to
/// parse, topics and keywords fall back to each post's top n-grams.
#[tracing::instrument(skip_all, fields(posts = posts.len()))]
pub fn analyze_posts(
    posts: &[String],
    profile: Option<&UserProfile>,
    sentiment_oracle: &dyn SentimentOracle,
    topic_oracle: Option<&dyn TopicOracle>,
    retry: &RetryPolicy,
) -> AnalyzeReport {
    let mut token_usage = TokenUsage::default();
    let mut results = Vec::with_capacity(posts.len());

    for post in posts {
        let sentiment = sentiment_oracle.polarity(post);

        let reply = topic_oracle.and_then(|oracle| {
            match retry::with_backoff(retry, || oracle.topics(post)) {
                Ok(reply) => Some(reply),
                Err(err) => {
                    tracing::warn!(error = %err, "topic oracle unavailable, using post n-grams");
                    None
                }
            }
        });

        let (topics, initial_keywords) = match &reply {
            Some(reply) => {
                token_usage.merge(&reply.usage);
                match oracle::parse_topics(&reply.content) {
                    Some((topics, mut keywords)) => {
                        keywords.extend(text::top_ngrams(post, PARSED_NGRAM_TOPUP));
                        (topics, dedup_first_seen(keywords))
                    }
                    None => ngram_topics(post),
                }
            }
            None => ngram_topics(post),
        };

        results.push(PostAnalysis {
            sentiment,
            score: score::blog_score(post, &initial_keywords, profile),
            topics,
            initial_keywords,
        });
    }

    AnalyzeReport {
        results,
        token_usage,
    }
}

fn ngram_topics(post: &str) -> (Vec<String>, Vec<String>) {
    (
        text::top_ngrams(post, FALLBACK_TOPICS),
        text::top_ngrams(post, FALLBACK_KEYWORDS),
    )
}

fn dedup_first_seen(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}
