//! External oracle interfaces.
//!
//! Candidate generation, topic extraction, and sentiment live behind traits
//! so the orchestration routines can run against a real language-model
//! client, a canned reply, or nothing at all. Reply bodies are treated as
//! untrusted text: parsing never raises, and anything malformed degrades to
//! the locally computed n-gram fallback.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::OracleResult;
use crate::profile::UserProfile;
use crate::suggest::Candidate;
use crate::text;

/// Candidates drawn from the draft itself when no oracle reply is usable.
const FALLBACK_POOL: usize = 20;

/// Token accounting for one or more oracle calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TokenUsage {
    /// Tokens consumed by the request side.
    pub prompt_tokens: u64,
    /// Tokens produced by the reply side.
    pub completion_tokens: u64,
    /// Request plus reply tokens.
    pub total_tokens: u64,
}

impl TokenUsage {
    /// Accumulate another record into this one.
    pub fn merge(&mut self, other: &Self) {
        self.prompt_tokens = self.prompt_tokens.saturating_add(other.prompt_tokens);
        self.completion_tokens = self.completion_tokens.saturating_add(other.completion_tokens);
        self.total_tokens = self.total_tokens.saturating_add(other.total_tokens);
    }
}

/// Raw reply from a candidate or topic oracle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleReply {
    /// Reply body. Expected to be JSON, never trusted to be.
    pub content: String,
    /// Token accounting for the call.
    #[serde(default)]
    pub usage: TokenUsage,
}

/// Proposes candidate phrases for an in-progress draft.
///
/// Implementations are constructed once at startup and shared read-only.
/// Transient failures are expected; callers wrap invocations in a retry
/// policy and fall back to draft n-grams when the oracle stays down.
pub trait CandidateOracle {
    /// Propose next keywords/phrases for `draft`.
    fn propose(&self, draft: &str, profile: Option<&UserProfile>) -> OracleResult<OracleReply>;
}

/// Extracts topics and keywords from a finished post.
pub trait TopicOracle {
    /// Extract topics for `text`.
    fn topics(&self, text: &str) -> OracleResult<OracleReply>;
}

/// Sentiment intensities for a text. All four values are in `[0, 1]`
/// except `compound`, which ranges `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SentimentScores {
    /// Positive intensity.
    pub positive: f64,
    /// Neutral intensity.
    pub neutral: f64,
    /// Negative intensity.
    pub negative: f64,
    /// Normalized aggregate polarity.
    pub compound: f64,
}

/// Scores the emotional polarity of a text.
pub trait SentimentOracle {
    /// Polarity intensities for `text`.
    fn polarity(&self, text: &str) -> SentimentScores;
}

/// Sentiment stand-in reporting every text as fully neutral.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralSentiment;

impl SentimentOracle for NeutralSentiment {
    fn polarity(&self, _text: &str) -> SentimentScores {
        SentimentScores {
            positive: 0.0,
            neutral: 1.0,
            negative: 0.0,
            compound: 0.0,
        }
    }
}

/// Where a candidate list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    /// Parsed from an oracle reply.
    Oracle,
    /// Extracted locally from the draft's top n-grams.
    NgramFallback,
}

/// Strictly parse an oracle reply body into candidates.
///
/// Accepts `{"suggestions": [...]}` or a bare JSON array, where items are
/// `{"phrase": ..., "reason"?: ...}` objects or plain strings. Returns
/// `None` on any malformation instead of erroring.
pub fn parse_candidates(raw: &str) -> Option<Vec<Candidate>> {
    let value: Value = serde_json::from_str(raw).ok()?;
    let items = match &value {
        Value::Object(map) => map.get("suggestions")?.as_array()?,
        Value::Array(items) => items,
        _ => return None,
    };

    let mut candidates = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(phrase) => candidates.push(Candidate::bare(phrase.clone())),
            Value::Object(_) => candidates.push(serde_json::from_value(item.clone()).ok()?),
            _ => return None,
        }
    }
    Some(candidates)
}

/// Strictly parse a topic-oracle reply body.
///
/// Expects a JSON object; `topics` and `keywords` each default to empty
/// when missing. Returns `None` when the body is not a JSON object or a
/// listed entry is not a string.
pub fn parse_topics(raw: &str) -> Option<(Vec<String>, Vec<String>)> {
    let value: Value = serde_json::from_str(raw).ok()?;
    let map = value.as_object()?;
    let topics = string_list(map.get("topics"))?;
    let keywords = string_list(map.get("keywords"))?;
    Some((topics, keywords))
}

fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    let Some(value) = value else {
        return Some(Vec::new());
    };
    value
        .as_array()?
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}

/// Use a reply's parsed candidates, or fall back to the draft's n-grams.
///
/// The fallback kicks in when there is no reply, the body fails to parse,
/// or the parsed list is empty. Never raises.
pub fn candidates_or_fallback(
    reply: Option<&OracleReply>,
    draft: &str,
) -> (Vec<Candidate>, CandidateSource) {
    if let Some(reply) = reply
        && let Some(parsed) = parse_candidates(&reply.content)
        && !parsed.is_empty()
    {
        return (parsed, CandidateSource::Oracle);
    }

    let fallback = text::top_ngrams(draft, FALLBACK_POOL)
        .into_iter()
        .map(Candidate::bare)
        .collect();
    (fallback, CandidateSource::NgramFallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_merges_by_field() {
        let mut total = TokenUsage::default();
        total.merge(&TokenUsage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        });
        total.merge(&TokenUsage {
            prompt_tokens: 1,
            completion_tokens: 2,
            total_tokens: 3,
        });
        assert_eq!(total.prompt_tokens, 11);
        assert_eq!(total.completion_tokens, 7);
        assert_eq!(total.total_tokens, 18);
    }

    #[test]
    fn parses_suggestions_object() {
        let raw = r#"{"suggestions": [{"phrase": "memory safety", "reason": "core theme"},
                                       {"phrase": "borrow checker"}]}"#;
        let candidates = parse_candidates(raw).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].phrase, "memory safety");
        assert_eq!(candidates[0].reason.as_deref(), Some("core theme"));
        assert!(candidates[1].reason.is_none());
    }

    #[test]
    fn parses_bare_array_of_strings() {
        let candidates = parse_candidates(r#"["alpha", "beta"]"#).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[1].phrase, "beta");
    }

    #[test]
    fn malformed_bodies_parse_to_none() {
        assert!(parse_candidates("not json at all").is_none());
        assert!(parse_candidates(r#"{"wrong_key": []}"#).is_none());
        assert!(parse_candidates(r#"{"suggestions": "not a list"}"#).is_none());
        assert!(parse_candidates(r#"{"suggestions": [42]}"#).is_none());
        assert!(parse_candidates("17").is_none());
    }

    #[test]
    fn parse_topics_defaults_missing_keys() {
        let (topics, keywords) = parse_topics(r#"{"topics": ["rust"]}"#).unwrap();
        assert_eq!(topics, vec!["rust"]);
        assert!(keywords.is_empty());

        let (topics, keywords) = parse_topics("{}").unwrap();
        assert!(topics.is_empty());
        assert!(keywords.is_empty());
    }

    #[test]
    fn parse_topics_rejects_non_objects() {
        assert!(parse_topics("[]").is_none());
        assert!(parse_topics("plain text").is_none());
        assert!(parse_topics(r#"{"topics": [1, 2]}"#).is_none());
    }

    #[test]
    fn fallback_on_missing_reply() {
        let draft = "Rust delivers memory safety. Rust compiles fast.";
        let (candidates, source) = candidates_or_fallback(None, draft);
        assert_eq!(source, CandidateSource::NgramFallback);
        assert!(candidates.iter().any(|c| c.phrase == "rust"));
    }

    #[test]
    fn fallback_on_malformed_reply() {
        let reply = OracleReply {
            content: "sorry, I can only answer in prose".to_string(),
            usage: TokenUsage::default(),
        };
        let draft = "Rust delivers memory safety. Rust compiles fast.";
        let (candidates, source) = candidates_or_fallback(Some(&reply), draft);
        assert_eq!(source, CandidateSource::NgramFallback);
        assert!(!candidates.is_empty());
    }

    #[test]
    fn fallback_on_empty_suggestion_list() {
        let reply = OracleReply {
            content: r#"{"suggestions": []}"#.to_string(),
            usage: TokenUsage::default(),
        };
        let (_, source) = candidates_or_fallback(Some(&reply), "Some draft text here.");
        assert_eq!(source, CandidateSource::NgramFallback);
    }

    #[test]
    fn well_formed_reply_wins_over_fallback() {
        let reply = OracleReply {
            content: r#"{"suggestions": [{"phrase": "zero cost abstractions"}]}"#.to_string(),
            usage: TokenUsage::default(),
        };
        let (candidates, source) = candidates_or_fallback(Some(&reply), "Rust draft text.");
        assert_eq!(source, CandidateSource::Oracle);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].phrase, "zero cost abstractions");
    }

    #[test]
    fn neutral_sentiment_is_fully_neutral() {
        let scores = NeutralSentiment.polarity("anything at all");
        assert_eq!(scores.neutral, 1.0);
        assert_eq!(scores.positive, 0.0);
        assert_eq!(scores.negative, 0.0);
        assert_eq!(scores.compound, 0.0);
    }
}
