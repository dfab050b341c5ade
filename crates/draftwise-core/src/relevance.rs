//! Keyword relevance scoring.
//!
//! Blends two signals 50/50 and scales the result to 0-100: literal keyword
//! frequency in the text, and mean cosine similarity between the text and
//! each keyword over a TF-IDF vector space. The semantic half sits behind
//! [`SimilarityOracle`], so a dense-embedding backend can replace the
//! built-in TF-IDF without touching the blend contract.

use regex::Regex;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::LazyLock;

use crate::text;

/// Vector-space terms: runs of two or more word characters.
static TERM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("valid regex"));

/// Mean text-to-phrase similarity provider.
///
/// Implementations are constructed once and shared read-only; the default is
/// [`TfIdfSimilarity`].
pub trait SimilarityOracle {
    /// Mean similarity in `[0, 1]` between `document` and each of `phrases`.
    fn mean_similarity(&self, document: &str, phrases: &[String]) -> f64;
}

/// TF-IDF cosine similarity over the `{document} ∪ phrases` corpus.
///
/// Each phrase is treated as its own mini-document. Inverse document
/// frequency is smoothed (`ln((1+n)/(1+df)) + 1`) and rows are
/// L2-normalized, so cosine similarity reduces to a dot product.
#[derive(Debug, Clone, Copy, Default)]
pub struct TfIdfSimilarity;

impl SimilarityOracle for TfIdfSimilarity {
    fn mean_similarity(&self, document: &str, phrases: &[String]) -> f64 {
        if phrases.is_empty() {
            return 0.0;
        }

        let tokenized: Vec<Vec<String>> = std::iter::once(document)
            .chain(phrases.iter().map(String::as_str))
            .map(terms)
            .collect();

        let vocab: BTreeMap<&str, usize> = tokenized
            .iter()
            .flatten()
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .enumerate()
            .map(|(col, term)| (term, col))
            .collect();
        if vocab.is_empty() {
            return 0.0;
        }

        let mut df = vec![0usize; vocab.len()];
        for tokens in &tokenized {
            let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                if let Some(&col) = vocab.get(term) {
                    df[col] += 1;
                }
            }
        }
        let n_docs = tokenized.len() as f64;
        let idf: Vec<f64> = df
            .iter()
            .map(|&count| ((1.0 + n_docs) / (1.0 + count as f64)).ln() + 1.0)
            .collect();

        let text_row = weighted_row(&tokenized[0], &vocab, &idf);
        if text_row.iter().all(|v| *v == 0.0) {
            return 0.0;
        }

        let total: f64 = tokenized[1..]
            .iter()
            .map(|tokens| dot(&text_row, &weighted_row(tokens, &vocab, &idf)))
            .sum();
        (total / phrases.len() as f64).clamp(0.0, 1.0)
    }
}

fn terms(text: &str) -> Vec<String> {
    TERM_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Raw term counts weighted by idf, L2-normalized. Zero rows stay zero.
fn weighted_row(tokens: &[String], vocab: &BTreeMap<&str, usize>, idf: &[f64]) -> Vec<f64> {
    let mut row = vec![0.0; idf.len()];
    for term in tokens {
        if let Some(&col) = vocab.get(term.as_str()) {
            row[col] += idf[col];
        }
    }
    let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        for v in &mut row {
            *v /= norm;
        }
    }
    row
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Score keyword relevance against a text using the built-in TF-IDF oracle.
#[tracing::instrument(skip_all, fields(text_len = text.len(), keywords = keywords.len()))]
pub fn keyword_relevance(text: &str, keywords: &[String]) -> f64 {
    keyword_relevance_with(&TfIdfSimilarity, text, keywords)
}

/// Score keyword relevance with a caller-supplied similarity oracle.
///
/// Frequency component: case-insensitive whole-word hits summed over all
/// keywords, normalized by `word_count + 1` and clamped to `[0, 1]`. The
/// oracle's mean similarity is clamped the same way, then the two blend
/// 50/50 and scale to 0-100. Empty `keywords` scores 0.
pub fn keyword_relevance_with(
    oracle: &dyn SimilarityOracle,
    text: &str,
    keywords: &[String],
) -> f64 {
    if keywords.is_empty() {
        return 0.0;
    }

    let mut histogram: HashMap<String, usize> = HashMap::new();
    for word in text::bare_words(text) {
        *histogram.entry(word.to_lowercase()).or_insert(0) += 1;
    }
    let word_total: usize = histogram.values().sum();
    let hits: usize = keywords
        .iter()
        .map(|k| histogram.get(&k.to_lowercase()).copied().unwrap_or(0))
        .sum();
    let frequency = (hits as f64 / (word_total as f64 + 1.0)).min(1.0);

    let semantic = oracle.mean_similarity(text, keywords).clamp(0.0, 1.0);

    frequency.mul_add(0.5, semantic * 0.5) * 100.0
}
