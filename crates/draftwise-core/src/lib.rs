//! Core library for draftwise.
//!
//! This crate provides the scoring, ranking, and analysis engine used by the
//! `draftwise` CLI and any downstream consumers.
//!
//! # Modules
//!
//! - [`assist`] - End-to-end recommendation and archive-analysis flows
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//! - [`oracle`] - Oracle traits, reply parsing, and n-gram fallback
//! - [`profile`] - Writer profiles and score adjustment
//! - [`readability`] - Flesch-Kincaid grade and reading-ease formulas
//! - [`relevance`] - Keyword relevance scoring against a draft
//! - [`retry`] - Bounded retry with exponential backoff
//! - [`score`] - Composite draft scoring
//! - [`suggest`] - Candidate ranking and frequency weighting
//! - [`text`] - Tokenization, n-grams, sentences, and syllables
//! - [`weak`] - Hard-to-read section detection
//! - [`word_lists`] - Stop words excluded from keyword extraction
//!
//! # Quick Start
//!
//! ```
//! use draftwise_core::score::blog_score;
//!
//! let keywords = vec!["memory safety".to_string()];
//! let breakdown = blog_score(
//!     "Rust gives you memory safety without garbage collection.",
//!     &keywords,
//!     None,
//! );
//! assert!(breakdown.final_score >= 0.0 && breakdown.final_score <= 100.0);
//! ```
#![deny(unsafe_code)]

pub mod assist;
pub mod config;
pub mod error;
pub mod oracle;
pub mod profile;
pub mod readability;
pub mod relevance;
pub mod retry;
pub mod score;
pub mod suggest;
pub mod text;
pub mod weak;
pub mod word_lists;

pub use config::{Config, ConfigLoader, LogLevel};

pub use error::{ConfigError, ConfigResult, OracleError, OracleResult};

pub use profile::UserProfile;

pub use score::{ScoreBreakdown, blog_score};
