//! User profiles and profile-based score adjustment.

use std::collections::BTreeSet;

use camino::Utf8Path;
use figment::Figment;
use figment::providers::{Format, Json, Serialized, Toml, Yaml};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::readability;

/// A writer's preferences, loaded from a profile file or built inline.
///
/// Absence of a profile means no adjustment anywhere it is consumed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct UserProfile {
    /// Topics the writer wants drafts to favor.
    pub preferred_topics: BTreeSet<String>,
    /// Target Flesch-Kincaid grade for the intended audience.
    ///
    /// A target of 0 is honored as a real target, not treated as unset.
    pub reading_level: Option<f64>,
    /// Words that disqualify a suggestion outright.
    pub banned_words: BTreeSet<String>,
}

impl UserProfile {
    /// Load a profile from a TOML, YAML, or JSON file.
    ///
    /// Missing fields fall back to their defaults; an unreadable or
    /// malformed file is an error.
    pub fn from_file(path: &Utf8Path) -> ConfigResult<Self> {
        let figment = Figment::from(Serialized::defaults(Self::default()));
        let figment = match path.extension() {
            Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
            Some("json") => figment.merge(Json::file_exact(path.as_str())),
            _ => figment.merge(Toml::file_exact(path.as_str())),
        };
        figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))
    }
}

/// Adjust a base score for a profile. `None` is the identity transform.
///
/// Each preferred topic appearing as a case-insensitive substring of `text`
/// adds 5 points, capped at +15. With a reading-level target set, a text
/// grading more than 3 above the target loses 10 points (too hard) and one
/// more than 3 below loses 5 (too simple). With a profile present the
/// result is clamped to `[0, 100]`; without one the score passes through
/// untouched.
pub fn user_profile_adjustment(score: f64, text: &str, profile: Option<&UserProfile>) -> f64 {
    let Some(profile) = profile else {
        return score;
    };

    let mut adjusted = score;

    let haystack = text.to_lowercase();
    let topic_hits = profile
        .preferred_topics
        .iter()
        .filter(|topic| !topic.is_empty() && haystack.contains(&topic.to_lowercase()))
        .count();
    adjusted += ((topic_hits * 5) as f64).min(15.0);

    if let Some(target) = profile.reading_level {
        let grade = readability::flesch_kincaid_grade(text);
        if grade > target + 3.0 {
            adjusted -= 10.0;
        } else if grade < target - 3.0 {
            adjusted -= 5.0;
        }
    }

    adjusted.clamp(0.0, 100.0)
}
