//! Command implementations.

use anyhow::Context;
use camino::Utf8Path;
use draftwise_core::UserProfile;
use draftwise_core::config::Config;

pub mod analyze;
pub mod info;
pub mod ngrams;
pub mod score;
pub mod suggest;
pub mod weak;

/// Read a draft or post file into memory.
pub fn read_input_file(path: &Utf8Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path.as_std_path()).with_context(|| format!("failed to read {path}"))
}

/// Resolve the writer profile: the explicit flag wins over the config default.
///
/// No flag and no configured path means no profile, which every scoring
/// routine accepts.
pub fn load_profile(
    flag: Option<&Utf8Path>,
    config: &Config,
) -> anyhow::Result<Option<UserProfile>> {
    let Some(path) = flag.or(config.profile.as_deref()) else {
        return Ok(None);
    };
    let profile =
        UserProfile::from_file(path).with_context(|| format!("failed to load profile {path}"))?;
    Ok(Some(profile))
}
