//! Suggest command — ranked keyword suggestions for an in-progress draft.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use draftwise_core::assist;
use draftwise_core::config::Config;
use draftwise_core::error::OracleResult;
use draftwise_core::oracle::{CandidateOracle, CandidateSource, OracleReply};
use draftwise_core::profile::UserProfile;

use super::{load_profile, read_input_file};

/// Arguments for the `suggest` subcommand.
#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// Draft file to rank suggestions for.
    pub file: Utf8PathBuf,

    /// JSON file with proposed candidates (stands in for a live oracle).
    #[arg(long, value_name = "FILE")]
    pub candidates: Option<Utf8PathBuf>,

    /// History keywords, one per line.
    #[arg(long, value_name = "FILE")]
    pub history: Option<Utf8PathBuf>,

    /// Suggestions to keep (overrides the config default).
    #[arg(long)]
    pub max: Option<usize>,

    /// Writer profile file (overrides the config default).
    #[arg(long, value_name = "FILE")]
    pub profile: Option<Utf8PathBuf>,
}

/// Replays a prepared reply body, e.g. candidates exported from an editor
/// integration. Malformed bodies degrade to the n-gram fallback exactly as
/// a misbehaving live oracle would.
struct StaticReplyOracle {
    content: String,
}

impl CandidateOracle for StaticReplyOracle {
    fn propose(&self, _draft: &str, _profile: Option<&UserProfile>) -> OracleResult<OracleReply> {
        Ok(OracleReply {
            content: self.content.clone(),
            ..OracleReply::default()
        })
    }
}

/// Rank keyword suggestions for a draft.
#[instrument(name = "cmd_suggest", skip_all, fields(file = %args.file))]
pub fn cmd_suggest(args: SuggestArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(file = %args.file, candidates = ?args.candidates, "executing suggest command");

    let draft = read_input_file(&args.file)?;
    let profile = load_profile(args.profile.as_deref(), config)?;
    let history = match args.history.as_deref() {
        Some(path) => read_history(path)?,
        None => Vec::new(),
    };

    let static_oracle = match args.candidates.as_deref() {
        Some(path) => Some(StaticReplyOracle {
            content: read_input_file(path)?,
        }),
        None => None,
    };

    let mut options = config.recommend_options();
    if let Some(max) = args.max {
        options.max_suggestions = max;
    }

    let recommendation = assist::recommend_for_draft(
        static_oracle
            .as_ref()
            .map(|oracle| oracle as &dyn CandidateOracle),
        &draft,
        profile.as_ref(),
        &history,
        &options,
    );

    if global_json {
        println!("{}", serde_json::to_string_pretty(&recommendation)?);
        return Ok(());
    }

    println!("{}", args.file.bold());
    if recommendation.source == CandidateSource::NgramFallback {
        println!("  {}", "(candidates drawn from the draft itself)".dimmed());
    }
    for (index, suggestion) in recommendation.suggestions.iter().enumerate() {
        println!(
            "  {:>2}. {} ({:.1})",
            index + 1,
            suggestion.phrase.bold(),
            suggestion.relevance_score,
        );
        if let Some(ref reason) = suggestion.reason {
            println!("      {}", reason.dimmed());
        }
    }

    println!();
    println!(
        "  {} {:.2}/100",
        "Score:".cyan(),
        recommendation.score.final_score,
    );
    println!("  {} {:.1}", "Reading ease:".cyan(), recommendation.readability);
    if !recommendation.weak_sections.is_empty() {
        println!(
            "  {} {} (see `draftwise weak`)",
            "Weak sections:".yellow(),
            recommendation.weak_sections.len(),
        );
    }

    Ok(())
}

fn read_history(path: &Utf8Path) -> anyhow::Result<Vec<String>> {
    let content = read_input_file(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
