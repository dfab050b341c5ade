//! Score command — composite quality scoring for a draft.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use draftwise_core::config::Config;
use draftwise_core::score;

use super::{load_profile, read_input_file};

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Draft file to score.
    pub file: Utf8PathBuf,

    /// Target keywords (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub keywords: Vec<String>,

    /// Writer profile file (overrides the config default).
    #[arg(long, value_name = "FILE")]
    pub profile: Option<Utf8PathBuf>,
}

/// Score a draft against target keywords.
#[instrument(name = "cmd_score", skip_all, fields(file = %args.file))]
pub fn cmd_score(args: ScoreArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(file = %args.file, keywords = args.keywords.len(), "executing score command");

    let content = read_input_file(&args.file)?;
    let profile = load_profile(args.profile.as_deref(), config)?;

    let breakdown = score::blog_score(&content, &args.keywords, profile.as_ref());

    if global_json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
        return Ok(());
    }

    let score_str = if breakdown.final_score >= 80.0 {
        format!("{:.2}", breakdown.final_score).green().to_string()
    } else if breakdown.final_score >= 60.0 {
        format!("{:.2}", breakdown.final_score).yellow().to_string()
    } else {
        format!("{:.2}", breakdown.final_score).red().to_string()
    };

    println!("{}", args.file.bold());
    println!("  {} {}/100", "Score:".cyan(), score_str);
    println!("  {} {:.2}", "Keyword relevance:".cyan(), breakdown.keyword_score);
    println!("  {} {:.2}", "Readability grade:".cyan(), breakdown.readability_grade);
    if breakdown.adjusted_for_profile {
        println!("  {}", "(adjusted for writer profile)".dimmed());
    }

    Ok(())
}
