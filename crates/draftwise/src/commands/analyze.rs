//! Analyze command — score and summarize an archive of published posts.

use camino::Utf8PathBuf;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use draftwise_core::assist::{self, AnalyzeReport};
use draftwise_core::config::Config;
use draftwise_core::oracle::{NeutralSentiment, TokenUsage};

use super::{load_profile, read_input_file};

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Post files to analyze, one post per file.
    #[arg(required = true)]
    pub files: Vec<Utf8PathBuf>,

    /// Writer profile file (overrides the config default).
    #[arg(long, value_name = "FILE")]
    pub profile: Option<Utf8PathBuf>,
}

/// Score and summarize an archive of published posts.
#[instrument(name = "cmd_analyze", skip_all, fields(posts = args.files.len()))]
pub fn cmd_analyze(
    args: AnalyzeArgs,
    global_json: bool,
    quiet: bool,
    config: &Config,
) -> anyhow::Result<()> {
    debug!(posts = args.files.len(), "executing analyze command");

    let profile = load_profile(args.profile.as_deref(), config)?;
    let retry = config.retry_policy();

    let progress = if global_json || quiet {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(args.files.len() as u64);
        bar.set_style(ProgressStyle::with_template(
            "{bar:30} {pos}/{len} {msg}",
        )?);
        bar
    };

    let mut results = Vec::with_capacity(args.files.len());
    let mut token_usage = TokenUsage::default();
    for file in &args.files {
        progress.set_message(file.to_string());
        let post = read_input_file(file)?;
        let mut report = assist::analyze_posts(
            std::slice::from_ref(&post),
            profile.as_ref(),
            &NeutralSentiment,
            None,
            &retry,
        );
        token_usage.merge(&report.token_usage);
        results.append(&mut report.results);
        progress.inc(1);
    }
    progress.finish_and_clear();

    let report = AnalyzeReport {
        results,
        token_usage,
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for (file, result) in args.files.iter().zip(&report.results) {
        println!("{}", file.bold());
        println!("  {} {:.2}/100", "Score:".cyan(), result.score.final_score);
        if !result.topics.is_empty() {
            println!("  {} {}", "Topics:".cyan(), result.topics.join(", "));
        }
        let keywords: Vec<_> = result
            .initial_keywords
            .iter()
            .take(8)
            .map(String::as_str)
            .collect();
        if !keywords.is_empty() {
            println!("  {} {}", "Keywords:".cyan(), keywords.join(", "));
        }
        println!();
    }

    if report.token_usage.total_tokens > 0 {
        println!(
            "{} {} tokens",
            "Oracle usage:".dimmed(),
            report.token_usage.total_tokens,
        );
    }

    Ok(())
}
