//! Weak command — flag hard-to-read stretches of a draft.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use draftwise_core::weak::{self, WeakSection};

use super::read_input_file;

/// Arguments for the `weak` subcommand.
#[derive(Args, Debug)]
pub struct WeakArgs {
    /// Draft file to inspect.
    pub file: Utf8PathBuf,
}

/// Flag hard-to-read sections of a draft.
#[instrument(name = "cmd_weak", skip_all, fields(file = %args.file))]
pub fn cmd_weak(args: WeakArgs, global_json: bool) -> anyhow::Result<()> {
    debug!(file = %args.file, "executing weak command");

    let content = read_input_file(&args.file)?;
    let sections = weak::detect_weak_sections(&content);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&sections)?);
        return Ok(());
    }

    if sections.is_empty() {
        println!("{} no weak sections in {}", "PASS:".green(), args.file);
        return Ok(());
    }

    println!("{}", args.file.bold());
    for section in &sections {
        println!(
            "  {} bytes {}..{}: {}",
            "weak".yellow(),
            section.start,
            section.end,
            excerpt(&content, section),
        );
        println!("      {}", section.reason.dimmed());
    }

    Ok(())
}

/// First few words of a flagged span, for locating it in the draft.
fn excerpt(content: &str, section: &WeakSection) -> String {
    let span = &content[section.start..section.end];
    if span.chars().count() <= 60 {
        return span.to_string();
    }
    let mut cut: String = span.chars().take(60).collect();
    cut.push_str("...");
    cut
}
