//! Ngrams command — most frequent words and bigrams of a text.

use camino::Utf8PathBuf;
use clap::Args;
use tracing::{debug, instrument};

use draftwise_core::text;

use super::read_input_file;

/// Arguments for the `ngrams` subcommand.
#[derive(Args, Debug)]
pub struct NgramsArgs {
    /// File to extract n-grams from.
    pub file: Utf8PathBuf,

    /// Number of n-grams to keep.
    #[arg(long, default_value_t = 10)]
    pub count: usize,
}

/// Extract the top words and bigrams from a file.
#[instrument(name = "cmd_ngrams", skip_all, fields(file = %args.file))]
pub fn cmd_ngrams(args: NgramsArgs, global_json: bool) -> anyhow::Result<()> {
    debug!(file = %args.file, count = args.count, "executing ngrams command");

    let content = read_input_file(&args.file)?;
    let grams = text::top_ngrams(&content, args.count);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&grams)?);
        return Ok(());
    }

    for gram in &grams {
        println!("{gram}");
    }

    Ok(())
}
