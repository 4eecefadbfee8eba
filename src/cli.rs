// CLI layer: argument definitions and the top-level run. `run` owns the
// AnkiConnect client for the whole invocation; `run_with` holds the flow
// itself and works against any `DeckService`.

use crate::api::{AnkiClient, DeckService};
use crate::config::Config;
use crate::parser::{parse_word_pairs, read_input};
use crate::processing::{process_word_pairs, Stats};
use crate::report::print_report;
use anyhow::{bail, Result};
use clap::Parser;
use crossterm::style::Stylize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Create Anki flashcards from word pairs in text format.
///
/// Input format, one pair per line:
///
///   hello - hej
///   goodbye - hej då
///
/// Front and back are separated by a run of `-`, `–`, `—` or tabs.
#[derive(Parser, Debug, Clone)]
#[command(name = "wb-anki", version, verbatim_doc_comment)]
pub struct Args {
    /// Name of the Anki deck to add cards to
    #[arg(long, value_name = "NAME")]
    pub deck_name: String,

    /// Path to text file containing word pairs (reads stdin when omitted)
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// AnkiConnect API URL [default: ANKI_URL or http://localhost:8765]
    #[arg(long, value_name = "URL")]
    pub anki_url: Option<String>,

    /// Automatically create deck if it does not exist (default)
    #[arg(long, overrides_with = "no_create_deck")]
    pub create_deck: bool,

    /// Fail instead of creating a missing deck
    #[arg(long, overrides_with = "create_deck")]
    pub no_create_deck: bool,
}

impl Args {
    pub fn should_create_deck(&self) -> bool {
        !self.no_create_deck
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `DEBUG`.
pub fn init_logging(config: &Config) {
    let default = if config.debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Make sure `deck_name` exists, creating it when allowed.
pub fn ensure_deck<S: DeckService + ?Sized>(
    service: &S,
    deck_name: &str,
    create: bool,
) -> Result<()> {
    if service.deck_exists(deck_name)? {
        debug!(deck_name, "deck already exists");
        return Ok(());
    }
    if !create {
        bail!("Deck '{deck_name}' does not exist and --no-create-deck specified");
    }
    match service.create_deck(deck_name) {
        Ok(()) => {
            println!("{}", format!("✅ Created deck: {deck_name}").green());
            Ok(())
        }
        Err(e) => bail!("Failed to create deck: {deck_name} ({e})"),
    }
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    let style = ProgressStyle::with_template("{spinner} {msg} [{bar:30}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    pb.set_style(style);
    pb.set_message("Processing word pairs...");
    pb
}

/// Parse `lines`, check the deck, push every pair and print the report.
///
/// Errors when nothing parses, when the deck is missing and cannot be
/// created, or when any pair ended in an error.
pub fn run_with<S: DeckService + ?Sized>(
    service: &S,
    lines: &[String],
    args: &Args,
) -> Result<Stats> {
    let parsed = parse_word_pairs(lines);
    for skipped in &parsed.skipped {
        println!("{}", format!("⚠️ {}", skipped.message()).yellow());
    }
    if parsed.pairs.is_empty() {
        bail!("No valid word pairs found.");
    }

    ensure_deck(service, &args.deck_name, args.should_create_deck())?;

    println!(
        "{}",
        format!("Processing {} word pairs...", parsed.pairs.len()).blue()
    );
    let progress = progress_bar(parsed.pairs.len());
    let (stats, results) = process_word_pairs(service, &parsed.pairs, &args.deck_name, &progress);
    progress.finish_and_clear();

    print_report(&stats, &results);

    if stats.error > 0 {
        bail!("{} word pair(s) could not be added", stats.error);
    }
    Ok(stats)
}

/// Read input, open the AnkiConnect client and run the import.
///
/// Input errors abort before the client is created. The client is
/// dropped, and its connections released, on every return path.
pub fn run(args: &Args, config: &Config) -> Result<Stats> {
    let lines = read_input(args.file.as_deref())?;

    let url = args.anki_url.as_deref().unwrap_or(&config.anki_url);
    let client = AnkiClient::with_url(url, config.timeout)?;
    debug!(url = client.url(), "AnkiConnect client ready");

    run_with(&client, &lines, args)
}
