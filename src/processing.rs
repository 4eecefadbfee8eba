// Processing loop: for every parsed pair, skip it when the deck already
// has a note with that front, otherwise insert it. Strictly sequential.

use crate::api::DeckService;
use crate::parser::WordPair;
use crossterm::style::Stylize;
use indicatif::ProgressBar;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Added,
    Exists,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingOutcome {
    pub front: String,
    pub back: String,
    pub status: Status,
}

/// Per-status counters. `total()` always equals the number of outcomes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub added: usize,
    pub exists: usize,
    pub error: usize,
}

impl Stats {
    pub fn record(&mut self, status: Status) {
        match status {
            Status::Added => self.added += 1,
            Status::Exists => self.exists += 1,
            Status::Error => self.error += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.added + self.exists + self.error
    }
}

/// Push every pair into `deck_name`, advancing `progress` once per pair.
///
/// Insertion failures are printed right away and recorded as
/// [`Status::Error`]; they never stop the loop.
pub fn process_word_pairs<S: DeckService + ?Sized>(
    service: &S,
    pairs: &[WordPair],
    deck_name: &str,
    progress: &ProgressBar,
) -> (Stats, Vec<ProcessingOutcome>) {
    let mut stats = Stats::default();
    let mut results = Vec::with_capacity(pairs.len());

    for pair in pairs {
        let status = if service.card_exists(deck_name, pair.front()) {
            Status::Exists
        } else {
            match service.add_note(deck_name, pair.front(), pair.back()) {
                Ok(()) => Status::Added,
                Err(e) => {
                    progress.println(format!(
                        "{}",
                        format!("❌ Error processing '{}': {}", pair.front(), e).red()
                    ));
                    Status::Error
                }
            }
        };
        debug!(front = pair.front(), ?status, "processed pair");

        stats.record(status);
        results.push(ProcessingOutcome {
            front: pair.front().to_string(),
            back: pair.back().to_string(),
            status,
        });
        progress.inc(1);
    }

    (stats, results)
}
