// Final report: a plain-text table of per-pair outcomes plus a one-line
// summary. Rendering is kept separate from printing so it can be tested.

use crate::processing::{ProcessingOutcome, Stats, Status};
use crossterm::style::Stylize;

const HEADERS: [&str; 3] = ["Word", "Translation", "Status"];

pub fn status_label(status: Status) -> &'static str {
    match status {
        Status::Added => "✅ Added",
        Status::Exists => "☑️ Exists",
        Status::Error => "❌ Error",
    }
}

fn width(text: &str) -> usize {
    text.chars().count()
}

fn pad(text: &str, to: usize) -> String {
    let mut out = text.to_string();
    out.extend(std::iter::repeat(' ').take(to.saturating_sub(width(text))));
    out
}

/// Render outcomes as a bordered table, one row per outcome in order.
pub fn render_table(results: &[ProcessingOutcome]) -> String {
    let rows: Vec<[&str; 3]> = results
        .iter()
        .map(|r| [r.front.as_str(), r.back.as_str(), status_label(r.status)])
        .collect();

    let mut widths = HEADERS.map(width);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(width(cell));
        }
    }

    let rule = {
        let parts: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
        format!("+{}+", parts.join("+"))
    };
    let line = |cells: &[&str; 3]| {
        let parts: Vec<String> = cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, w)| format!(" {} ", pad(cell, *w)))
            .collect();
        format!("|{}|", parts.join("|"))
    };

    let mut out = String::new();
    out.push_str("Processing Results\n");
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&line(&HEADERS));
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    for row in &rows {
        out.push_str(&line(row));
        out.push('\n');
    }
    out.push_str(&rule);
    out
}

pub fn summary_line(stats: &Stats) -> String {
    format!(
        "Summary: {} added, {} already existed, {} failed",
        stats.added, stats.exists, stats.error
    )
}

pub fn print_report(stats: &Stats, results: &[ProcessingOutcome]) {
    println!("\n{}\n", "Processing complete!".green().bold());
    if !results.is_empty() {
        println!("{}", render_table(results));
    }
    println!("\n{}", summary_line(stats).bold());
}
