// Library root
// -----------
// This crate exposes the library surface for the `wb-anki` CLI. The
// binary (`main.rs`) only wires configuration and logging, then hands
// control to `cli::run`.
//
// Module responsibilities:
// - `config`: Environment-driven settings (AnkiConnect URL, timeout,
//   default deck name, debug flag).
// - `error`: Typed errors for input, configuration and the API client.
// - `parser`: Reads raw lines and turns them into word pairs.
// - `api`: Blocking JSON client for the AnkiConnect endpoint and the
//   `DeckService` trait the processing loop talks to.
// - `processing`: Walks the pairs, skips existing cards, inserts the rest.
// - `report`: Renders the outcome table and the summary line.
// - `cli`: Argument parsing and the top-level run.
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod parser;
pub mod processing;
pub mod report;
