mod common;

use clap::Parser;
use common::{unreachable_url, StubServer};
use serde_json::json;
use std::cell::RefCell;
use std::io::Write;
use tempfile::NamedTempFile;
use wb_anki::api::{note_query, DeckService};
use wb_anki::cli::{run, run_with, Args};
use wb_anki::config::Config;
use wb_anki::error::{ApiError, ApiResult};
use wb_anki::processing::Stats;

const INPUT: [&str; 5] = ["hello - hej", "goodbye -- hej då", "", "bad line", "x - "];

/// In-memory deck backend that records every call it receives.
#[derive(Default)]
struct MemoryAnki {
    decks: RefCell<Vec<String>>,
    notes: RefCell<Vec<(String, String, String)>>,
    fail_create: bool,
    fail_insert: bool,
    calls: RefCell<Vec<String>>,
}

impl MemoryAnki {
    fn with_note(self, deck: &str, front: &str, back: &str) -> Self {
        self.notes
            .borrow_mut()
            .push((deck.into(), front.into(), back.into()));
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl DeckService for MemoryAnki {
    fn deck_names(&self) -> ApiResult<Vec<String>> {
        self.calls.borrow_mut().push("deckNames".into());
        Ok(self.decks.borrow().clone())
    }

    fn create_deck(&self, deck_name: &str) -> ApiResult<()> {
        self.calls.borrow_mut().push("createDeck".into());
        if self.fail_create {
            return Err(ApiError::Api("collection is not available".into()));
        }
        self.decks.borrow_mut().push(deck_name.into());
        Ok(())
    }

    fn find_notes(&self, query: &str) -> ApiResult<Vec<u64>> {
        self.calls.borrow_mut().push("findNotes".into());
        let hits = self
            .notes
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, (deck, front, _))| note_query(deck, front) == query)
            .map(|(i, _)| i as u64)
            .collect();
        Ok(hits)
    }

    fn add_note(&self, deck_name: &str, front: &str, back: &str) -> ApiResult<()> {
        self.calls.borrow_mut().push("addNote".into());
        if self.fail_insert {
            return Err(ApiError::Api("model was not found".into()));
        }
        self.notes
            .borrow_mut()
            .push((deck_name.into(), front.into(), back.into()));
        Ok(())
    }
}

fn lines() -> Vec<String> {
    INPUT.iter().map(|s| s.to_string()).collect()
}

fn args(extra: &[&str]) -> Args {
    let mut argv = vec!["wb-anki", "--deck-name", "Swedish"];
    argv.extend_from_slice(extra);
    Args::try_parse_from(argv).unwrap()
}

#[test]
fn creates_deck_and_adds_all_pairs() {
    let anki = MemoryAnki::default();
    let stats = run_with(&anki, &lines(), &args(&[])).unwrap();

    assert_eq!(
        stats,
        Stats {
            added: 2,
            exists: 0,
            error: 0
        }
    );
    assert_eq!(anki.decks.borrow().as_slice(), ["Swedish".to_string()]);
    let notes = anki.notes.borrow();
    assert_eq!(notes[0], ("Swedish".into(), "hello".into(), "hej".into()));
    assert_eq!(notes[1], ("Swedish".into(), "goodbye".into(), "hej då".into()));
}

#[test]
fn existing_card_is_not_inserted_again() {
    let anki = MemoryAnki::default().with_note("Swedish", "hello", "hej");
    anki.decks.borrow_mut().push("Swedish".into());

    let stats = run_with(&anki, &lines(), &args(&[])).unwrap();
    assert_eq!(
        stats,
        Stats {
            added: 1,
            exists: 1,
            error: 0
        }
    );
    assert!(!anki.calls().contains(&"createDeck".to_string()));
}

#[test]
fn rerun_is_idempotent() {
    let anki = MemoryAnki::default();
    run_with(&anki, &lines(), &args(&[])).unwrap();
    let second = run_with(&anki, &lines(), &args(&[])).unwrap();
    assert_eq!(
        second,
        Stats {
            added: 0,
            exists: 2,
            error: 0
        }
    );
}

#[test]
fn missing_deck_without_create_aborts_before_processing() {
    let anki = MemoryAnki::default();
    let err = run_with(&anki, &lines(), &args(&["--no-create-deck"])).unwrap_err();
    assert!(err.to_string().contains("does not exist"));
    assert_eq!(anki.calls(), vec!["deckNames".to_string()]);
}

#[test]
fn failed_deck_creation_aborts() {
    let anki = MemoryAnki {
        fail_create: true,
        ..MemoryAnki::default()
    };
    let err = run_with(&anki, &lines(), &args(&[])).unwrap_err();
    assert!(err.to_string().contains("Failed to create deck"));
    assert!(anki.notes.borrow().is_empty());
}

#[test]
fn no_valid_pairs_aborts_without_network() {
    let anki = MemoryAnki::default();
    let input = vec!["bad line".to_string(), "".to_string(), "x - ".to_string()];
    let err = run_with(&anki, &input, &args(&[])).unwrap_err();
    assert!(err.to_string().contains("No valid word pairs"));
    assert!(anki.calls().is_empty());
}

#[test]
fn insert_failures_make_the_run_fail() {
    let anki = MemoryAnki {
        fail_insert: true,
        ..MemoryAnki::default()
    };
    let err = run_with(&anki, &lines(), &args(&[])).unwrap_err();
    assert!(err.to_string().contains("2 word pair(s)"));
    let inserts = anki.calls().iter().filter(|c| *c == "addNote").count();
    assert_eq!(inserts, 2);
}

#[test]
fn unreachable_service_aborts_the_run() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", INPUT.join("\n")).unwrap();
    let path = file.path().to_str().unwrap().to_string();
    let url = unreachable_url();

    let args = args(&["--file", &path, "--anki-url", &url]);
    let err = run(&args, &Config::default()).unwrap_err();
    assert!(err.to_string().starts_with("Error connecting to Anki"));
}

#[test]
fn missing_input_file_aborts_before_network() {
    let args = args(&["--file", "/no/such/vocabulary.txt"]);
    let err = run(&args, &Config::default()).unwrap_err();
    assert!(err.to_string().contains("File not found"));
}

#[test]
fn full_run_against_http_stub() {
    let stub = StubServer::start(vec![
        StubServer::ok(json!(["Default"])),
        StubServer::ok(json!(1)),
        StubServer::ok(json!([])),
        StubServer::ok(json!(101)),
        StubServer::ok(json!([])),
        StubServer::ok(json!(102)),
    ]);
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", INPUT.join("\n")).unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let args = args(&["--file", &path, "--anki-url", &stub.url]);
    let stats = run(&args, &Config::default()).unwrap();
    assert_eq!(stats.added, 2);

    let actions: Vec<String> = stub
        .requests()
        .iter()
        .map(|r| r["action"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(
        actions,
        ["deckNames", "createDeck", "findNotes", "addNote", "findNotes", "addNote"]
    );
}
