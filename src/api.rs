// API client module: a small blocking HTTP client for the AnkiConnect
// add-on. Every call is a single POST of `{action, version, params}`
// answered by `{result, error}`.

use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

/// AnkiConnect protocol version sent with every request.
pub const API_VERSION: u8 = 6;
pub const NOTE_MODEL: &str = "Basic (and reversed card)";
pub const NOTE_TAG: &str = "wb_anki";

/// Operations the processing loop needs from a deck backend.
///
/// `AnkiClient` is the real implementation; tests plug in an in-memory
/// one. `create_deck` and `add_note` report failure through their
/// `Result`, which callers have to match.
pub trait DeckService {
    fn deck_names(&self) -> ApiResult<Vec<String>>;
    fn create_deck(&self, deck_name: &str) -> ApiResult<()>;
    fn find_notes(&self, query: &str) -> ApiResult<Vec<u64>>;
    fn add_note(&self, deck_name: &str, front: &str, back: &str) -> ApiResult<()>;

    /// Errors from listing decks propagate.
    fn deck_exists(&self, deck_name: &str) -> ApiResult<bool> {
        Ok(self.deck_names()?.iter().any(|d| d == deck_name))
    }

    /// Whether a note with this exact front already lives in the deck.
    /// A failed lookup counts as "not found" so the pair still gets an
    /// insertion attempt.
    fn card_exists(&self, deck_name: &str, front: &str) -> bool {
        match self.find_notes(&note_query(deck_name, front)) {
            Ok(notes) => !notes.is_empty(),
            Err(e) => {
                debug!(front, error = %e, "existence check failed, treating as missing");
                false
            }
        }
    }
}

/// Request envelope.
#[derive(Serialize, Debug)]
pub struct ApiRequest<'a> {
    pub action: &'a str,
    pub version: u8,
    pub params: Value,
}

/// Response envelope. `error` is non-null when Anki rejected the call.
#[derive(Deserialize, Debug)]
pub struct ApiResponse<T> {
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn into_result(self) -> ApiResult<Option<T>> {
        match self.error {
            Some(msg) => Err(ApiError::Api(msg)),
            None => Ok(self.result),
        }
    }
}

/// Escape a value for use inside a double-quoted Anki search term.
fn quote_term(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Search query matching notes in `deck_name` whose Front is `front`.
pub fn note_query(deck_name: &str, front: &str) -> String {
    format!(
        "deck:\"{}\" Front:\"{}\"",
        quote_term(deck_name),
        quote_term(front)
    )
}

/// `addNote` params for a two-sided note.
pub fn note_params(deck_name: &str, front: &str, back: &str) -> Value {
    json!({
        "note": {
            "deckName": deck_name,
            "modelName": NOTE_MODEL,
            "fields": { "Front": front, "Back": back },
            "options": { "allowDuplicate": false },
            "tags": [NOTE_TAG],
        }
    })
}

/// Blocking AnkiConnect client. One instance holds one keep-alive
/// connection pool for the whole run; dropping it releases the pool.
pub struct AnkiClient {
    client: Client,
    url: String,
}

impl AnkiClient {
    /// Create a client for `config.anki_url` with `config.timeout`.
    pub fn new(config: &Config) -> ApiResult<Self> {
        Self::with_url(&config.anki_url, config.timeout)
    }

    pub fn with_url(url: &str, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Connection(format!("failed to build HTTP client: {e}")))?;
        Ok(AnkiClient {
            client,
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST one action and decode its `result`.
    fn request<T: DeserializeOwned>(&self, action: &str, params: Value) -> ApiResult<Option<T>> {
        let payload = ApiRequest {
            action,
            version: API_VERSION,
            params,
        };
        debug!(action, params = %payload.params, "sending AnkiConnect request");

        let res = self.client.post(&self.url).json(&payload).send()?;
        let status = res.status();
        debug!(action, %status, "AnkiConnect responded");
        if !status.is_success() {
            let txt = res.text().unwrap_or_default();
            return Err(ApiError::Api(format!("{} - {}", status, txt)));
        }
        let body: ApiResponse<T> = res
            .json()
            .map_err(|e| ApiError::Api(format!("invalid response to {action}: {e}")))?;
        body.into_result()
    }
}

impl DeckService for AnkiClient {
    fn deck_names(&self) -> ApiResult<Vec<String>> {
        Ok(self
            .request::<Vec<String>>("deckNames", json!({}))?
            .unwrap_or_default())
    }

    fn create_deck(&self, deck_name: &str) -> ApiResult<()> {
        self.request::<Value>("createDeck", json!({ "deck": deck_name }))
            .map(|_| ())
    }

    fn find_notes(&self, query: &str) -> ApiResult<Vec<u64>> {
        Ok(self
            .request::<Vec<u64>>("findNotes", json!({ "query": query }))?
            .unwrap_or_default())
    }

    fn add_note(&self, deck_name: &str, front: &str, back: &str) -> ApiResult<()> {
        self.request::<Value>("addNote", note_params(deck_name, front, back))
            .map(|_| ())
    }
}

impl Drop for AnkiClient {
    fn drop(&mut self) {
        debug!(url = %self.url, "releasing AnkiConnect client");
    }
}
