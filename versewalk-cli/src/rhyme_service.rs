//! Datamuse rhyme lookup
//!
//! Queries perfect rhymes (`rel_rhy`) and, optionally, near rhymes
//! (`rel_nry`). Perfect rhymes come first in the answer.

use crate::config::RhymesConfig;
use anyhow::{Context, Result};
use log::trace;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use versewalk_api::{LookupError, RhymeLookup};

#[derive(Debug, Deserialize)]
struct DatamuseWord {
    word: String,
}

/// Rhyme lookup backed by the Datamuse words API
pub struct DatamuseClient {
    client: Client,
    base_url: String,
    near_rhymes: bool,
    max_results: usize,
}

impl std::fmt::Debug for DatamuseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatamuseClient")
            .field("base_url", &self.base_url)
            .field("near_rhymes", &self.near_rhymes)
            .finish()
    }
}

impl DatamuseClient {
    /// Create a client from the `[rhymes]` settings
    pub fn new(settings: &RhymesConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(concat!("versewalk/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: settings.service_url.clone(),
            near_rhymes: settings.near_rhymes,
            max_results: settings.max_results,
        })
    }

    fn fetch(&self, relation: &str, word: &str) -> std::result::Result<Vec<String>, LookupError> {
        let max = self.max_results.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[(relation, word), ("max", max.as_str())])
            .send()
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Transport(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .map_err(|e| LookupError::Transport(e.to_string()))?;
        let words = parse_words(&body)?;
        trace!("{relation}={word}: {} candidates", words.len());
        Ok(words)
    }
}

/// Single-word candidates from a Datamuse JSON answer, in answer order
pub fn parse_words(body: &str) -> std::result::Result<Vec<String>, LookupError> {
    let entries: Vec<DatamuseWord> =
        serde_json::from_str(body).map_err(|e| LookupError::InvalidResponse(e.to_string()))?;

    Ok(entries
        .into_iter()
        .map(|entry| entry.word)
        .filter(|word| !word.contains(' '))
        .collect())
}

impl RhymeLookup for DatamuseClient {
    fn query(&self, word: &str) -> std::result::Result<Vec<String>, LookupError> {
        let mut rhymes = self.fetch("rel_rhy", word)?;
        if self.near_rhymes {
            for near in self.fetch("rel_nry", word)? {
                if !rhymes.contains(&near) {
                    rhymes.push(near);
                }
            }
        }
        Ok(rhymes)
    }

    fn name(&self) -> &'static str {
        "datamuse"
    }
}
