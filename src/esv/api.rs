//! Client for the ESV passage text API.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::error::{Error, Result};

const API_URL: &str = "https://api.esv.org/v3/passage/text/";

/// Plain-text options: no headings, footnotes, verse numbers, copyright,
/// or passage references, and zero indentation.
const TEXT_OPTIONS: &[(&str, &str)] = &[
    ("include-headings", "false"),
    ("include-footnotes", "false"),
    ("include-verse-numbers", "false"),
    ("include-short-copyright", "false"),
    ("include-passage-references", "false"),
    ("indent-paragraphs", "0"),
    ("indent-poetry", "false"),
    ("indent-declares", "0"),
    ("indent-psalm-doxology", "0"),
];

/// Client for the ESV API.
#[derive(Clone)]
pub struct EsvClient {
    api_key: String,
    client: Client,
}

impl EsvClient {
    /// Create a client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Fetch the plain text of one passage.
    ///
    /// Returns the joined, trimmed passage text; an unknown reference
    /// yields an empty string, which callers treat as a failed fetch.
    pub async fn fetch_passage(&self, reference: &str) -> Result<String> {
        let resp = self
            .client
            .get(API_URL)
            .header("Authorization", format!("Token {}", self.api_key))
            .query(&[("q", reference)])
            .query(TEXT_OPTIONS)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request for {reference} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::esv_status(
                format!("Request for {reference} returned {status}"),
                status.as_u16(),
            ));
        }

        let json: Value = resp
            .json()
            .await
            .map_err(|e| Error::parse(format!("Invalid JSON for {reference}: {e}"), None))?;

        let text = json["passages"]
            .as_array()
            .map(|passages| {
                passages
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<String>()
            })
            .unwrap_or_default();

        Ok(text.trim().to_string())
    }
}
