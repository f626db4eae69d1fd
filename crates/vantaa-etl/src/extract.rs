// Source Feed Extraction

use crate::config::EtlConfig;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::info;
use vantaa_common::{EtlError, Result};

/// A single record as received from the feed, raw field names intact.
///
/// The raw stage is deliberately schema-free: a key may be absent, null,
/// or carry any JSON scalar. `value` and `has_column` keep those three
/// states distinguishable for the transform stage.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRecord(pub Map<String, Value>);

impl RawRecord {
    /// Value of a raw column, if the column is present at all
    pub fn value(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    /// Whether the raw column is present (possibly with a null value)
    pub fn has_column(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    /// Column names in the order provided by the source
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<'a, const N: usize> From<[(&'a str, Value); N]> for RawRecord {
    fn from(fields: [(&'a str, Value); N]) -> Self {
        RawRecord(
            fields
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }
}

/// HTTP client for the job postings feed
pub struct Extractor {
    client: Client,
    config: EtlConfig,
}

impl Extractor {
    /// Create a new extractor with configuration
    pub fn new(config: EtlConfig) -> Result<Self> {
        config.validate().map_err(EtlError::Validation)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("vantaa-etl/0.1")
            .build()?;

        Ok(Extractor { client, config })
    }

    /// Fetch the current postings as raw records.
    ///
    /// One GET, no retry. A non-success status, an unreachable host, a
    /// timeout, and a non-JSON-array body each surface as their own error
    /// variant; retry policy belongs to the caller.
    pub async fn fetch(&self) -> Result<Vec<RawRecord>> {
        info!("Fetching job postings from: {}", self.config.api_url);

        let response = self
            .client
            .get(&self.config.api_url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EtlError::Status {
                status: status.as_u16(),
                url: self.config.api_url.clone(),
            });
        }

        let body = response.text().await?;
        let records: Vec<RawRecord> = serde_json::from_str(&body)?;

        info!("Fetched {} raw records", records.len());

        Ok(records)
    }

    /// Get configuration
    pub fn config(&self) -> &EtlConfig {
        &self.config
    }
}

// ============================================================================
// Tests
// ============================================================================
