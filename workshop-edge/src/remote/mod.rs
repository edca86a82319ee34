//! Remote records feed
//!
//! One read-only endpoint: `GET {base}/data/Records.json`, a JSON array of
//! records in the same loose shape as local data. [`RecordsClient::fetch_records`]
//! never fails; anything wrong is logged and reads as an empty list.

use serde_json::Value;
use shared::models::Record;
use std::time::Duration;
use thiserror::Error;

pub const RECORDS_PATH: &str = "/data/Records.json";

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {0}")]
    Status(reqwest::StatusCode),

    #[error("Invalid response: {0}")]
    InvalidBody(#[from] serde_json::Error),
}

pub type RemoteResult<T> = Result<T, RemoteError>;

#[derive(Clone)]
pub struct RecordsClient {
    http: reqwest::Client,
    base_url: String,
}

impl RecordsClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> RemoteResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self) -> String {
        format!("{}{}", self.base_url, RECORDS_PATH)
    }

    /// Fetch and parse the feed; failures read as an empty list
    pub async fn fetch_records(&self) -> Vec<Record> {
        match self.try_fetch_records().await {
            Ok(records) => {
                tracing::info!(count = records.len(), "Fetched remote records");
                records
            }
            Err(e) => {
                tracing::warn!(url = %self.url(), error = %e, "Failed to load remote records");
                Vec::new()
            }
        }
    }

    /// Like [`RecordsClient::fetch_records`], with the failure kept.
    ///
    /// Individual elements that do not parse as records are skipped.
    pub async fn try_fetch_records(&self) -> RemoteResult<Vec<Record>> {
        let resp = self.http.get(self.url()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status));
        }
        let body = resp.bytes().await?;
        let items: Vec<Value> = serde_json::from_slice(&body)?;
        Ok(parse_records(items))
    }
}

fn parse_records(items: Vec<Value>) -> Vec<Record> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<Record>(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping malformed remote record");
                None
            }
        })
        .collect()
}
