//! HTTP client for the remote donation service
//!
//! The server owns all donation records; this module is the only place that
//! talks to it. "Not found" on a lookup is an empty success, not an error.

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::Config;
use crate::models::{Donation, DonationDraft};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server returned {0}")]
    Status(StatusCode),
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

pub struct DonationApi {
    client: reqwest::Client,
    base_url: String,
}

impl DonationApi {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("alms/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.server_url.trim_end_matches('/').to_string(),
        })
    }

    /// POST the draft; the server assigns the row key and echoes the record
    pub async fn create(&self, draft: &DonationDraft) -> Result<Donation, ApiError> {
        let url = format!("{}/donations", self.base_url);
        let resp = self.client.post(&url).json(draft).send().await?;

        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// GET a single donation by its lookup key
    ///
    /// Returns `Ok(None)` for 404 and for empty/`null` bodies.
    pub async fn fetch(&self, donation_id: &str) -> Result<Option<Donation>, ApiError> {
        let url = format!("{}/donations/{}", self.base_url, donation_id);
        let resp = self.client.get(&url).send().await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }

        let body = resp.text().await?;
        if body.trim().is_empty() || body.trim() == "null" {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&body)?))
    }

    /// PUT the full record at the resolved identifier
    pub async fn update(&self, identifier: &str, donation: &Donation) -> Result<(), ApiError> {
        let url = format!("{}/donations/{}", self.base_url, identifier);
        let resp = self.client.put(&url).json(donation).send().await?;

        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let url = format!("{}/donations/{}", self.base_url, id);
        let resp = self.client.delete(&url).send().await?;

        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }
        Ok(())
    }
}
