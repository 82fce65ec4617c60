// src/portal/generate.rs

//! Client side of the vocabulary generator service.

use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;

use crate::{
    models::vocabulary::GenerateRequest,
    portal::client::ClientError,
};

/// Shown when generation fails for any reason.
pub const GENERATION_FAILED: &str = "Failed to generate vocabulary. Please try again.";

#[derive(Debug, Clone)]
pub struct GeneratorClient {
    http: Client,
    endpoint: Url,
}

impl GeneratorClient {
    /// `base_url` is the service root, e.g. `http://localhost:3001`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let raw = format!("{}/api/generate", base_url.trim().trim_end_matches('/'));
        let endpoint = raw.parse::<Url>().map_err(|_| ClientError::InvalidUrl(raw))?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoint })
    }

    /// Requests a vocabulary list for `category`. The result is the JSON the
    /// service returned, unchecked.
    pub async fn generate(&self, category: &str) -> Result<Value, ClientError> {
        tracing::info!(category, "Requesting vocabulary");
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&GenerateRequest {
                category: category.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "Generation failed");
            return Err(ClientError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|source| ClientError::Decode {
            path: self.endpoint.path().to_string(),
            source,
        })
    }
}
