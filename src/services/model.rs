// src/services/model.rs

use std::fmt;

use async_trait::async_trait;

/// A hosted text-generation model: prompt in, free text out.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, ModelError>;
}

#[derive(Debug)]
pub enum ModelError {
    /// Region or credential pair missing from the environment.
    NotConfigured(&'static str),

    /// Request could not be signed with the configured credentials.
    Signing(String),

    /// Network or TLS failure talking to the provider.
    Request(reqwest::Error),

    /// Provider answered with a non-2xx status.
    HttpStatus { status: reqwest::StatusCode, body: String },

    /// Provider body did not have the expected envelope.
    Decode(serde_json::Error),

    /// Envelope was valid but carried no text block.
    EmptyReply,
}

impl ModelError {
    pub fn kind(&self) -> &'static str {
        match self {
            ModelError::NotConfigured(_) => "not_configured",
            ModelError::Signing(_) => "signing",
            ModelError::Request(_) => "request",
            ModelError::HttpStatus { .. } => "http_status",
            ModelError::Decode(_) => "decode",
            ModelError::EmptyReply => "empty_reply",
        }
    }
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::NotConfigured(key) => write!(f, "model provider not configured: {} is not set", key),
            ModelError::Signing(msg) => write!(f, "model request could not be signed: {}", msg),
            ModelError::Request(err) => write!(f, "model request failed: {}", err),
            ModelError::HttpStatus { status, body } => {
                write!(f, "model provider returned HTTP {}: {}", status, body)
            }
            ModelError::Decode(err) => write!(f, "model response could not be decoded: {}", err),
            ModelError::EmptyReply => write!(f, "model response contained no text"),
        }
    }
}

impl std::error::Error for ModelError {}

impl From<reqwest::Error> for ModelError {
    fn from(err: reqwest::Error) -> Self {
        ModelError::Request(err)
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Decode(err)
    }
}
