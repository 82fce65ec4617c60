// src/portal/client.rs

//! Typed wrapper over the portal REST backend: one method per endpoint.

use std::fmt;
use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::{Serialize, de::DeserializeOwned};

use crate::models::{
    dashboard::{DashboardStats, LastStudySession, StudyProgress},
    group::{Group, GroupDetail},
    study_activity::{LaunchRequest, LaunchResponse, StudyActivity},
    study_session::{SessionWord, StudySession},
    word::Word,
};

/// Failures of a backend call. An empty list is not an error.
#[derive(Debug)]
pub enum ClientError {
    /// Base URL or path could not form a valid URL.
    InvalidUrl(String),

    /// Connection, TLS or timeout failure.
    Transport(reqwest::Error),

    /// Backend answered with a non-2xx status.
    Status { status: StatusCode, body: String },

    /// Body did not match the expected shape.
    Decode { path: String, source: serde_json::Error },

    /// A cached entry was read back as a different type than it was stored with.
    CacheType(&'static str),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(err) => err.status(),
            _ => None,
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::InvalidUrl(url) => write!(f, "invalid URL '{}'", url),
            ClientError::Transport(err) => write!(f, "request failed: {}", err),
            ClientError::Status { status, body } if body.trim().is_empty() => {
                write!(f, "server returned {}", status)
            }
            ClientError::Status { status, body } => write!(f, "server returned {}: {}", status, body.trim()),
            ClientError::Decode { path, source } => write!(f, "unexpected response from {}: {}", path, source),
            ClientError::CacheType(resource) => write!(f, "cached '{}' entry has an unexpected type", resource),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Transport(err) => Some(err),
            ClientError::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err)
    }
}

/// Client for the portal backend rooted at e.g. `http://localhost:3000/api`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = parse_base_url(base_url)?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        let raw = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        raw.parse::<Url>().map_err(|_| ClientError::InvalidUrl(raw))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, page: Option<u32>) -> Result<T, ClientError> {
        let url = self.endpoint(path)?;
        let mut request = self.http.get(url);
        if let Some(page) = page {
            request = request.query(&[("page", page)]);
        }
        tracing::debug!(path, ?page, "GET");
        let response = request.send().await?;
        decode(path, response).await
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, ClientError> {
        let url = self.endpoint(path)?;
        let mut request = self.http.post(url);
        if let Some(body) = body {
            request = request.json(body);
        }
        tracing::debug!(path, "POST");
        let response = request.send().await?;
        check_status(response).await
    }

    pub async fn dashboard_last_study_session(&self) -> Result<Option<LastStudySession>, ClientError> {
        self.get("/dashboard/last_study_session", None).await
    }

    pub async fn dashboard_study_progress(&self) -> Result<StudyProgress, ClientError> {
        self.get("/dashboard/study_progress", None).await
    }

    pub async fn dashboard_quick_stats(&self) -> Result<DashboardStats, ClientError> {
        self.get("/dashboard/quick_stats", None).await
    }

    pub async fn study_activities(&self) -> Result<Vec<StudyActivity>, ClientError> {
        self.get("/study_activities", None).await
    }

    pub async fn study_activity(&self, id: i64) -> Result<StudyActivity, ClientError> {
        self.get(&format!("/study_activities/{}", id), None).await
    }

    pub async fn study_activity_sessions(&self, id: i64) -> Result<Vec<StudySession>, ClientError> {
        self.get(&format!("/study_activities/{}/study_sessions", id), None)
            .await
    }

    /// Starts a study session for `group_id` through `activity_id`.
    pub async fn launch_study_activity(&self, request: &LaunchRequest) -> Result<LaunchResponse, ClientError> {
        let path = "/study_activities";
        let response = self.post(path, Some(request)).await?;
        decode(path, response).await
    }

    pub async fn words(&self, page: u32) -> Result<Vec<Word>, ClientError> {
        self.get("/words", Some(page)).await
    }

    pub async fn word(&self, id: i64) -> Result<Word, ClientError> {
        self.get(&format!("/words/{}", id), None).await
    }

    pub async fn groups(&self, page: u32) -> Result<Vec<Group>, ClientError> {
        self.get("/groups", Some(page)).await
    }

    pub async fn group(&self, id: i64) -> Result<GroupDetail, ClientError> {
        self.get(&format!("/groups/{}", id), None).await
    }

    pub async fn group_words(&self, id: i64, page: u32) -> Result<Vec<Word>, ClientError> {
        self.get(&format!("/groups/{}/words", id), Some(page)).await
    }

    pub async fn group_study_sessions(&self, id: i64, page: u32) -> Result<Vec<StudySession>, ClientError> {
        self.get(&format!("/groups/{}/study_sessions", id), Some(page))
            .await
    }

    pub async fn study_sessions(&self, page: u32) -> Result<Vec<StudySession>, ClientError> {
        self.get("/study_sessions", Some(page)).await
    }

    pub async fn study_session(&self, id: i64) -> Result<StudySession, ClientError> {
        self.get(&format!("/study_sessions/{}", id), None).await
    }

    pub async fn study_session_words(&self, id: i64, page: u32) -> Result<Vec<SessionWord>, ClientError> {
        self.get(&format!("/study_sessions/{}/words", id), Some(page))
            .await
    }

    /// Deletes study sessions and word review items. Destructive.
    pub async fn reset_history(&self) -> Result<(), ClientError> {
        self.post::<()>("/reset_history", None).await.map(|_| ())
    }

    /// Deletes all data and reloads the seed data. Destructive.
    pub async fn full_reset(&self) -> Result<(), ClientError> {
        self.post::<()>("/full_reset", None).await.map(|_| ())
    }
}

fn parse_base_url(input: &str) -> Result<Url, ClientError> {
    input
        .trim()
        .parse::<Url>()
        .map_err(|_| ClientError::InvalidUrl(input.to_string()))
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::warn!(%status, "Backend request failed");
    Err(ClientError::Status { status, body })
}

async fn decode<T: DeserializeOwned>(path: &str, response: reqwest::Response) -> Result<T, ClientError> {
    let response = check_status(response).await?;
    let bytes = response.bytes().await?;
    // An empty body reads as `null`, so optional resources come back as `None`.
    let slice: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        &bytes
    };
    serde_json::from_slice(slice).map_err(|source| ClientError::Decode {
        path: path.to_string(),
        source,
    })
}
