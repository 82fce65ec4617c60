// src/models/group.rs

use serde::{Deserialize, Serialize};

/// Row of `GET /groups`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub word_count: i64,
}

/// `GET /groups/{id}`. Counters are aggregated server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDetail {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub total_words: i64,
    #[serde(default)]
    pub total_sessions: i64,
    /// Percentage, 0 to 100.
    #[serde(default)]
    pub success_rate: f64,
}
