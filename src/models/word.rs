// src/models/word.rs

use serde::{Deserialize, Serialize};

/// A vocabulary word as served by `GET /words` and `GET /words/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub id: i64,
    pub spanish: String,
    pub transliteration: String,
    pub arabic: String,

    #[serde(default)]
    pub correct_count: i64,

    #[serde(default)]
    pub wrong_count: i64,

    /// Groups the word belongs to. Only populated by the detail endpoint.
    #[serde(default)]
    pub groups: Vec<GroupRef>,
}

/// Minimal reference to a group, used for badges linking to the group page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRef {
    pub id: i64,
    pub name: String,
}
