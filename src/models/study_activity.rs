// src/models/study_activity.rs

use serde::{Deserialize, Serialize};

/// A launchable study activity template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyActivity {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Thumbnail image URL.
    #[serde(default)]
    pub thumbnail: String,
    /// Where the activity itself is hosted; opened externally on launch.
    pub url: String,
}

/// Body of `POST /study_activities`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchRequest {
    pub activity_id: i64,
    pub group_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchResponse {
    pub study_session_id: i64,
}
