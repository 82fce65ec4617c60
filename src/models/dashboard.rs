// src/models/dashboard.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `GET /dashboard/quick_stats`. Recomputed by the backend on every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Percentage of correct reviews, 0 to 100.
    #[serde(default)]
    pub success_rate: f64,
    #[serde(default)]
    pub total_study_sessions: i64,
    #[serde(default)]
    pub total_active_groups: i64,
    /// Consecutive days with at least one session.
    #[serde(default)]
    pub study_streak: i64,
}

/// `GET /dashboard/last_study_session`; the backend answers `null` before any session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastStudySession {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub activity_name: String,
    pub group_id: i64,
    #[serde(default)]
    pub group_name: String,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub correct_count: i64,
    #[serde(default)]
    pub wrong_count: i64,
}

impl LastStudySession {
    /// Share of correct answers in percent; `None` when nothing was reviewed.
    pub fn accuracy(&self) -> Option<f64> {
        let total = self.correct_count + self.wrong_count;
        (total > 0).then(|| self.correct_count as f64 * 100.0 / total as f64)
    }
}

/// `GET /dashboard/study_progress`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyProgress {
    #[serde(default)]
    pub words_studied: i64,
    #[serde(default)]
    pub total_words: i64,
    #[serde(default)]
    pub mastery_percentage: f64,
}
