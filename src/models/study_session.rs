// src/models/study_session.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded practice run of one group through one activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: i64,
    #[serde(default)]
    pub activity_id: Option<i64>,
    #[serde(default)]
    pub activity_name: String,
    #[serde(default)]
    pub group_id: Option<i64>,
    #[serde(default)]
    pub group_name: String,
    pub start_time: DateTime<Utc>,
    /// Absent while the session is still running.
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub review_item_count: i64,
}

/// Per-word result recorded in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordReviewItem {
    pub word_id: i64,
    pub correct: bool,
}

impl WordReviewItem {
    pub fn label(&self) -> &'static str {
        if self.correct { "Correct" } else { "Wrong" }
    }
}

/// Row of `GET /study_sessions/{id}/words`: the reviewed word with its result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionWord {
    pub id: i64,
    pub spanish: String,
    pub transliteration: String,
    pub arabic: String,
    pub correct: bool,
}

impl SessionWord {
    pub fn review(&self) -> WordReviewItem {
        WordReviewItem {
            word_id: self.id,
            correct: self.correct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_session_has_no_end_time() {
        let session: StudySession = serde_json::from_str(
            r#"{"id":4,"activityName":"Flashcards","groupId":2,"groupName":"Food","startTime":"2025-02-10T09:30:00Z","reviewItemCount":0}"#,
        )
        .unwrap();
        assert_eq!(session.group_id, Some(2));
        assert!(session.end_time.is_none());
    }

    #[test]
    fn session_word_carries_its_review_result() {
        let word: SessionWord = serde_json::from_str(
            r#"{"id":7,"spanish":"agua","transliteration":"maa","arabic":"ماء","correct":false}"#,
        )
        .unwrap();
        let review = word.review();
        assert_eq!(review, WordReviewItem { word_id: 7, correct: false });
        assert_eq!(review.label(), "Wrong");
    }
}
