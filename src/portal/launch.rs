// src/portal/launch.rs

//! Launching a study activity for a chosen group.

use std::fmt;

use crate::{
    models::study_activity::{LaunchRequest, StudyActivity},
    portal::{client::ApiClient, client::ClientError, nav::Route},
};

/// Opens a launched activity outside the portal.
pub trait ExternalOpener: Send + Sync {
    fn open(&self, url: &str);
}

/// Prints the activity URL for the user to open.
pub struct TerminalOpener;

impl ExternalOpener for TerminalOpener {
    fn open(&self, url: &str) {
        println!("Open the activity in your browser: {}", url);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchState {
    /// No group chosen; launching is disabled.
    Idle,
    Ready { group_id: i64 },
    Launched { session_id: i64 },
}

#[derive(Debug)]
pub enum LaunchError {
    NoGroupSelected,
    Request(ClientError),
}

impl LaunchError {
    /// Text of the notification shown to the user.
    pub fn notice(&self) -> &'static str {
        match self {
            LaunchError::NoGroupSelected => "Please select a group",
            LaunchError::Request(_) => "Failed to launch activity",
        }
    }
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchError::NoGroupSelected => f.write_str("no group selected"),
            LaunchError::Request(err) => write!(f, "launch request failed: {}", err),
        }
    }
}

impl std::error::Error for LaunchError {}

/// Result of a successful launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launched {
    pub session_id: i64,
    /// Where the portal navigates next.
    pub route: Route,
}

/// Launch state of one launch page view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchFlow {
    activity_id: i64,
    state: LaunchState,
}

impl LaunchFlow {
    pub fn new(activity_id: i64) -> Self {
        Self {
            activity_id,
            state: LaunchState::Idle,
        }
    }

    pub fn activity_id(&self) -> i64 {
        self.activity_id
    }

    pub fn state(&self) -> LaunchState {
        self.state
    }

    pub fn selected_group(&self) -> Option<i64> {
        match self.state {
            LaunchState::Ready { group_id } => Some(group_id),
            _ => None,
        }
    }

    /// Chooses a group, or clears the choice with `None`.
    pub fn select(&mut self, group_id: Option<i64>) {
        self.state = match group_id {
            Some(group_id) => LaunchState::Ready { group_id },
            None => LaunchState::Idle,
        };
    }

    /// The launch button is enabled only while a group is chosen.
    pub fn can_launch(&self) -> bool {
        matches!(self.state, LaunchState::Ready { .. })
    }

    /// Creates the study session, opens the activity and returns the session route.
    ///
    /// On failure the flow stays where it was so the user can try again.
    pub async fn launch(
        &mut self,
        client: &ApiClient,
        activity: &StudyActivity,
        opener: &dyn ExternalOpener,
    ) -> Result<Launched, LaunchError> {
        let group_id = self.selected_group().ok_or(LaunchError::NoGroupSelected)?;

        let response = client
            .launch_study_activity(&LaunchRequest {
                activity_id: self.activity_id,
                group_id,
            })
            .await
            .map_err(|err| {
                tracing::warn!(activity_id = self.activity_id, group_id, "Launch failed: {}", err);
                LaunchError::Request(err)
            })?;

        let session_id = response.study_session_id;
        tracing::info!(activity_id = self.activity_id, group_id, session_id, "Activity launched");

        opener.open(&activity.url);
        self.state = LaunchState::Launched { session_id };

        Ok(Launched {
            session_id,
            route: Route::StudySession(session_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingOpener(Mutex<Vec<String>>);

    impl ExternalOpener for RecordingOpener {
        fn open(&self, url: &str) {
            self.0.lock().unwrap().push(url.to_string());
        }
    }

    fn activity() -> StudyActivity {
        StudyActivity {
            id: 1,
            name: "Flashcards".to_string(),
            description: String::new(),
            thumbnail: String::new(),
            url: "http://localhost:8080/flashcards".to_string(),
        }
    }

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&format!("{}/api", server.base_url()), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn selecting_and_deselecting_toggles_launch() {
        let mut flow = LaunchFlow::new(1);
        assert!(!flow.can_launch());

        flow.select(Some(3));
        assert!(flow.can_launch());
        assert_eq!(flow.state(), LaunchState::Ready { group_id: 3 });

        flow.select(None);
        assert!(!flow.can_launch());
        assert_eq!(flow.state(), LaunchState::Idle);
    }

    #[tokio::test]
    async fn launching_without_group_is_refused() {
        // No backend: a request would fail as a transport error instead.
        let client = ApiClient::new("http://127.0.0.1:9/api", Duration::from_secs(1)).unwrap();
        let opener = RecordingOpener::default();
        let mut flow = LaunchFlow::new(1);

        let err = flow.launch(&client, &activity(), &opener).await.unwrap_err();

        assert!(matches!(err, LaunchError::NoGroupSelected));
        assert_eq!(err.notice(), "Please select a group");
        assert!(opener.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn successful_launch_opens_activity_and_routes_to_session() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/study_activities")
                .json_body(json!({ "activityId": 1, "groupId": 3 }));
            then.status(201).json_body(json!({ "studySessionId": 12 }));
        });
        let opener = RecordingOpener::default();
        let mut flow = LaunchFlow::new(1);
        flow.select(Some(3));

        let launched = flow.launch(&client_for(&server), &activity(), &opener).await.unwrap();

        mock.assert();
        assert_eq!(launched.route, Route::StudySession(12));
        assert_eq!(flow.state(), LaunchState::Launched { session_id: 12 });
        assert_eq!(*opener.0.lock().unwrap(), vec!["http://localhost:8080/flashcards".to_string()]);
    }

    #[tokio::test]
    async fn failed_launch_stays_ready() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/study_activities");
            then.status(500);
        });
        let opener = RecordingOpener::default();
        let mut flow = LaunchFlow::new(1);
        flow.select(Some(3));

        let err = flow.launch(&client_for(&server), &activity(), &opener).await.unwrap_err();

        assert_eq!(err.notice(), "Failed to launch activity");
        assert_eq!(flow.state(), LaunchState::Ready { group_id: 3 });
        assert!(opener.0.lock().unwrap().is_empty());
    }
}
