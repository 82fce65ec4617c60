// src/portal/nav.rs

//! Route table and sidebar of the portal.

use std::fmt;

/// A client-side location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    StudyActivities,
    StudyActivity(i64),
    LaunchActivity(i64),
    Words,
    Word(i64),
    Groups,
    Group(i64),
    StudySessions,
    StudySession(i64),
    Settings,
    NotFound(String),
}

impl Route {
    /// Resolves a path such as `/groups/3`. Query strings, fragments and a
    /// trailing slash are ignored; `:id` must be a positive integer.
    pub fn parse(path: &str) -> Route {
        let trimmed = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] | ["dashboard"] => Some(Route::Dashboard),
            ["study-activities"] => Some(Route::StudyActivities),
            ["study-activities", id] => parse_id(id).map(Route::StudyActivity),
            ["study-activities", id, "launch"] => parse_id(id).map(Route::LaunchActivity),
            ["words"] => Some(Route::Words),
            ["words", id] => parse_id(id).map(Route::Word),
            ["groups"] => Some(Route::Groups),
            ["groups", id] => parse_id(id).map(Route::Group),
            ["study-sessions"] => Some(Route::StudySessions),
            ["study-sessions", id] => parse_id(id).map(Route::StudySession),
            ["settings"] => Some(Route::Settings),
            _ => None,
        };

        route.unwrap_or_else(|| Route::NotFound(trimmed.to_string()))
    }

    /// Canonical path of the route.
    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/dashboard".to_string(),
            Route::StudyActivities => "/study-activities".to_string(),
            Route::StudyActivity(id) => format!("/study-activities/{}", id),
            Route::LaunchActivity(id) => format!("/study-activities/{}/launch", id),
            Route::Words => "/words".to_string(),
            Route::Word(id) => format!("/words/{}", id),
            Route::Groups => "/groups".to_string(),
            Route::Group(id) => format!("/groups/{}", id),
            Route::StudySessions => "/study-sessions".to_string(),
            Route::StudySession(id) => format!("/study-sessions/{}", id),
            Route::Settings => "/settings".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}

/// Sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub name: &'static str,
    pub href: &'static str,
}

pub const NAVIGATION: [NavItem; 6] = [
    NavItem { name: "Dashboard", href: "/dashboard" },
    NavItem { name: "Study Activities", href: "/study-activities" },
    NavItem { name: "Words", href: "/words" },
    NavItem { name: "Groups", href: "/groups" },
    NavItem { name: "Study Sessions", href: "/study-sessions" },
    NavItem { name: "Settings", href: "/settings" },
];

impl NavItem {
    /// Highlighted only on an exact path match; detail pages highlight nothing.
    pub fn is_active(&self, location: &str) -> bool {
        self.href == location
    }
}

/// One-line sidebar with the active entry bracketed.
pub fn render_sidebar(location: &str) -> String {
    NAVIGATION
        .iter()
        .map(|item| {
            if item.is_active(location) {
                format!("[{}]", item.name)
            } else {
                item.name.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_and_dashboard_are_the_same_page() {
        assert_eq!(Route::parse("/"), Route::Dashboard);
        assert_eq!(Route::parse("/dashboard"), Route::Dashboard);
        assert_eq!(Route::parse(""), Route::Dashboard);
    }

    #[test]
    fn parses_every_route_in_the_table() {
        let cases = [
            ("/study-activities", Route::StudyActivities),
            ("/study-activities/2", Route::StudyActivity(2)),
            ("/study-activities/2/launch", Route::LaunchActivity(2)),
            ("/words", Route::Words),
            ("/words/1", Route::Word(1)),
            ("/groups", Route::Groups),
            ("/groups/5/", Route::Group(5)),
            ("/study-sessions", Route::StudySessions),
            ("/study-sessions/9?tab=words", Route::StudySession(9)),
            ("/settings", Route::Settings),
        ];
        for (path, expected) in cases {
            assert_eq!(Route::parse(path), expected, "{}", path);
        }
    }

    #[test]
    fn path_round_trips_for_canonical_routes() {
        for path in ["/words/1", "/study-activities/3/launch", "/settings"] {
            assert_eq!(Route::parse(path).path(), path);
        }
    }

    #[test]
    fn bad_ids_and_unknown_paths_are_not_found() {
        assert_eq!(Route::parse("/words/abc"), Route::NotFound("/words/abc".to_string()));
        assert_eq!(Route::parse("/words/0"), Route::NotFound("/words/0".to_string()));
        assert!(matches!(Route::parse("/admin"), Route::NotFound(_)));
    }

    #[test]
    fn sidebar_marks_exact_match_only() {
        assert_eq!(
            render_sidebar("/words"),
            "Dashboard | Study Activities | [Words] | Groups | Study Sessions | Settings"
        );
        assert!(!render_sidebar("/words/1").contains('['));
    }
}
