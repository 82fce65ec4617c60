// src/portal/shell.rs

//! Interactive front end: holds the current location and per-view state, runs
//! commands and renders the current page.

use std::fmt::Write as _;
use std::str::FromStr;

use crate::portal::{
    client::ApiClient,
    launch::{ExternalOpener, LaunchError, LaunchFlow},
    nav::{Route, render_sidebar},
    notify::{Notifications, Toast},
    pages::{self, Ctx},
    pagination::Pager,
    query::{QueryCache, QueryKey},
    reset::{self, PendingReset, ResetKind},
    view::{PageView, Theme},
};

pub const HELP: &str = "\
go <path>         open a page, e.g. `go /words` or `go /groups/3`
next [list]       next page of a list (words, groups, sessions)
prev [list]       previous page of a list
select <id>       choose a group on a launch page
deselect          clear the chosen group
launch            launch the activity for the chosen group
reset-history     delete study history (asks for confirmation)
full-reset        delete all data and reload seed data (asks for confirmation)
confirm | cancel  answer a pending confirmation
theme <t>         light, dark or system
refresh           drop cached data and reload
help              show this help
quit              leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Go(String),
    Next(Option<String>),
    Prev(Option<String>),
    Select(i64),
    Deselect,
    Launch,
    ResetHistory,
    FullReset,
    Confirm,
    Cancel,
    Theme(Theme),
    Refresh,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let name = parts.next().ok_or_else(|| "empty command".to_string())?;
        let arg = parts.next().map(str::to_string);

        let command = match (name.to_ascii_lowercase().as_str(), arg) {
            ("go" | "open", Some(path)) => Command::Go(path),
            ("go" | "open", None) => return Err("usage: go <path>".to_string()),
            ("next", list) => Command::Next(list),
            ("prev", list) => Command::Prev(list),
            ("select", Some(id)) => Command::Select(
                id.parse()
                    .map_err(|_| format!("'{}' is not a group id", id))?,
            ),
            ("select", None) => return Err("usage: select <group-id>".to_string()),
            ("deselect", _) => Command::Deselect,
            ("launch", _) => Command::Launch,
            ("reset-history", _) => Command::ResetHistory,
            ("full-reset", _) => Command::FullReset,
            ("confirm" | "yes", _) => Command::Confirm,
            ("cancel" | "no", _) => Command::Cancel,
            ("theme", Some(theme)) => Command::Theme(theme.parse()?),
            ("theme", None) => return Err("usage: theme light|dark|system".to_string()),
            ("refresh", _) => Command::Refresh,
            ("help" | "?", _) => Command::Help,
            ("quit" | "exit", _) => Command::Quit,
            (other, _) => return Err(format!("unknown command '{}' (try `help`)", other)),
        };
        Ok(command)
    }
}

/// Whether the shell keeps reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// State that belongs to one visit of a page. Replaced on every navigation, so
/// lists start again at page 1 and nothing carries over between pages.
#[derive(Debug, Default)]
struct ViewState {
    words: Pager,
    groups: Pager,
    sessions: Pager,
    launch: Option<LaunchFlow>,
    pending: Option<PendingReset>,
}

impl ViewState {
    fn for_route(route: &Route) -> Self {
        let launch = match route {
            Route::LaunchActivity(id) => Some(LaunchFlow::new(*id)),
            _ => None,
        };
        Self {
            launch,
            ..Self::default()
        }
    }

    fn pager_mut(&mut self, list: &str) -> Option<&mut Pager> {
        match list {
            "words" => Some(&mut self.words),
            "groups" => Some(&mut self.groups),
            "sessions" => Some(&mut self.sessions),
            _ => None,
        }
    }
}

/// Paginated lists shown on a route.
fn lists(route: &Route) -> &'static [&'static str] {
    match route {
        Route::Words | Route::StudySession(_) => &["words"],
        Route::Groups => &["groups"],
        Route::StudySessions => &["sessions"],
        Route::Group(_) => &["words", "sessions"],
        _ => &[],
    }
}

pub struct Portal {
    client: ApiClient,
    cache: QueryCache,
    notes: Notifications,
    route: Route,
    view: ViewState,
    theme: Theme,
    opener: Box<dyn ExternalOpener>,
}

impl Portal {
    pub fn new(client: ApiClient, opener: Box<dyn ExternalOpener>) -> Self {
        Self {
            client,
            cache: QueryCache::new(),
            notes: Notifications::new(),
            route: Route::Dashboard,
            view: ViewState::default(),
            theme: Theme::default(),
            opener,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Whether a destructive action is waiting for `confirm`/`cancel`.
    pub fn has_pending_reset(&self) -> bool {
        self.view.pending.is_some()
    }

    pub fn take_notifications(&mut self) -> Vec<Toast> {
        self.notes.drain()
    }

    pub fn navigate(&mut self, path: &str) {
        self.route = Route::parse(path);
        self.view = ViewState::for_route(&self.route);
        tracing::debug!(route = %self.route, "Navigate");
    }

    /// Loads and builds the current page. Failed requests also raise an error
    /// notification.
    pub async fn page(&mut self) -> PageView {
        let ctx = Ctx::new(&self.client, &self.cache);
        let view = &mut self.view;

        let page = match &self.route {
            Route::Dashboard => pages::dashboard::render(ctx).await,
            Route::StudyActivities => pages::study_activities::list(ctx).await,
            Route::StudyActivity(id) => pages::study_activities::detail(ctx, *id).await,
            Route::LaunchActivity(id) => {
                let flow = view.launch.get_or_insert_with(|| LaunchFlow::new(*id));
                pages::study_activities::launch(ctx, flow).await
            }
            Route::Words => pages::words::list(ctx, &mut view.words).await,
            Route::Word(id) => pages::words::detail(ctx, *id).await,
            Route::Groups => pages::groups::list(ctx, &mut view.groups).await,
            Route::Group(id) => pages::groups::detail(ctx, *id, &mut view.words, &mut view.sessions).await,
            Route::StudySessions => pages::study_sessions::list(ctx, &mut view.sessions).await,
            Route::StudySession(id) => pages::study_sessions::detail(ctx, *id, &mut view.words).await,
            Route::Settings => pages::settings::render(self.theme, view.pending.as_ref()),
            Route::NotFound(path) => pages::not_found(path),
        };

        for (title, message) in page.failures() {
            self.notes.error(format!("Failed to load {}: {}", title, message));
        }
        page
    }

    /// Sidebar, current page and any pending notifications, as terminal text.
    pub async fn render(&mut self) -> String {
        let page = self.page().await;
        let mut out = render_sidebar(&self.route.path());
        out.push_str("\n\n");
        out.push_str(&page.render(self.theme));
        let toasts = self.notes.drain();
        if !toasts.is_empty() {
            out.push('\n');
            for toast in toasts {
                let _ = writeln!(out, "{}", toast);
            }
        }
        out
    }

    pub async fn execute(&mut self, command: Command) -> Flow {
        match command {
            Command::Go(path) => self.navigate(&path),
            Command::Next(list) => self.turn_page(list.as_deref(), true),
            Command::Prev(list) => self.turn_page(list.as_deref(), false),
            Command::Select(group_id) => self.select_group(group_id).await,
            Command::Deselect => match self.view.launch.as_mut() {
                Some(flow) => flow.select(None),
                None => self.notes.info("Nothing to deselect on this page"),
            },
            Command::Launch => self.launch().await,
            Command::ResetHistory => self.request_reset(ResetKind::History),
            Command::FullReset => self.request_reset(ResetKind::Full),
            Command::Confirm => self.confirm_reset().await,
            Command::Cancel => match self.view.pending.take() {
                Some(pending) => {
                    pending.cancel();
                    self.notes.info("Reset cancelled");
                }
                None => self.notes.info("Nothing to cancel"),
            },
            Command::Theme(theme) => {
                self.set_theme(theme);
                self.notes.success(format!("Theme set to {}", theme.as_str()));
            }
            Command::Refresh => {
                self.cache.invalidate_all();
                self.notes.info("Reloaded");
            }
            Command::Help => self.notes.info(HELP),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn turn_page(&mut self, list: Option<&str>, forward: bool) {
        let available = lists(&self.route);
        let list = match (list, available) {
            (Some(list), _) if available.iter().any(|l| *l == list) => list,
            (Some(list), _) => {
                self.notes.error(format!("No '{}' list on this page", list));
                return;
            }
            (None, [only]) => *only,
            (None, []) => {
                self.notes.info("This page has no pages to turn");
                return;
            }
            (None, _) => {
                self.notes.info(format!("Which list? {}", available.join(", ")));
                return;
            }
        };

        let Some(pager) = self.view.pager_mut(list) else {
            return;
        };
        let moved = if forward { pager.next() } else { pager.prev() };
        if !moved {
            let edge = if forward { "last" } else { "first" };
            self.notes.info(format!("Already on the {} page", edge));
        }
    }

    async fn select_group(&mut self, group_id: i64) {
        if self.view.launch.is_none() {
            self.notes.info("Groups are selected on a launch page");
            return;
        }

        let client = &self.client;
        let groups = self
            .cache
            .fetch(QueryKey::new("groups").page(1), || client.groups(1))
            .await;

        match groups {
            Ok(groups) if groups.iter().any(|g| g.id == group_id) => {
                if let Some(flow) = self.view.launch.as_mut() {
                    flow.select(Some(group_id));
                }
            }
            Ok(_) => self.notes.error(format!("Unknown group {}", group_id)),
            Err(err) => self.notes.error(format!("Failed to load groups: {}", err)),
        }
    }

    async fn launch(&mut self) {
        let Some(flow) = self.view.launch.as_ref() else {
            self.notes.info("Open a launch page first, e.g. `go /study-activities/1/launch`");
            return;
        };
        if !flow.can_launch() {
            self.notes.error(LaunchError::NoGroupSelected.notice());
            return;
        }
        let activity_id = flow.activity_id();

        let client = &self.client;
        let activity = match self
            .cache
            .fetch(QueryKey::new("study_activity").id(activity_id), || {
                client.study_activity(activity_id)
            })
            .await
        {
            Ok(activity) => activity,
            Err(err) => {
                tracing::warn!(activity_id, "Cannot launch: {}", err);
                self.notes.error("Failed to launch activity");
                return;
            }
        };

        let Some(flow) = self.view.launch.as_mut() else {
            return;
        };
        let result = flow.launch(&self.client, &activity, self.opener.as_ref()).await;
        match result {
            Ok(launched) => {
                // The new session shows up in lists and dashboard stats.
                self.cache.invalidate_all();
                self.navigate(&launched.route.path());
            }
            Err(err) => self.notes.error(err.notice()),
        }
    }

    fn request_reset(&mut self, kind: ResetKind) {
        if self.route != Route::Settings {
            self.navigate("/settings");
        }
        self.view.pending = Some(reset::request(kind));
    }

    async fn confirm_reset(&mut self) {
        let Some(pending) = self.view.pending.take() else {
            self.notes.info("Nothing to confirm");
            return;
        };

        let kind = pending.kind();
        match pending.confirm(&self.client).await {
            Ok(_) => {
                self.cache.invalidate_all();
                self.notes.success(kind.success_message());
            }
            Err(err) => {
                tracing::error!(?kind, "Reset failed: {}", err);
                self.notes.error(kind.failure_message());
            }
        }
    }
}
