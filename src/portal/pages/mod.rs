// src/portal/pages/mod.rs

//! One render function per route.
//!
//! Pages read through the shared [`QueryCache`]. Every independent request
//! fills its own sections: a failed request is replaced by an error section
//! and the rest of the page still renders.

pub mod dashboard;
pub mod groups;
pub mod settings;
pub mod study_activities;
pub mod study_sessions;
pub mod words;

use chrono::{DateTime, Utc};

use crate::portal::{
    client::{ApiClient, ClientError},
    pagination::Pager,
    query::QueryCache,
    view::{Cell, PageView, PagerView, Section, format_time},
};

/// What a page needs to load its data.
#[derive(Clone, Copy)]
pub struct Ctx<'a> {
    pub client: &'a ApiClient,
    pub cache: &'a QueryCache,
}

impl<'a> Ctx<'a> {
    pub fn new(client: &'a ApiClient, cache: &'a QueryCache) -> Self {
        Self { client, cache }
    }
}

pub(crate) fn failed(title: &str, err: &ClientError) -> Section {
    tracing::warn!(section = title, "Failed to load: {}", err);
    Section::Error {
        title: title.to_string(),
        message: err.to_string(),
    }
}

pub(crate) fn table(title: &str, columns: Vec<&'static str>, rows: Vec<Vec<Cell>>, empty: &str) -> Section {
    Section::Table {
        title: title.to_string(),
        columns,
        rows,
        empty: empty.to_string(),
    }
}

/// Pushes one page of a paginated list followed by its pager, recording the
/// page size so the pager knows whether "next" stays enabled.
pub(crate) fn push_paged<T>(
    view: &mut PageView,
    title: &str,
    list: &'static str,
    pager: &mut Pager,
    result: Result<Vec<T>, ClientError>,
    build: impl FnOnce(&[T]) -> Section,
) {
    match result {
        Ok(items) => {
            pager.record(items.len());
            view.push(build(&items));
        }
        Err(err) => view.push(failed(title, &err)),
    }
    view.push(Section::Pager(PagerView::of(list, pager)));
}

pub(crate) fn time_or_dash(time: Option<&DateTime<Utc>>) -> String {
    time.map(format_time).unwrap_or_else(|| "-".to_string())
}

pub fn not_found(path: &str) -> PageView {
    let mut view = PageView::new("Page not found");
    view.push(Section::Text {
        title: "Not Found".to_string(),
        body: format!("Nothing lives at {}", path),
    });
    view.push(Section::Links {
        title: "Go to".to_string(),
        links: vec![Cell::link("Dashboard", "/dashboard")],
    });
    view
}
