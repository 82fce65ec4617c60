// src/portal/pages/study_sessions.rs

use crate::portal::{
    pages::{Ctx, failed, push_paged, table, time_or_dash},
    pagination::Pager,
    query::QueryKey,
    view::{Cell, PageView, Section, format_time},
};

pub async fn list(ctx: Ctx<'_>, pager: &mut Pager) -> PageView {
    let page = pager.page();
    let result = ctx
        .cache
        .fetch(QueryKey::new("study_sessions").page(page), || ctx.client.study_sessions(page))
        .await;

    let mut view = PageView::new("Study Sessions");
    push_paged(&mut view, "Study Sessions", "sessions", pager, result, |sessions| {
        table(
            "Study Sessions",
            vec!["ID", "Activity", "Group", "Start Time", "End Time", "Items"],
            sessions
                .iter()
                .map(|s| {
                    vec![
                        Cell::link(s.id.to_string(), format!("/study-sessions/{}", s.id)),
                        Cell::text(s.activity_name.clone()),
                        Cell::text(s.group_name.clone()),
                        Cell::text(format_time(&s.start_time)),
                        Cell::text(time_or_dash(s.end_time.as_ref())),
                        Cell::text(s.review_item_count.to_string()),
                    ]
                })
                .collect(),
            "No study sessions found",
        )
    });
    view
}

pub async fn detail(ctx: Ctx<'_>, id: i64, words_pager: &mut Pager) -> PageView {
    let page = words_pager.page();
    let (session, words) = tokio::join!(
        ctx.cache
            .fetch(QueryKey::new("study_session").id(id), || ctx.client.study_session(id)),
        ctx.cache
            .fetch(QueryKey::new("study_session_words").id(id).page(page), || {
                ctx.client.study_session_words(id, page)
            }),
    );

    let mut view = PageView::new("Study Session").subtitle(format!("Session #{}", id));

    match session {
        Ok(session) => {
            let group = match session.group_id {
                Some(group_id) => Cell::link(session.group_name.clone(), format!("/groups/{}", group_id)),
                None => Cell::text(session.group_name.clone()),
            };
            view.push(Section::Stats {
                title: "Session Details".to_string(),
                items: vec![
                    ("Activity".to_string(), Cell::text(session.activity_name.clone())),
                    ("Group".to_string(), group),
                    ("Start Time".to_string(), Cell::text(format_time(&session.start_time))),
                    ("End Time".to_string(), Cell::text(time_or_dash(session.end_time.as_ref()))),
                ],
            });
        }
        Err(err) => view.push(failed("Session Details", &err)),
    }

    push_paged(&mut view, "Word Reviews", "words", words_pager, words, |words| {
        table(
            "Word Reviews",
            vec!["Spanish", "Transliteration", "Arabic", "Result"],
            words
                .iter()
                .map(|w| {
                    vec![
                        Cell::text(w.spanish.clone()),
                        Cell::text(w.transliteration.clone()),
                        Cell::text(w.arabic.clone()),
                        Cell::text(w.review().label()),
                    ]
                })
                .collect(),
            "No words reviewed in this session",
        )
    });
    view
}
