// src/portal/pages/groups.rs

use crate::portal::{
    pages::{Ctx, failed, push_paged, table, time_or_dash, words::{WORD_COLUMNS, word_row}},
    pagination::Pager,
    query::QueryKey,
    view::{Cell, PageView, Section, format_percent, format_time},
};

pub async fn list(ctx: Ctx<'_>, pager: &mut Pager) -> PageView {
    let page = pager.page();
    let result = ctx
        .cache
        .fetch(QueryKey::new("groups").page(page), || ctx.client.groups(page))
        .await;

    let mut view = PageView::new("Word Groups");
    push_paged(&mut view, "Groups", "groups", pager, result, |groups| {
        table(
            "Groups",
            vec!["Group Name", "Word Count"],
            groups
                .iter()
                .map(|g| {
                    vec![
                        Cell::link(g.name.clone(), format!("/groups/{}", g.id)),
                        Cell::text(g.word_count.to_string()),
                    ]
                })
                .collect(),
            "No groups found",
        )
    });
    view
}

/// Group summary with its words and study sessions, each list paged on its own.
pub async fn detail(ctx: Ctx<'_>, id: i64, words_pager: &mut Pager, sessions_pager: &mut Pager) -> PageView {
    let words_page = words_pager.page();
    let sessions_page = sessions_pager.page();

    let (group, words, sessions) = tokio::join!(
        ctx.cache
            .fetch(QueryKey::new("group").id(id), || ctx.client.group(id)),
        ctx.cache.fetch(QueryKey::new("group_words").id(id).page(words_page), || {
            ctx.client.group_words(id, words_page)
        }),
        ctx.cache
            .fetch(QueryKey::new("group_study_sessions").id(id).page(sessions_page), || {
                ctx.client.group_study_sessions(id, sessions_page)
            }),
    );

    let mut view = match group {
        Ok(group) => {
            let mut view = PageView::new(group.name.clone())
                .subtitle(format!("{} words in this group", group.total_words));
            view.push(Section::Stats {
                title: "Group Statistics".to_string(),
                items: vec![
                    ("Total Words".to_string(), Cell::text(group.total_words.to_string())),
                    ("Study Sessions".to_string(), Cell::text(group.total_sessions.to_string())),
                    ("Success Rate".to_string(), Cell::text(format_percent(group.success_rate))),
                ],
            });
            view
        }
        Err(err) => {
            let mut view = PageView::new(format!("Group #{}", id));
            view.push(failed("Group Statistics", &err));
            view
        }
    };

    push_paged(&mut view, "Words", "words", words_pager, words, |words| {
        table(
            "Words",
            WORD_COLUMNS.to_vec(),
            words.iter().map(|w| word_row(w, false)).collect(),
            "No words in this group",
        )
    });

    push_paged(&mut view, "Study Sessions", "sessions", sessions_pager, sessions, |sessions| {
        table(
            "Study Sessions",
            vec!["Activity", "Start Time", "End Time", "Items"],
            sessions
                .iter()
                .map(|s| {
                    vec![
                        Cell::link(s.activity_name.clone(), format!("/study-sessions/{}", s.id)),
                        Cell::text(format_time(&s.start_time)),
                        Cell::text(time_or_dash(s.end_time.as_ref())),
                        Cell::text(s.review_item_count.to_string()),
                    ]
                })
                .collect(),
            "No study sessions for this group",
        )
    });

    view
}
