// src/portal/pages/dashboard.rs

use crate::portal::{
    pages::{Ctx, failed},
    query::QueryKey,
    view::{Cell, PageView, Section, format_percent},
};

pub async fn render(ctx: Ctx<'_>) -> PageView {
    let (stats, last, progress) = tokio::join!(
        ctx.cache
            .fetch(QueryKey::new("quick_stats"), || ctx.client.dashboard_quick_stats()),
        ctx.cache.fetch(QueryKey::new("last_study_session"), || {
            ctx.client.dashboard_last_study_session()
        }),
        ctx.cache
            .fetch(QueryKey::new("study_progress"), || ctx.client.dashboard_study_progress()),
    );

    let mut view = PageView::new("Dashboard");
    view.push(Section::Links {
        title: "Start Studying".to_string(),
        links: vec![Cell::link("Study Activities", "/study-activities")],
    });

    match stats {
        Ok(stats) => view.push(Section::Stats {
            title: "Quick Stats".to_string(),
            items: vec![
                ("Success Rate".to_string(), Cell::text(format_percent(stats.success_rate))),
                ("Study Sessions".to_string(), Cell::text(stats.total_study_sessions.to_string())),
                ("Active Groups".to_string(), Cell::text(stats.total_active_groups.to_string())),
                ("Study Streak".to_string(), Cell::text(format!("{} days", stats.study_streak))),
            ],
        }),
        Err(err) => view.push(failed("Quick Stats", &err)),
    }

    match last {
        Ok(Some(last)) => {
            let mut items = vec![
                ("Activity".to_string(), Cell::text(last.activity_name.clone())),
                (
                    "Group".to_string(),
                    Cell::link(last.group_name.clone(), format!("/groups/{}", last.group_id)),
                ),
                ("Correct".to_string(), Cell::text(last.correct_count.to_string())),
                ("Wrong".to_string(), Cell::text(last.wrong_count.to_string())),
            ];
            if let Some(accuracy) = last.accuracy() {
                items.push(("Accuracy".to_string(), Cell::text(format_percent(accuracy))));
            }
            view.push(Section::Stats {
                title: "Last Study Session".to_string(),
                items,
            });
        }
        Ok(None) => view.push(Section::Text {
            title: "Last Study Session".to_string(),
            body: "No study sessions yet".to_string(),
        }),
        Err(err) => view.push(failed("Last Study Session", &err)),
    }

    match progress {
        Ok(progress) => view.push(Section::Stats {
            title: "Study Progress".to_string(),
            items: vec![
                (
                    "Words Studied".to_string(),
                    Cell::text(format!("{} / {}", progress.words_studied, progress.total_words)),
                ),
                (
                    "Mastery Progress".to_string(),
                    Cell::text(format!("{} mastered", format_percent(progress.mastery_percentage))),
                ),
            ],
        }),
        Err(err) => view.push(failed("Study Progress", &err)),
    }

    view
}
