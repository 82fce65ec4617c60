// src/portal/pages/study_activities.rs

use crate::portal::{
    launch::{LaunchFlow, LaunchState},
    pages::{Ctx, failed, table},
    query::QueryKey,
    view::{Cell, PageView, Section, format_time},
};

pub async fn list(ctx: Ctx<'_>) -> PageView {
    let result = ctx
        .cache
        .fetch(QueryKey::new("study_activities"), || ctx.client.study_activities())
        .await;

    let mut view = PageView::new("Study Activities");
    match result {
        Ok(activities) if activities.is_empty() => view.push(Section::Text {
            title: "Activities".to_string(),
            body: "No study activities found".to_string(),
        }),
        Ok(activities) => {
            for activity in activities {
                view.push(Section::Text {
                    title: activity.name.clone(),
                    body: activity.description.clone(),
                });
                view.push(Section::Links {
                    title: format!("{} actions", activity.name),
                    links: vec![
                        Cell::link("Launch", format!("/study-activities/{}/launch", activity.id)),
                        Cell::link("View", format!("/study-activities/{}", activity.id)),
                    ],
                });
            }
        }
        Err(err) => view.push(failed("Activities", &err)),
    }
    view
}

pub async fn detail(ctx: Ctx<'_>, id: i64) -> PageView {
    let (activity, sessions) = tokio::join!(
        ctx.cache
            .fetch(QueryKey::new("study_activity").id(id), || ctx.client.study_activity(id)),
        ctx.cache
            .fetch(QueryKey::new("study_activity_sessions").id(id), || {
                ctx.client.study_activity_sessions(id)
            }),
    );

    let mut view = match activity {
        Ok(activity) => {
            let mut view = PageView::new(activity.name.clone());
            view.push(Section::Text {
                title: "Activity Details".to_string(),
                body: activity.description.clone(),
            });
            view
        }
        Err(err) => {
            let mut view = PageView::new(format!("Study Activity #{}", id));
            view.push(failed("Activity Details", &err));
            view
        }
    };
    view.push(Section::Links {
        title: "Actions".to_string(),
        links: vec![Cell::link("Launch Activity", format!("/study-activities/{}/launch", id))],
    });

    match sessions {
        Ok(sessions) => view.push(table(
            "Study Sessions",
            vec!["ID", "Group", "Start Time", "Items"],
            sessions
                .iter()
                .map(|s| {
                    vec![
                        Cell::link(s.id.to_string(), format!("/study-sessions/{}", s.id)),
                        Cell::text(s.group_name.clone()),
                        Cell::text(format_time(&s.start_time)),
                        Cell::text(s.review_item_count.to_string()),
                    ]
                })
                .collect(),
            "No study sessions yet",
        )),
        Err(err) => view.push(failed("Study Sessions", &err)),
    }
    view
}

/// Launch page: the activity and the groups it can be launched for.
pub async fn launch(ctx: Ctx<'_>, flow: &LaunchFlow) -> PageView {
    let id = flow.activity_id();
    let (activity, groups) = tokio::join!(
        ctx.cache
            .fetch(QueryKey::new("study_activity").id(id), || ctx.client.study_activity(id)),
        ctx.cache
            .fetch(QueryKey::new("groups").page(1), || ctx.client.groups(1)),
    );

    let mut view = match &activity {
        Ok(activity) => PageView::new(format!("Launch {}", activity.name)),
        Err(_) => PageView::new(format!("Launch Study Activity #{}", id)),
    }
    .subtitle("Select a group to start studying");

    if let Err(err) = &activity {
        view.push(failed("Activity", err));
    }

    let selected = flow.selected_group();
    match groups {
        Ok(groups) => view.push(table(
            "Select Group",
            vec!["", "ID", "Group"],
            groups
                .iter()
                .map(|g| {
                    let mark = if selected == Some(g.id) { "*" } else { "" };
                    vec![Cell::text(mark), Cell::text(g.id.to_string()), Cell::text(g.name.clone())]
                })
                .collect(),
            "No groups found",
        )),
        Err(err) => view.push(failed("Select Group", &err)),
    }

    let status = match flow.state() {
        LaunchState::Idle => "Launch Now (disabled: select a group with `select <id>`)".to_string(),
        LaunchState::Ready { group_id } => format!("Launch Now (group {}): type `launch`", group_id),
        LaunchState::Launched { session_id } => format!("Launched as study session {}", session_id),
    };
    view.push(Section::Text {
        title: "Launch Settings".to_string(),
        body: status,
    });
    view
}
