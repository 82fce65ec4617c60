// src/portal/pages/settings.rs

use crate::portal::{
    reset::{PendingReset, ResetKind},
    view::{PageView, Section, Theme},
};

/// Settings has no backend data; it shows the theme and the reset actions,
/// plus the confirmation prompt while a reset is pending.
pub fn render(theme: Theme, pending: Option<&PendingReset>) -> PageView {
    let mut view = PageView::new("Settings");
    view.push(Section::Text {
        title: "Appearance".to_string(),
        body: format!("Theme: {} (change with `theme light|dark|system`)", theme.as_str()),
    });

    let options = [ResetKind::History, ResetKind::Full]
        .iter()
        .map(|kind| format!("{}: {}", kind.title(), command_for(*kind)))
        .collect::<Vec<_>>()
        .join("\n");
    view.push(Section::Text {
        title: "Reset Options".to_string(),
        body: options,
    });

    if let Some(pending) = pending {
        let kind = pending.kind();
        view.push(Section::Text {
            title: kind.title().to_string(),
            body: format!(
                "{}\n`confirm` to {}, `cancel` to keep your data.",
                kind.description(),
                kind.action_label().to_lowercase()
            ),
        });
    }
    view
}

fn command_for(kind: ResetKind) -> &'static str {
    match kind {
        ResetKind::History => "reset-history",
        ResetKind::Full => "full-reset",
    }
}
