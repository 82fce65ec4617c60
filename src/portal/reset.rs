// src/portal/reset.rs

//! Destructive reset operations, each gated behind an explicit confirmation.

use crate::portal::client::{ApiClient, ClientError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetKind {
    /// Deletes study sessions and word review items.
    History,
    /// Deletes everything and reloads the seed data.
    Full,
}

impl ResetKind {
    pub fn title(&self) -> &'static str {
        match self {
            ResetKind::History => "Reset Study History",
            ResetKind::Full => "Full Reset",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ResetKind::History => {
                "This will delete all study sessions and word review items. This action cannot be undone."
            }
            ResetKind::Full => {
                "This will delete all data and reload the seed data. This action cannot be undone."
            }
        }
    }

    pub fn action_label(&self) -> &'static str {
        match self {
            ResetKind::History => "Continue",
            ResetKind::Full => "Reset Everything",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            ResetKind::History => "Study history has been reset",
            ResetKind::Full => "Application has been fully reset",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            ResetKind::History => "Failed to reset study history",
            ResetKind::Full => "Failed to reset application",
        }
    }
}

/// An open confirmation prompt. Confirming it is the only way to issue a
/// reset request.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingReset {
    kind: ResetKind,
}

/// Opens the confirmation step for `kind`. Nothing is sent yet.
pub fn request(kind: ResetKind) -> PendingReset {
    PendingReset { kind }
}

impl PendingReset {
    pub fn kind(&self) -> ResetKind {
        self.kind
    }

    /// Sends the destructive request.
    pub async fn confirm(self, client: &ApiClient) -> Result<ResetKind, ClientError> {
        tracing::info!(kind = ?self.kind, "Reset confirmed");
        match self.kind {
            ResetKind::History => client.reset_history().await?,
            ResetKind::Full => client.full_reset().await?,
        }
        Ok(self.kind)
    }

    /// Closes the prompt without sending anything.
    pub fn cancel(self) -> ResetKind {
        tracing::debug!(kind = ?self.kind, "Reset cancelled");
        self.kind
    }
}
