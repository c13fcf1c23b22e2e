use serde::{Deserialize, Serialize};

use super::domain::{AccountStatus, ReportStatus};
use super::repository::Notification;

/// Admin actions on an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountAction {
    Ban,
    Unban,
}

impl AccountAction {
    pub const fn target(self) -> AccountStatus {
        match self {
            AccountAction::Ban => AccountStatus::Banned,
            AccountAction::Unban => AccountStatus::Active,
        }
    }

    pub fn notification(self) -> Notification {
        match self {
            AccountAction::Ban => Notification::new(
                "User Banned",
                "The user has been banned from the platform.",
            ),
            AccountAction::Unban => Notification::new(
                "User Unbanned",
                "The user has been unbanned and can access the platform again.",
            ),
        }
    }
}

impl AccountStatus {
    /// Both actions are unconditional, so repeating one is a no-op.
    pub fn apply(self, action: AccountAction) -> AccountStatus {
        action.target()
    }
}

/// Admin decision on a pending report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportResolution {
    Approve,
    Reject,
}

impl ReportResolution {
    pub const fn target(self) -> ReportStatus {
        match self {
            ReportResolution::Approve => ReportStatus::Resolved,
            ReportResolution::Reject => ReportStatus::Rejected,
        }
    }

    pub fn notification(self) -> Notification {
        match self {
            ReportResolution::Approve => Notification::new(
                "Report Approved",
                "The report has been approved and action taken.",
            ),
            ReportResolution::Reject => {
                Notification::new("Report Rejected", "The report has been rejected.")
            }
        }
    }
}

impl ReportStatus {
    /// Pending reports close exactly once; resolved and rejected are terminal.
    pub fn resolve(self, resolution: ReportResolution) -> Result<ReportStatus, TransitionError> {
        if self.is_terminal() {
            return Err(TransitionError::ReportClosed { status: self });
        }
        Ok(resolution.target())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("report is already {status}")]
    ReportClosed { status: ReportStatus },
}
