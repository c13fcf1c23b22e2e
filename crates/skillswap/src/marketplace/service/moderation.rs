use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use super::{Announcement, MarketplaceError, PlatformStats, RecordRef};
use crate::marketplace::domain::{
    AccountStatus, ModerationStatus, Report, ReportId, ReportStatus, UserAccount, UserId,
};
use crate::marketplace::export::{self, ExportDocument, ExportKind};
use crate::marketplace::moderation::{AccountAction, ReportResolution};
use crate::marketplace::repository::{AccountRepository, Notification, Notifier, ReportRepository};

/// Account row as listed on the admin dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    #[serde(flatten)]
    pub account: UserAccount,
    pub moderation_status: ModerationStatus,
}

impl From<UserAccount> for AccountView {
    fn from(account: UserAccount) -> Self {
        let moderation_status = account.moderation_status();
        Self {
            account,
            moderation_status,
        }
    }
}

/// Admin operations: account bans, report triage, announcements, and exports.
pub struct ModerationService<A, R, N> {
    accounts: Arc<A>,
    reports: Arc<R>,
    notifier: Arc<N>,
}

impl<A, R, N> ModerationService<A, R, N>
where
    A: AccountRepository + 'static,
    R: ReportRepository + 'static,
    N: Notifier + 'static,
{
    pub fn new(accounts: Arc<A>, reports: Arc<R>, notifier: Arc<N>) -> Self {
        Self {
            accounts,
            reports,
            notifier,
        }
    }

    /// Accounts whose name or email contains `query`, ignoring case.
    pub fn users(&self, query: &str) -> Result<Vec<AccountView>, MarketplaceError> {
        let needle = query.to_lowercase();
        Ok(self
            .accounts
            .accounts()?
            .into_iter()
            .filter(|account| {
                account.name.to_lowercase().contains(&needle)
                    || account.email.to_lowercase().contains(&needle)
            })
            .map(AccountView::from)
            .collect())
    }

    pub fn account(&self, id: UserId) -> Result<UserAccount, MarketplaceError> {
        self.accounts
            .fetch_account(id)?
            .ok_or(MarketplaceError::NotFound(RecordRef::Account(id)))
    }

    pub fn ban(&self, id: UserId) -> Result<AccountView, MarketplaceError> {
        self.apply(id, AccountAction::Ban)
    }

    pub fn unban(&self, id: UserId) -> Result<AccountView, MarketplaceError> {
        self.apply(id, AccountAction::Unban)
    }

    /// Report counts and reports themselves are left alone.
    fn apply(&self, id: UserId, action: AccountAction) -> Result<AccountView, MarketplaceError> {
        let mut account = self.account(id)?;
        let previous = account.status;
        account.status = previous.apply(action);

        if previous != account.status {
            self.accounts.update_account(account.clone())?;
        }
        info!(
            user_id = %id,
            from = previous.label(),
            to = account.status.label(),
            "account status applied"
        );

        self.notifier.notify(action.notification())?;
        Ok(account.into())
    }

    pub fn reports(&self) -> Result<Vec<Report>, MarketplaceError> {
        Ok(self.reports.reports()?)
    }

    pub fn pending_reports(&self) -> Result<Vec<Report>, MarketplaceError> {
        let mut reports = self.reports.reports()?;
        reports.retain(|report| report.status == ReportStatus::Pending);
        Ok(reports)
    }

    pub fn report(&self, id: ReportId) -> Result<Report, MarketplaceError> {
        self.reports
            .fetch_report(id)?
            .ok_or(MarketplaceError::NotFound(RecordRef::Report(id)))
    }

    pub fn approve(&self, id: ReportId) -> Result<Report, MarketplaceError> {
        self.resolve(id, ReportResolution::Approve)
    }

    pub fn reject(&self, id: ReportId) -> Result<Report, MarketplaceError> {
        self.resolve(id, ReportResolution::Reject)
    }

    /// Closes a pending report. Approval does not ban the reported member.
    pub fn resolve(
        &self,
        id: ReportId,
        resolution: ReportResolution,
    ) -> Result<Report, MarketplaceError> {
        let mut report = self.report(id)?;
        report.status = report.status.resolve(resolution).map_err(|err| {
            warn!(report_id = %id, error = %err, "report resolution refused");
            err
        })?;

        self.reports.update_report(report.clone())?;
        info!(
            report_id = %id,
            reported_user = %report.reported_user,
            status = report.status.label(),
            "report closed"
        );

        self.notifier.notify(resolution.notification())?;
        Ok(report)
    }

    pub fn stats(&self) -> Result<PlatformStats, MarketplaceError> {
        let accounts = self.accounts.accounts()?;
        let pending_reports = self
            .reports
            .reports()?
            .iter()
            .filter(|report| report.status == ReportStatus::Pending)
            .count();

        Ok(PlatformStats {
            total_users: accounts.len(),
            active_users: accounts
                .iter()
                .filter(|account| account.status == AccountStatus::Active)
                .count(),
            banned_users: accounts
                .iter()
                .filter(|account| account.status == AccountStatus::Banned)
                .count(),
            flagged_users: accounts.iter().filter(|account| account.is_flagged()).count(),
            pending_reports,
            completed_swaps: accounts
                .iter()
                .map(|account| u64::from(account.completed_swaps))
                .sum(),
        })
    }

    pub fn broadcast(&self, message: &str) -> Result<Announcement, MarketplaceError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(MarketplaceError::BlankAnnouncement);
        }

        let announcement = Announcement {
            message: message.to_string(),
            sent_at: Utc::now(),
        };
        info!(length = message.len(), "platform announcement sent");

        // Delivery to members first, then the admin's confirmation.
        self.notifier
            .notify(Notification::new("Platform Announcement", message))?;
        self.notifier.notify(Notification::new(
            "Platform Message Sent",
            "Your message has been sent to all users.",
        ))?;
        Ok(announcement)
    }

    pub fn export(&self, kind: ExportKind) -> Result<ExportDocument, MarketplaceError> {
        let body = match kind {
            ExportKind::UserActivity => export::user_activity(&self.accounts.accounts()?)?,
            ExportKind::SwapStatistics => export::swap_statistics(&self.accounts.accounts()?)?,
            ExportKind::ModerationLog => export::moderation_log(&self.reports.reports()?)?,
            ExportKind::PlatformAnalytics => export::platform_analytics(&self.stats()?)?,
        };

        self.notifier.notify(kind.notification())?;
        Ok(ExportDocument {
            kind,
            filename: kind.filename(),
            body,
        })
    }
}
