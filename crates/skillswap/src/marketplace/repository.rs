use serde::{Deserialize, Serialize};

use super::domain::{Profile, Report, ReportId, UserAccount, UserId};

/// Profile storage. Listings come back in id order.
pub trait ProfileRepository: Send + Sync {
    fn insert_profile(&self, profile: Profile) -> Result<Profile, RepositoryError>;
    fn update_profile(&self, profile: Profile) -> Result<(), RepositoryError>;
    fn fetch_profile(&self, id: UserId) -> Result<Option<Profile>, RepositoryError>;
    fn profiles(&self) -> Result<Vec<Profile>, RepositoryError>;
}

/// Account storage backing the moderation views.
pub trait AccountRepository: Send + Sync {
    fn insert_account(&self, account: UserAccount) -> Result<UserAccount, RepositoryError>;
    fn update_account(&self, account: UserAccount) -> Result<(), RepositoryError>;
    fn fetch_account(&self, id: UserId) -> Result<Option<UserAccount>, RepositoryError>;
    fn accounts(&self) -> Result<Vec<UserAccount>, RepositoryError>;
}

pub trait ReportRepository: Send + Sync {
    fn insert_report(&self, report: Report) -> Result<Report, RepositoryError>;
    fn update_report(&self, report: Report) -> Result<(), RepositoryError>;
    fn fetch_report(&self, id: ReportId) -> Result<Option<Report>, RepositoryError>;
    fn reports(&self) -> Result<Vec<Report>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook for the transient confirmations shown after each mutating action.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification) -> Result<(), NotifyError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification channel unavailable: {0}")]
    Unavailable(String),
}
