mod directory;
mod moderation;

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{ReportId, UserId};
use super::editor::{EditorError, SkillError};
use super::export::ExportError;
use super::moderation::TransitionError;
use super::repository::{
    AccountRepository, Notifier, NotifyError, ProfileRepository, ReportRepository,
    RepositoryError,
};

pub use directory::DirectoryService;
pub use moderation::{AccountView, ModerationService};

/// Record referenced by a failed lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordRef {
    Profile(UserId),
    Account(UserId),
    Report(ReportId),
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordRef::Profile(id) => write!(f, "profile {id}"),
            RecordRef::Account(id) => write!(f, "user {id}"),
            RecordRef::Report(id) => write!(f, "report {id}"),
        }
    }
}

/// Error raised by the marketplace services.
#[derive(Debug, thiserror::Error)]
pub enum MarketplaceError {
    #[error("{0} not found")]
    NotFound(RecordRef),
    #[error(transparent)]
    Skill(#[from] SkillError),
    #[error("profile is not in edit mode")]
    NotEditing,
    #[error("announcement message must not be blank")]
    BlankAnnouncement,
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl From<EditorError> for MarketplaceError {
    fn from(value: EditorError) -> Self {
        match value {
            EditorError::NotEditing => Self::NotEditing,
            EditorError::Skill(err) => Self::Skill(err),
        }
    }
}

/// Coarse classification used to pick transport status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    Conflict,
    Internal,
}

impl MarketplaceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MarketplaceError::NotFound(_) => ErrorKind::NotFound,
            MarketplaceError::Skill(_)
            | MarketplaceError::NotEditing
            | MarketplaceError::BlankAnnouncement
            | MarketplaceError::Export(ExportError::UnknownKind(_)) => ErrorKind::Validation,
            MarketplaceError::Transition(_) => ErrorKind::Conflict,
            MarketplaceError::Repository(RepositoryError::Conflict) => ErrorKind::Conflict,
            MarketplaceError::Repository(RepositoryError::NotFound) => ErrorKind::NotFound,
            MarketplaceError::Repository(RepositoryError::Unavailable(_))
            | MarketplaceError::Notify(_)
            | MarketplaceError::Export(_) => ErrorKind::Internal,
        }
    }
}

/// Dashboard counters derived from the current store contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlatformStats {
    pub total_users: usize,
    pub active_users: usize,
    pub banned_users: usize,
    pub flagged_users: usize,
    pub pending_reports: usize,
    pub completed_swaps: u64,
}

/// Platform-wide message accepted for delivery.
#[derive(Debug, Clone, Serialize)]
pub struct Announcement {
    pub message: String,
    pub sent_at: DateTime<Utc>,
}

/// Both services wired to one store and one notifier.
pub struct MarketplaceServices<S, N> {
    pub directory: DirectoryService<S, N>,
    pub moderation: ModerationService<S, S, N>,
}

impl<S, N> MarketplaceServices<S, N>
where
    S: ProfileRepository + AccountRepository + ReportRepository + 'static,
    N: Notifier + 'static,
{
    pub fn new(store: Arc<S>, notifier: Arc<N>) -> Self {
        Self {
            directory: DirectoryService::new(store.clone(), notifier.clone()),
            moderation: ModerationService::new(store.clone(), store, notifier),
        }
    }
}
