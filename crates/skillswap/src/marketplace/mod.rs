//! Skill-exchange marketplace: profile directory, owner-side profile editing, and moderation.
//!
//! State lives in a [`MarketplaceStore`] shared by the services; the pure search and
//! state-transition rules sit in [`directory`], [`moderation`], and [`editor`] so they can be
//! exercised without a store.

pub mod directory;
pub mod domain;
pub mod editor;
pub mod export;
pub mod memory;
pub mod moderation;
pub mod repository;
pub mod router;
pub mod seed;
pub mod service;

#[cfg(test)]
mod tests;

pub use directory::{BrowseResult, DirectoryQuery, SkillCatalog};
pub use domain::{
    AccountStatus, ModerationStatus, Profile, Report, ReportId, ReportStatus, SkillKind,
    UserAccount, UserId, Visibility,
};
pub use editor::{EditorError, ProfileEditor, ProfileUpdate, SkillError};
pub use export::{ExportDocument, ExportError, ExportKind};
pub use memory::{MarketplaceStore, NotificationLog};
pub use moderation::{AccountAction, ReportResolution, TransitionError};
pub use repository::{
    AccountRepository, Notification, Notifier, NotifyError, ProfileRepository, ReportRepository,
    RepositoryError,
};
pub use router::marketplace_router;
pub use service::{
    AccountView, Announcement, DirectoryService, ErrorKind, MarketplaceError, MarketplaceServices,
    ModerationService, PlatformStats, RecordRef,
};
