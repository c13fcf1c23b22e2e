use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable identifier shared by a member's profile and account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u32);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier wrapper for moderation reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(pub u32);

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which of the two skill lists on a profile an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillKind {
    Offered,
    Wanted,
}

impl SkillKind {
    pub const fn label(self) -> &'static str {
        match self {
            SkillKind::Offered => "offered",
            SkillKind::Wanted => "wanted",
        }
    }
}

impl fmt::Display for SkillKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl Visibility {
    pub const fn label(self) -> &'static str {
        match self {
            Visibility::Public => "Public",
            Visibility::Private => "Private",
        }
    }
}

/// A member's skill-exchange listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub bio: String,
    pub rating: f32,
    pub skills_offered: Vec<String>,
    pub skills_wanted: Vec<String>,
    pub availability: String,
    pub completed_swaps: u32,
    #[serde(default)]
    pub visibility: Visibility,
}

impl Profile {
    pub fn skills(&self, kind: SkillKind) -> &[String] {
        match kind {
            SkillKind::Offered => &self.skills_offered,
            SkillKind::Wanted => &self.skills_wanted,
        }
    }

    pub(crate) fn skills_mut(&mut self, kind: SkillKind) -> &mut Vec<String> {
        match kind {
            SkillKind::Offered => &mut self.skills_offered,
            SkillKind::Wanted => &mut self.skills_wanted,
        }
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    /// First letter of each name part, used where no avatar is available.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}

/// Stored account state. Only `Active` and `Banned` are persisted; see [`ModerationStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    #[default]
    Active,
    Banned,
}

impl AccountStatus {
    pub const fn label(self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Banned => "banned",
        }
    }
}

/// Status shown to moderators. `Reported` is derived from the account's report count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationStatus {
    Active,
    Reported,
    Banned,
}

impl ModerationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ModerationStatus::Active => "active",
            ModerationStatus::Reported => "reported",
            ModerationStatus::Banned => "banned",
        }
    }
}

/// Administrative view of a member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub status: AccountStatus,
    pub joined_on: NaiveDate,
    pub completed_swaps: u32,
    pub rating: f32,
    pub report_count: u32,
}

impl UserAccount {
    pub fn is_flagged(&self) -> bool {
        self.report_count > 0
    }

    pub fn moderation_status(&self) -> ModerationStatus {
        match self.status {
            AccountStatus::Banned => ModerationStatus::Banned,
            AccountStatus::Active if self.is_flagged() => ModerationStatus::Reported,
            AccountStatus::Active => ModerationStatus::Active,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    #[default]
    Pending,
    Resolved,
    Rejected,
}

impl ReportStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Resolved => "resolved",
            ReportStatus::Rejected => "rejected",
        }
    }

    pub const fn is_terminal(self) -> bool {
        !matches!(self, ReportStatus::Pending)
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Moderation complaint filed against a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    pub reported_user: UserId,
    /// `None` for anonymous reports.
    pub reported_by: Option<UserId>,
    pub reason: String,
    pub description: String,
    pub filed_on: NaiveDate,
    pub status: ReportStatus,
}
