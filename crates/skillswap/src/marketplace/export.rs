//! CSV downloads offered on the admin analytics tab.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{Report, UserAccount};
use super::repository::Notification;
use super::service::PlatformStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportKind {
    UserActivity,
    SwapStatistics,
    ModerationLog,
    PlatformAnalytics,
}

impl ExportKind {
    pub const ALL: [ExportKind; 4] = [
        ExportKind::UserActivity,
        ExportKind::SwapStatistics,
        ExportKind::ModerationLog,
        ExportKind::PlatformAnalytics,
    ];

    pub const fn slug(self) -> &'static str {
        match self {
            ExportKind::UserActivity => "user_activity",
            ExportKind::SwapStatistics => "swap_statistics",
            ExportKind::ModerationLog => "moderation_log",
            ExportKind::PlatformAnalytics => "platform_analytics",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ExportKind::UserActivity => "User Activity",
            ExportKind::SwapStatistics => "Swap Statistics",
            ExportKind::ModerationLog => "Moderation Log",
            ExportKind::PlatformAnalytics => "Platform Analytics",
        }
    }

    pub fn filename(self) -> String {
        format!("{}.csv", self.slug())
    }

    pub(crate) fn notification(self) -> Notification {
        Notification::new(
            "Report Downloaded",
            format!("{} report has been downloaded.", self.label()),
        )
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ExportKind {
    type Err = ExportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        ExportKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == normalized)
            .ok_or_else(|| ExportError::UnknownKind(value.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("unknown export '{0}'")]
    UnknownKind(String),
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush CSV buffer: {0}")]
    Flush(String),
    #[error("CSV output was not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Rendered download.
#[derive(Debug, Clone, Serialize)]
pub struct ExportDocument {
    pub kind: ExportKind,
    pub filename: String,
    pub body: String,
}

/// Row type with a fixed header, written even when there are no rows.
trait CsvRow: Serialize {
    const HEADERS: &'static [&'static str];
}

#[derive(Debug, Serialize)]
struct UserActivityRow<'a> {
    user_id: u32,
    name: &'a str,
    email: &'a str,
    status: &'static str,
    joined_on: NaiveDate,
    completed_swaps: u32,
    rating: f32,
    report_count: u32,
}

impl CsvRow for UserActivityRow<'_> {
    const HEADERS: &'static [&'static str] = &[
        "user_id",
        "name",
        "email",
        "status",
        "joined_on",
        "completed_swaps",
        "rating",
        "report_count",
    ];
}

#[derive(Debug, Serialize)]
struct SwapStatisticsRow<'a> {
    user_id: u32,
    name: &'a str,
    completed_swaps: u32,
    rating: f32,
}

impl CsvRow for SwapStatisticsRow<'_> {
    const HEADERS: &'static [&'static str] = &["user_id", "name", "completed_swaps", "rating"];
}

#[derive(Debug, Serialize)]
struct ModerationLogRow<'a> {
    report_id: u32,
    reported_user: u32,
    reported_by: String,
    reason: &'a str,
    filed_on: NaiveDate,
    status: &'static str,
}

impl CsvRow for ModerationLogRow<'_> {
    const HEADERS: &'static [&'static str] = &[
        "report_id",
        "reported_user",
        "reported_by",
        "reason",
        "filed_on",
        "status",
    ];
}

#[derive(Debug, Serialize)]
struct MetricRow {
    metric: &'static str,
    value: u64,
}

impl CsvRow for MetricRow {
    const HEADERS: &'static [&'static str] = &["metric", "value"];
}

fn write_rows<T, I>(rows: I) -> Result<String, ExportError>
where
    T: CsvRow,
    I: IntoIterator<Item = T>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(T::HEADERS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Flush(err.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

pub fn user_activity(accounts: &[UserAccount]) -> Result<String, ExportError> {
    write_rows(accounts.iter().map(|account| UserActivityRow {
        user_id: account.id.0,
        name: &account.name,
        email: &account.email,
        status: account.moderation_status().label(),
        joined_on: account.joined_on,
        completed_swaps: account.completed_swaps,
        rating: account.rating,
        report_count: account.report_count,
    }))
}

/// Members ordered by completed swaps, busiest first.
pub fn swap_statistics(accounts: &[UserAccount]) -> Result<String, ExportError> {
    let mut ranked: Vec<&UserAccount> = accounts.iter().collect();
    ranked.sort_by(|a, b| b.completed_swaps.cmp(&a.completed_swaps).then(a.id.cmp(&b.id)));

    write_rows(ranked.into_iter().map(|account| SwapStatisticsRow {
        user_id: account.id.0,
        name: &account.name,
        completed_swaps: account.completed_swaps,
        rating: account.rating,
    }))
}

pub fn moderation_log(reports: &[Report]) -> Result<String, ExportError> {
    write_rows(reports.iter().map(|report| ModerationLogRow {
        report_id: report.id.0,
        reported_user: report.reported_user.0,
        reported_by: report
            .reported_by
            .map(|id| id.to_string())
            .unwrap_or_else(|| "anonymous".to_string()),
        reason: &report.reason,
        filed_on: report.filed_on,
        status: report.status.label(),
    }))
}

pub fn platform_analytics(stats: &PlatformStats) -> Result<String, ExportError> {
    write_rows([
        MetricRow {
            metric: "total_users",
            value: stats.total_users as u64,
        },
        MetricRow {
            metric: "active_users",
            value: stats.active_users as u64,
        },
        MetricRow {
            metric: "banned_users",
            value: stats.banned_users as u64,
        },
        MetricRow {
            metric: "flagged_users",
            value: stats.flagged_users as u64,
        },
        MetricRow {
            metric: "pending_reports",
            value: stats.pending_reports as u64,
        },
        MetricRow {
            metric: "completed_swaps",
            value: stats.completed_swaps,
        },
    ])
}
