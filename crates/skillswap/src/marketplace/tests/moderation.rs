use std::sync::Arc;

use super::common::*;
use crate::marketplace::domain::{AccountStatus, ModerationStatus, ReportId, ReportStatus, UserId};
use crate::marketplace::export::ExportKind;
use crate::marketplace::moderation::TransitionError;
use crate::marketplace::repository::{AccountRepository, ReportRepository, RepositoryError};
use crate::marketplace::seed;
use crate::marketplace::service::{
    ErrorKind, MarketplaceError, MarketplaceServices, ModerationService, RecordRef,
};

#[test]
fn ban_is_idempotent_and_keeps_report_count() {
    let (services, store, notifications) = build_services();

    let first = services.moderation.ban(UserId(2)).expect("ban succeeds");
    let second = services.moderation.ban(UserId(2)).expect("repeat ban succeeds");

    assert_eq!(first.account.status, AccountStatus::Banned);
    assert_eq!(second.account, first.account);
    assert_eq!(second.moderation_status, ModerationStatus::Banned);

    let stored = store
        .fetch_account(UserId(2))
        .expect("fetch succeeds")
        .expect("account present");
    assert_eq!(stored.status, AccountStatus::Banned);
    assert_eq!(stored.report_count, 1);

    let events = notifications.events();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|event| event.title == "User Banned"));
}

#[test]
fn ban_leaves_reports_untouched() {
    let (services, store, _) = build_services();
    services
        .moderation
        .ban(seed::DEMO_FLAGGED_USER)
        .expect("ban succeeds");

    let reports = store.reports().expect("list reports");
    assert!(reports
        .iter()
        .all(|report| report.status == ReportStatus::Pending));
}

#[test]
fn unban_restores_active_status() {
    let (services, _, notifications) = build_services();
    services.moderation.ban(UserId(1)).expect("ban succeeds");
    let view = services.moderation.unban(UserId(1)).expect("unban succeeds");

    assert_eq!(view.account.status, AccountStatus::Active);
    assert_eq!(view.moderation_status, ModerationStatus::Active);
    assert_eq!(
        notifications.last().map(|event| event.title),
        Some("User Unbanned".to_string())
    );
}

#[test]
fn flagged_accounts_surface_as_reported_until_banned() {
    let (services, _, _) = build_services();
    let spam = services
        .moderation
        .users("spam")
        .expect("search succeeds")
        .pop()
        .expect("spam account listed");
    assert_eq!(spam.moderation_status, ModerationStatus::Reported);

    let banned = services
        .moderation
        .ban(seed::DEMO_FLAGGED_USER)
        .expect("ban succeeds");
    assert_eq!(banned.moderation_status, ModerationStatus::Banned);

    let unbanned = services
        .moderation
        .unban(seed::DEMO_FLAGGED_USER)
        .expect("unban succeeds");
    assert_eq!(unbanned.moderation_status, ModerationStatus::Reported);
}

#[test]
fn unknown_user_is_not_found() {
    let (services, _, notifications) = build_services();
    match services.moderation.ban(UserId(404)) {
        Err(MarketplaceError::NotFound(RecordRef::Account(UserId(404)))) => {}
        other => panic!("expected not found, got {other:?}"),
    }
    assert!(notifications.events().is_empty());
}

#[test]
fn approve_resolves_only_the_target_report() {
    let (services, store, notifications) = build_services();

    let report = services
        .moderation
        .approve(ReportId(1))
        .expect("approve succeeds");
    assert_eq!(report.status, ReportStatus::Resolved);

    let other = store
        .fetch_report(ReportId(2))
        .expect("fetch succeeds")
        .expect("report present");
    assert_eq!(other.status, ReportStatus::Pending);

    let flagged = services
        .moderation
        .account(seed::DEMO_FLAGGED_USER)
        .expect("account present");
    assert_eq!(flagged.status, AccountStatus::Active, "approval must not ban");

    assert_eq!(
        notifications.last().map(|event| event.title),
        Some("Report Approved".to_string())
    );
}

#[test]
fn reject_marks_report_rejected() {
    let (services, _, _) = build_services();
    let report = services
        .moderation
        .reject(ReportId(2))
        .expect("reject succeeds");
    assert_eq!(report.status, ReportStatus::Rejected);
    assert_eq!(
        services.moderation.pending_reports().expect("list").len(),
        1
    );
}

#[test]
fn closed_reports_cannot_be_resolved_again() {
    let (services, _, _) = build_services();
    services
        .moderation
        .reject(ReportId(1))
        .expect("first resolution succeeds");

    let error = services
        .moderation
        .approve(ReportId(1))
        .expect_err("second resolution refused");
    assert_eq!(error.kind(), ErrorKind::Conflict);
    assert!(matches!(
        error,
        MarketplaceError::Transition(TransitionError::ReportClosed {
            status: ReportStatus::Rejected
        })
    ));

    let stored = services.moderation.report(ReportId(1)).expect("present");
    assert_eq!(stored.status, ReportStatus::Rejected);
}

#[test]
fn unknown_report_is_not_found() {
    let (services, _, _) = build_services();
    let error = services
        .moderation
        .reject(ReportId(99))
        .expect_err("missing report");
    assert_eq!(error.kind(), ErrorKind::NotFound);
    assert_eq!(error.to_string(), "report 99 not found");
}

#[test]
fn user_search_matches_name_or_email() {
    let (services, _, _) = build_services();

    let by_name: Vec<UserId> = services
        .moderation
        .users("RODRIGUEZ")
        .expect("search succeeds")
        .into_iter()
        .map(|view| view.account.id)
        .collect();
    assert_eq!(by_name, vec![UserId(2)]);

    let by_email = services
        .moderation
        .users("alex")
        .expect("search succeeds");
    assert_eq!(by_email.len(), 2);

    let everyone = services.moderation.users("").expect("search succeeds");
    assert_eq!(everyone.len(), seed::accounts().len());
}

#[test]
fn stats_follow_store_contents() {
    let (services, _, _) = build_services();
    let before = services.moderation.stats().expect("stats build");
    assert_eq!(before.total_users, 8);
    assert_eq!(before.active_users, 8);
    assert_eq!(before.banned_users, 0);
    assert_eq!(before.flagged_users, 2);
    assert_eq!(before.pending_reports, 2);
    assert_eq!(before.completed_swaps, 93);

    services.moderation.ban(UserId(8)).expect("ban succeeds");
    services.moderation.approve(ReportId(1)).expect("approve");

    let after = services.moderation.stats().expect("stats build");
    assert_eq!(after.active_users, 7);
    assert_eq!(after.banned_users, 1);
    assert_eq!(after.pending_reports, 1);
}

#[test]
fn blank_announcements_are_rejected() {
    let (services, _, notifications) = build_services();
    let error = services
        .moderation
        .broadcast("   \n")
        .expect_err("blank message refused");
    assert_eq!(error.kind(), ErrorKind::Validation);
    assert!(notifications.events().is_empty());

    let announcement = services
        .moderation
        .broadcast("  Maintenance tonight at 10pm  ")
        .expect("message sent");
    assert_eq!(announcement.message, "Maintenance tonight at 10pm");
    assert_eq!(
        notifications.last().map(|event| event.title),
        Some("Platform Message Sent".to_string())
    );
}

#[test]
fn announcement_text_goes_through_the_notifier() {
    let (services, _, notifications) = build_services();
    services
        .moderation
        .broadcast("\tNew skills catalog is live ")
        .expect("message sent");

    let events = notifications.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].title, "Platform Announcement");
    assert_eq!(events[0].description, "New skills catalog is live");
    assert_eq!(events[1].title, "Platform Message Sent");
}

#[test]
fn exports_render_csv_and_notify() {
    let (services, _, notifications) = build_services();

    let document = services
        .moderation
        .export(ExportKind::PlatformAnalytics)
        .expect("export renders");
    assert_eq!(document.filename, "platform_analytics.csv");
    assert!(document.body.starts_with("metric,value"));
    assert!(document.body.contains("pending_reports,2"));

    let event = notifications.last().expect("notification sent");
    assert_eq!(event.title, "Report Downloaded");
    assert_eq!(
        event.description,
        "Platform Analytics report has been downloaded."
    );
}

#[test]
fn repository_failures_surface_as_internal_errors() {
    let service = ModerationService::new(
        Arc::new(UnavailableStore),
        Arc::new(UnavailableStore),
        Arc::new(crate::marketplace::memory::NotificationLog::default()),
    );

    let error = service.ban(UserId(1)).expect_err("store is down");
    assert!(matches!(
        error,
        MarketplaceError::Repository(RepositoryError::Unavailable(_))
    ));
    assert_eq!(error.kind(), ErrorKind::Internal);
}

#[test]
fn notifier_failures_are_reported_after_the_change_lands() {
    let store = store();
    let services = MarketplaceServices::new(store.clone(), Arc::new(DownNotifier));

    let error = services.moderation.ban(UserId(3)).expect_err("notify fails");
    assert!(matches!(error, MarketplaceError::Notify(_)));

    let stored = store
        .fetch_account(UserId(3))
        .expect("fetch succeeds")
        .expect("account present");
    assert_eq!(stored.status, AccountStatus::Banned);
}
