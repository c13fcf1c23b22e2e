//! End-to-end scenarios for the marketplace: a member curates their profile, another member
//! finds them through the directory, and an administrator works through the moderation queue.
//!
//! Everything goes through the public service facade and HTTP router.

mod common {
    use std::sync::Arc;

    use skillswap::marketplace::seed;
    use skillswap::marketplace::{
        marketplace_router, MarketplaceServices, MarketplaceStore, NotificationLog,
    };

    pub(super) type Services = MarketplaceServices<MarketplaceStore, NotificationLog>;

    pub(super) fn build_services() -> (Arc<Services>, NotificationLog) {
        let store = Arc::new(seed::demo_store().expect("demo data loads"));
        let notifications = NotificationLog::default();
        let services = Arc::new(MarketplaceServices::new(
            store,
            Arc::new(notifications.clone()),
        ));
        (services, notifications)
    }

    pub(super) fn build_router() -> (axum::Router, NotificationLog) {
        let (services, notifications) = build_services();
        (marketplace_router(services), notifications)
    }
}

mod owner_editing {
    use super::common::build_services;
    use skillswap::marketplace::seed::DEMO_OWNER;
    use skillswap::marketplace::{
        DirectoryQuery, MarketplaceError, ProfileUpdate, SkillKind, Visibility,
    };

    #[test]
    fn new_offered_skill_becomes_searchable() {
        let (services, notifications) = build_services();
        let before = services
            .directory
            .browse(&DirectoryQuery::new("", Some("Go".to_string())))
            .expect("browse");
        assert!(before.profiles.iter().all(|p| p.id != DEMO_OWNER));

        services
            .directory
            .add_skill(DEMO_OWNER, SkillKind::Offered, "Go")
            .expect("skill added");

        let after = services
            .directory
            .browse(&DirectoryQuery::new("", Some("Go".to_string())))
            .expect("browse");
        assert!(after.profiles.iter().any(|p| p.id == DEMO_OWNER));
        assert_eq!(
            notifications.last().map(|n| n.title),
            Some("Profile Updated".to_string())
        );
    }

    #[test]
    fn going_private_hides_the_owner_from_browse() {
        let (services, _) = build_services();
        let total_before = services
            .directory
            .browse(&DirectoryQuery::default())
            .expect("browse")
            .total;

        let update = ProfileUpdate {
            visibility: Some(Visibility::Private),
            ..ProfileUpdate::default()
        };
        services
            .directory
            .update_profile(DEMO_OWNER, &update)
            .expect("update saved");

        let result = services
            .directory
            .browse(&DirectoryQuery::new("alex johnson", None))
            .expect("browse");
        assert_eq!(result.total, total_before - 1);
        assert!(result.is_empty());
    }

    #[test]
    fn abandoned_edit_session_leaves_the_profile_untouched() {
        let (services, notifications) = build_services();
        let original = services.directory.profile(DEMO_OWNER).expect("profile");

        let mut editor = services.directory.edit(DEMO_OWNER).expect("editor");
        editor
            .add_skill(SkillKind::Wanted, "Pottery")
            .expect("draft accepts skill");
        editor.cancel();

        assert_eq!(
            services.directory.profile(DEMO_OWNER).expect("profile"),
            original
        );
        assert!(matches!(
            services.directory.save(&mut editor),
            Err(MarketplaceError::NotEditing)
        ));
        assert!(notifications.events().is_empty());
    }
}

mod moderation_queue {
    use super::common::build_services;
    use skillswap::marketplace::seed::DEMO_FLAGGED_USER;
    use skillswap::marketplace::{
        ErrorKind, ExportKind, ModerationStatus, ReportId, ReportStatus,
    };

    #[test]
    fn working_through_the_queue_updates_stats_and_exports() {
        let (services, notifications) = build_services();

        let banned = services.moderation.ban(DEMO_FLAGGED_USER).expect("ban");
        assert_eq!(banned.moderation_status, ModerationStatus::Banned);

        for report in services.moderation.pending_reports().expect("pending") {
            services.moderation.approve(report.id).expect("approve");
        }

        let stats = services.moderation.stats().expect("stats");
        assert_eq!(stats.pending_reports, 0);
        assert_eq!(stats.banned_users, 1);

        let log = services
            .moderation
            .export(ExportKind::ModerationLog)
            .expect("export");
        assert!(log.body.lines().skip(1).all(|row| row.contains("resolved")));

        let titles: Vec<String> = notifications.events().into_iter().map(|n| n.title).collect();
        assert_eq!(
            titles,
            vec![
                "User Banned",
                "Report Approved",
                "Report Approved",
                "Report Downloaded"
            ]
        );
    }

    #[test]
    fn closed_reports_refuse_a_second_decision() {
        let (services, _) = build_services();
        let rejected = services.moderation.reject(ReportId(2)).expect("reject");
        assert_eq!(rejected.status, ReportStatus::Rejected);

        let err = services
            .moderation
            .approve(ReportId(2))
            .expect_err("already rejected");
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(
            services.moderation.report(ReportId(2)).expect("report").status,
            ReportStatus::Rejected
        );
    }

    #[test]
    fn unban_restores_reported_status_for_flagged_accounts() {
        let (services, _) = build_services();
        services.moderation.ban(DEMO_FLAGGED_USER).expect("ban");
        let view = services.moderation.unban(DEMO_FLAGGED_USER).expect("unban");
        assert_eq!(view.moderation_status, ModerationStatus::Reported);
    }
}

mod routing {
    use super::common::build_router;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(router: axum::Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = router.oneshot(request).await.expect("router responds");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn profile_update_is_visible_through_browse() {
        let (router, _) = build_router();
        let request = Request::put("/api/v1/profiles/7")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({ "location": "Portland, OR" }).to_string(),
            ))
            .expect("request");
        let (status, _) = send(router.clone(), request).await;
        assert_eq!(status, StatusCode::OK);

        let request = Request::get("/api/v1/profiles?q=portland")
            .body(Body::empty())
            .expect("request");
        let (status, body) = send(router, request).await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(body["showing"], 1);
        assert_eq!(body["profiles"][0]["name"], "Alex Johnson");
    }

    #[tokio::test]
    async fn export_endpoint_serves_csv_attachment() {
        let (router, notifications) = build_router();
        let request = Request::get("/api/v1/admin/exports/user_activity")
            .body(Body::empty())
            .expect("request");
        let response = router.oneshot(request).await.expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"user_activity.csv\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body = String::from_utf8(bytes.to_vec()).expect("utf8");
        assert_eq!(body.lines().count(), 9);
        assert_eq!(
            notifications.last().map(|n| n.title),
            Some("Report Downloaded".to_string())
        );
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let (router, _) = build_router();
        let request = Request::post("/api/v1/admin/users/404/ban")
            .body(Body::empty())
            .expect("request");
        let (status, body) = send(router, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let body: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(body["error"], "user 404 not found");
    }
}
