use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::directory::{DirectoryQuery, DEFAULT_POPULAR_SKILLS};
use super::domain::{ReportId, SkillKind, UserId};
use super::editor::ProfileUpdate;
use super::export::ExportKind;
use super::repository::{AccountRepository, Notifier, ProfileRepository, ReportRepository};
use super::service::{ErrorKind, MarketplaceError, MarketplaceServices};

type SharedServices<S, N> = Arc<MarketplaceServices<S, N>>;

/// Router exposing the directory, profile editor, and admin endpoints.
pub fn marketplace_router<S, N>(services: SharedServices<S, N>) -> Router
where
    S: ProfileRepository + AccountRepository + ReportRepository + 'static,
    N: Notifier + 'static,
{
    Router::new()
        .route("/api/v1/profiles", get(browse_handler::<S, N>))
        .route(
            "/api/v1/profiles/:user_id",
            get(profile_handler::<S, N>).put(update_profile_handler::<S, N>),
        )
        .route(
            "/api/v1/profiles/:user_id/skills/:kind",
            post(add_skill_handler::<S, N>),
        )
        .route(
            "/api/v1/profiles/:user_id/skills/:kind/:label",
            delete(remove_skill_handler::<S, N>),
        )
        .route("/api/v1/skills", get(skills_handler::<S, N>))
        .route("/api/v1/admin/users", get(users_handler::<S, N>))
        .route("/api/v1/admin/users/:user_id/ban", post(ban_handler::<S, N>))
        .route(
            "/api/v1/admin/users/:user_id/unban",
            post(unban_handler::<S, N>),
        )
        .route("/api/v1/admin/reports", get(reports_handler::<S, N>))
        .route(
            "/api/v1/admin/reports/:report_id/approve",
            post(approve_handler::<S, N>),
        )
        .route(
            "/api/v1/admin/reports/:report_id/reject",
            post(reject_handler::<S, N>),
        )
        .route("/api/v1/admin/stats", get(stats_handler::<S, N>))
        .route(
            "/api/v1/admin/announcements",
            post(announcement_handler::<S, N>),
        )
        .route("/api/v1/admin/exports/:kind", get(export_handler::<S, N>))
        .with_state(services)
}

pub(crate) fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn error_response(error: MarketplaceError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (status_for(error.kind()), Json(payload)).into_response()
}

fn respond<T: serde::Serialize>(result: Result<T, MarketplaceError>) -> Response {
    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn browse_handler<S, N>(
    State(services): State<SharedServices<S, N>>,
    Query(query): Query<DirectoryQuery>,
) -> Response
where
    S: ProfileRepository + AccountRepository + ReportRepository + 'static,
    N: Notifier + 'static,
{
    respond(services.directory.browse(&query))
}

pub(crate) async fn profile_handler<S, N>(
    State(services): State<SharedServices<S, N>>,
    Path(user_id): Path<u32>,
) -> Response
where
    S: ProfileRepository + AccountRepository + ReportRepository + 'static,
    N: Notifier + 'static,
{
    respond(services.directory.profile(UserId(user_id)))
}

pub(crate) async fn update_profile_handler<S, N>(
    State(services): State<SharedServices<S, N>>,
    Path(user_id): Path<u32>,
    Json(update): Json<ProfileUpdate>,
) -> Response
where
    S: ProfileRepository + AccountRepository + ReportRepository + 'static,
    N: Notifier + 'static,
{
    respond(services.directory.update_profile(UserId(user_id), &update))
}

#[derive(Debug, Deserialize)]
pub(crate) struct SkillLabel {
    pub(crate) label: String,
}

pub(crate) async fn add_skill_handler<S, N>(
    State(services): State<SharedServices<S, N>>,
    Path((user_id, kind)): Path<(u32, SkillKind)>,
    Json(body): Json<SkillLabel>,
) -> Response
where
    S: ProfileRepository + AccountRepository + ReportRepository + 'static,
    N: Notifier + 'static,
{
    respond(
        services
            .directory
            .add_skill(UserId(user_id), kind, &body.label),
    )
}

pub(crate) async fn remove_skill_handler<S, N>(
    State(services): State<SharedServices<S, N>>,
    Path((user_id, kind, label)): Path<(u32, SkillKind, String)>,
) -> Response
where
    S: ProfileRepository + AccountRepository + ReportRepository + 'static,
    N: Notifier + 'static,
{
    respond(
        services
            .directory
            .remove_skill(UserId(user_id), kind, &label),
    )
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SkillsParams {
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

pub(crate) async fn skills_handler<S, N>(
    State(services): State<SharedServices<S, N>>,
    Query(params): Query<SkillsParams>,
) -> Response
where
    S: ProfileRepository + AccountRepository + ReportRepository + 'static,
    N: Notifier + 'static,
{
    let limit = params.limit.unwrap_or(DEFAULT_POPULAR_SKILLS);
    respond(services.directory.skills(limit))
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct UserSearch {
    #[serde(default)]
    pub(crate) q: String,
}

pub(crate) async fn users_handler<S, N>(
    State(services): State<SharedServices<S, N>>,
    Query(search): Query<UserSearch>,
) -> Response
where
    S: ProfileRepository + AccountRepository + ReportRepository + 'static,
    N: Notifier + 'static,
{
    respond(services.moderation.users(&search.q))
}

pub(crate) async fn ban_handler<S, N>(
    State(services): State<SharedServices<S, N>>,
    Path(user_id): Path<u32>,
) -> Response
where
    S: ProfileRepository + AccountRepository + ReportRepository + 'static,
    N: Notifier + 'static,
{
    respond(services.moderation.ban(UserId(user_id)))
}

pub(crate) async fn unban_handler<S, N>(
    State(services): State<SharedServices<S, N>>,
    Path(user_id): Path<u32>,
) -> Response
where
    S: ProfileRepository + AccountRepository + ReportRepository + 'static,
    N: Notifier + 'static,
{
    respond(services.moderation.unban(UserId(user_id)))
}

pub(crate) async fn reports_handler<S, N>(
    State(services): State<SharedServices<S, N>>,
) -> Response
where
    S: ProfileRepository + AccountRepository + ReportRepository + 'static,
    N: Notifier + 'static,
{
    respond(services.moderation.reports())
}

pub(crate) async fn approve_handler<S, N>(
    State(services): State<SharedServices<S, N>>,
    Path(report_id): Path<u32>,
) -> Response
where
    S: ProfileRepository + AccountRepository + ReportRepository + 'static,
    N: Notifier + 'static,
{
    respond(services.moderation.approve(ReportId(report_id)))
}

pub(crate) async fn reject_handler<S, N>(
    State(services): State<SharedServices<S, N>>,
    Path(report_id): Path<u32>,
) -> Response
where
    S: ProfileRepository + AccountRepository + ReportRepository + 'static,
    N: Notifier + 'static,
{
    respond(services.moderation.reject(ReportId(report_id)))
}

pub(crate) async fn stats_handler<S, N>(State(services): State<SharedServices<S, N>>) -> Response
where
    S: ProfileRepository + AccountRepository + ReportRepository + 'static,
    N: Notifier + 'static,
{
    respond(services.moderation.stats())
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnnouncementRequest {
    pub(crate) message: String,
}

pub(crate) async fn announcement_handler<S, N>(
    State(services): State<SharedServices<S, N>>,
    Json(request): Json<AnnouncementRequest>,
) -> Response
where
    S: ProfileRepository + AccountRepository + ReportRepository + 'static,
    N: Notifier + 'static,
{
    match services.moderation.broadcast(&request.message) {
        Ok(announcement) => (StatusCode::ACCEPTED, Json(announcement)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn export_handler<S, N>(
    State(services): State<SharedServices<S, N>>,
    Path(kind): Path<String>,
) -> Response
where
    S: ProfileRepository + AccountRepository + ReportRepository + 'static,
    N: Notifier + 'static,
{
    let document = kind
        .parse::<ExportKind>()
        .map_err(MarketplaceError::from)
        .and_then(|kind| services.moderation.export(kind));

    match document {
        Ok(document) => {
            let disposition = format!("attachment; filename=\"{}\"", document.filename);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                document.body,
            )
                .into_response()
        }
        Err(error) => error_response(error),
    }
}
