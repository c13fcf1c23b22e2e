use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::marketplace::domain::{Profile, Report, ReportId, UserAccount, UserId};
use crate::marketplace::memory::{MarketplaceStore, NotificationLog};
use crate::marketplace::repository::{
    AccountRepository, Notification, Notifier, NotifyError, ProfileRepository, ReportRepository,
    RepositoryError,
};
use crate::marketplace::seed;
use crate::marketplace::service::MarketplaceServices;
use crate::marketplace::marketplace_router;

pub(super) fn store() -> Arc<MarketplaceStore> {
    Arc::new(seed::demo_store().expect("demo store seeds"))
}

pub(super) fn build_services() -> (
    MarketplaceServices<MarketplaceStore, NotificationLog>,
    Arc<MarketplaceStore>,
    Arc<NotificationLog>,
) {
    let store = store();
    let notifications = Arc::new(NotificationLog::default());
    let services = MarketplaceServices::new(store.clone(), notifications.clone());
    (services, store, notifications)
}

pub(super) fn router() -> (axum::Router, Arc<MarketplaceStore>, Arc<NotificationLog>) {
    let (services, store, notifications) = build_services();
    (marketplace_router(Arc::new(services)), store, notifications)
}

pub(super) fn names(profiles: &[&Profile]) -> Vec<String> {
    profiles.iter().map(|profile| profile.name.clone()).collect()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}

/// Store whose backend is down.
pub(super) struct UnavailableStore;

fn unavailable<T>() -> Result<T, RepositoryError> {
    Err(RepositoryError::Unavailable("offline".to_string()))
}

impl ProfileRepository for UnavailableStore {
    fn insert_profile(&self, _profile: Profile) -> Result<Profile, RepositoryError> {
        unavailable()
    }

    fn update_profile(&self, _profile: Profile) -> Result<(), RepositoryError> {
        unavailable()
    }

    fn fetch_profile(&self, _id: UserId) -> Result<Option<Profile>, RepositoryError> {
        unavailable()
    }

    fn profiles(&self) -> Result<Vec<Profile>, RepositoryError> {
        unavailable()
    }
}

impl AccountRepository for UnavailableStore {
    fn insert_account(&self, _account: UserAccount) -> Result<UserAccount, RepositoryError> {
        unavailable()
    }

    fn update_account(&self, _account: UserAccount) -> Result<(), RepositoryError> {
        unavailable()
    }

    fn fetch_account(&self, _id: UserId) -> Result<Option<UserAccount>, RepositoryError> {
        unavailable()
    }

    fn accounts(&self) -> Result<Vec<UserAccount>, RepositoryError> {
        unavailable()
    }
}

impl ReportRepository for UnavailableStore {
    fn insert_report(&self, _report: Report) -> Result<Report, RepositoryError> {
        unavailable()
    }

    fn update_report(&self, _report: Report) -> Result<(), RepositoryError> {
        unavailable()
    }

    fn fetch_report(&self, _id: ReportId) -> Result<Option<Report>, RepositoryError> {
        unavailable()
    }

    fn reports(&self) -> Result<Vec<Report>, RepositoryError> {
        unavailable()
    }
}

/// Notifier whose transport always fails.
#[derive(Default)]
pub(super) struct DownNotifier;

impl Notifier for DownNotifier {
    fn notify(&self, _notification: Notification) -> Result<(), NotifyError> {
        Err(NotifyError::Unavailable("toast channel closed".to_string()))
    }
}
