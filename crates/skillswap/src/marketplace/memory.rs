use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::info;

use super::domain::{Profile, Report, ReportId, UserAccount, UserId};
use super::repository::{
    AccountRepository, Notification, Notifier, NotifyError, ProfileRepository, ReportRepository,
    RepositoryError,
};

/// Process-local store for every marketplace collection. Nothing is persisted.
#[derive(Debug, Default, Clone)]
pub struct MarketplaceStore {
    profiles: Arc<Mutex<BTreeMap<UserId, Profile>>>,
    accounts: Arc<Mutex<BTreeMap<UserId, UserAccount>>>,
    reports: Arc<Mutex<BTreeMap<ReportId, Report>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("store mutex poisoned".to_string()))
}

fn insert_new<K: Ord + Copy, V: Clone>(
    map: &Mutex<BTreeMap<K, V>>,
    key: K,
    value: V,
) -> Result<V, RepositoryError> {
    let mut guard = lock(map)?;
    if guard.contains_key(&key) {
        return Err(RepositoryError::Conflict);
    }
    guard.insert(key, value.clone());
    Ok(value)
}

fn replace_existing<K: Ord + Copy, V>(
    map: &Mutex<BTreeMap<K, V>>,
    key: K,
    value: V,
) -> Result<(), RepositoryError> {
    let mut guard = lock(map)?;
    match guard.get_mut(&key) {
        Some(slot) => {
            *slot = value;
            Ok(())
        }
        None => Err(RepositoryError::NotFound),
    }
}

impl ProfileRepository for MarketplaceStore {
    fn insert_profile(&self, profile: Profile) -> Result<Profile, RepositoryError> {
        insert_new(&self.profiles, profile.id, profile)
    }

    fn update_profile(&self, profile: Profile) -> Result<(), RepositoryError> {
        replace_existing(&self.profiles, profile.id, profile)
    }

    fn fetch_profile(&self, id: UserId) -> Result<Option<Profile>, RepositoryError> {
        Ok(lock(&self.profiles)?.get(&id).cloned())
    }

    fn profiles(&self) -> Result<Vec<Profile>, RepositoryError> {
        Ok(lock(&self.profiles)?.values().cloned().collect())
    }
}

impl AccountRepository for MarketplaceStore {
    fn insert_account(&self, account: UserAccount) -> Result<UserAccount, RepositoryError> {
        insert_new(&self.accounts, account.id, account)
    }

    fn update_account(&self, account: UserAccount) -> Result<(), RepositoryError> {
        replace_existing(&self.accounts, account.id, account)
    }

    fn fetch_account(&self, id: UserId) -> Result<Option<UserAccount>, RepositoryError> {
        Ok(lock(&self.accounts)?.get(&id).cloned())
    }

    fn accounts(&self) -> Result<Vec<UserAccount>, RepositoryError> {
        Ok(lock(&self.accounts)?.values().cloned().collect())
    }
}

impl ReportRepository for MarketplaceStore {
    fn insert_report(&self, report: Report) -> Result<Report, RepositoryError> {
        insert_new(&self.reports, report.id, report)
    }

    fn update_report(&self, report: Report) -> Result<(), RepositoryError> {
        replace_existing(&self.reports, report.id, report)
    }

    fn fetch_report(&self, id: ReportId) -> Result<Option<Report>, RepositoryError> {
        Ok(lock(&self.reports)?.get(&id).cloned())
    }

    fn reports(&self) -> Result<Vec<Report>, RepositoryError> {
        Ok(lock(&self.reports)?.values().cloned().collect())
    }
}

/// Notifier that logs each notification and keeps a copy for later inspection.
#[derive(Debug, Default, Clone)]
pub struct NotificationLog {
    events: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationLog {
    pub fn events(&self) -> Vec<Notification> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<Notification> {
        self.events
            .lock()
            .ok()
            .and_then(|guard| guard.last().cloned())
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        info!(
            title = %notification.title,
            description = %notification.description,
            "notification"
        );
        self.events
            .lock()
            .map_err(|_| NotifyError::Unavailable("notification log poisoned".to_string()))?
            .push(notification);
        Ok(())
    }
}
