use metrics_exporter_prometheus::PrometheusHandle;
use skillswap::marketplace::seed;
use skillswap::marketplace::{
    MarketplaceServices, MarketplaceStore, NotificationLog, RepositoryError,
};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub(crate) type Services = MarketplaceServices<MarketplaceStore, NotificationLog>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn build_store(seed_demo_data: bool) -> Result<MarketplaceStore, RepositoryError> {
    if seed_demo_data {
        seed::demo_store()
    } else {
        Ok(MarketplaceStore::default())
    }
}

/// Wires the services over a fresh store and returns the notification log for inspection.
pub(crate) fn build_services(
    seed_demo_data: bool,
) -> Result<(Arc<Services>, NotificationLog), RepositoryError> {
    let store = Arc::new(build_store(seed_demo_data)?);
    let notifications = NotificationLog::default();
    let services = Arc::new(MarketplaceServices::new(
        store,
        Arc::new(notifications.clone()),
    ));
    Ok((services, notifications))
}
