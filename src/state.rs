//! Shared application state injected into HTTP handlers.

use std::sync::Arc;

use crate::application::services::{LinkService, LinkSettings, RedirectService, StatsService};
use crate::domain::repositories::LinkStore;

/// Services wired to a single store, cloned cheaply into every request.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
    pub stats_service: Arc<StatsService>,
    /// Raw store handle, used by the health probe.
    pub store: Arc<dyn LinkStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn LinkStore>, settings: LinkSettings) -> Self {
        let stats_service = Arc::new(StatsService::new(store.clone(), settings.base_url.clone()));
        let redirect_service = Arc::new(RedirectService::new(store.clone()));
        let link_service = Arc::new(LinkService::new(store.clone(), settings));

        Self {
            link_service,
            redirect_service,
            stats_service,
            store,
        }
    }
}
