use std::sync::Arc;

use tracing::debug;

use crate::config::StaticConfig;
use crate::services::{GeoProvider, LinkService, RedirectService, StatsService};
use crate::storage::{KvBackend, LinkStore, StorageFactory};
use crate::system::DiagnosticLog;
use crate::utils::clock::{Clock, SystemClock};

/// Everything a command needs, wired from one configuration.
pub struct StartupContext {
    pub config: Arc<StaticConfig>,
    pub store: Arc<LinkStore>,
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
    pub stats_service: Arc<StatsService>,
    pub diagnostics: Arc<DiagnosticLog>,
}

impl StartupContext {
    /// Wires services over an explicit backend and clock.
    ///
    /// Links and diagnostic entries share the backend, each in its own slot.
    pub fn with_backend(
        config: Arc<StaticConfig>,
        backend: Arc<dyn KvBackend>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let diagnostics = Arc::new(DiagnosticLog::with_clock(
            backend.clone(),
            config.storage.logs_key.clone(),
            &config.diagnostics,
            clock.clone(),
        ));
        Self::with_diagnostics(config, backend, clock, diagnostics)
    }

    /// Same as [`Self::with_backend`], reusing a diagnostic log that may
    /// already be attached to the subscriber.
    pub fn with_diagnostics(
        config: Arc<StaticConfig>,
        backend: Arc<dyn KvBackend>,
        clock: Arc<dyn Clock>,
        diagnostics: Arc<DiagnosticLog>,
    ) -> Self {
        let store = Arc::new(LinkStore::with_clock(
            backend,
            config.storage.links_key.clone(),
            clock,
        ));
        let link_service = Arc::new(LinkService::new(store.clone(), config.links.clone()));
        let redirect_service = Arc::new(RedirectService::new(
            store.clone(),
            GeoProvider::new(&config.geo),
        ));
        let stats_service = Arc::new(StatsService::new(
            store.clone(),
            config.links.base_url.clone(),
        ));

        Self {
            config,
            store,
            link_service,
            redirect_service,
            stats_service,
            diagnostics,
        }
    }
}

/// Backend plus the diagnostic log living on it.
///
/// Built ahead of the services so logging can be installed in between.
pub struct StorageContext {
    pub backend: Arc<dyn KvBackend>,
    pub diagnostics: Arc<DiagnosticLog>,
}

pub fn prepare_storage(config: &StaticConfig) -> StorageContext {
    let backend = StorageFactory::create(&config.storage);
    let diagnostics = Arc::new(DiagnosticLog::new(
        backend.clone(),
        config.storage.logs_key.clone(),
        &config.diagnostics,
    ));
    StorageContext {
        backend,
        diagnostics,
    }
}

/// 根据配置组装各个服务
pub fn prepare_startup(config: Arc<StaticConfig>, storage: StorageContext) -> StartupContext {
    let ctx = StartupContext::with_diagnostics(
        config,
        storage.backend,
        Arc::new(SystemClock),
        storage.diagnostics,
    );
    debug!(
        backend = ctx.store.backend_name(),
        "Startup context prepared"
    );
    ctx
}
