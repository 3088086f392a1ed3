use metrics_exporter_prometheus::PrometheusHandle;
use rail_audit::audits::{InMemoryAuditStore, LocationKind};
use rail_audit::catalog::Catalog;
use rail_audit::config::DataConfig;
use rail_audit::error::DataLoadError;
use rail_audit::query::AuditQueryService;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Load the catalog and audit documents named in the config.
pub(crate) fn load_query_service(
    config: &DataConfig,
) -> Result<AuditQueryService<InMemoryAuditStore>, DataLoadError> {
    let catalog = Catalog::from_path(&config.catalog_path)?;
    let store = InMemoryAuditStore::from_path(&config.audits_path)?;

    info!(
        stations = catalog.stations.len(),
        depots = catalog.depots.len(),
        offices = catalog.offices.len(),
        audited_stations = store.location_count(LocationKind::Station),
        audited_trains = store.location_count(LocationKind::Train),
        "audit data loaded"
    );

    Ok(AuditQueryService::new(Arc::new(catalog), Arc::new(store)))
}
