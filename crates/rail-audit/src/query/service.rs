use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use super::filters::{filter_by_name, filter_by_route};
use super::views::{
    FieldError, LocationView, PathSegment, QueryResponse, StationView, TrainView,
};
use crate::audits::{last_audit_date, Audit, AuditStore, LocationKind, StoreError};
use crate::catalog::{normalize_platforms, Catalog, Named, Station};

/// Upstream caller context a query arrives from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CallerOrigin {
    #[default]
    Direct,
    /// The SQMS integration, which has no use for depot or office listings.
    Sqms,
}

impl CallerOrigin {
    pub const SQMS_MARKER: &'static str = "sqms";

    pub fn from_marker(marker: Option<&str>) -> Self {
        match marker.map(str::trim) {
            Some(Self::SQMS_MARKER) => Self::Sqms,
            _ => Self::Direct,
        }
    }
}

/// Which audits to fetch from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditLookup<'a> {
    Location { kind: LocationKind, name: &'a str },
    Route { from: Option<&'a str>, to: Option<&'a str> },
}

/// Resolves the query surface against the static catalog and an audit store.
pub struct AuditQueryService<S> {
    catalog: Arc<Catalog>,
    store: Arc<S>,
}

impl<S> AuditQueryService<S>
where
    S: AuditStore + 'static,
{
    pub fn new(catalog: Arc<Catalog>, store: Arc<S>) -> Self {
        Self { catalog, store }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Fetch audits and annotate their scores. Location lookups come back in
    /// store order; route lookups are filtered by departure and arrival.
    pub async fn fetch_audits(&self, lookup: AuditLookup<'_>) -> Result<Vec<Audit>, StoreError> {
        let mut audits = match lookup {
            AuditLookup::Location { kind, name } => {
                debug!(%kind, name, "looking up location audits");
                self.store.lookup_audits_for_location(kind, name).await?
            }
            AuditLookup::Route { from, to } => {
                debug!(?from, ?to, "looking up train audits");
                let all = self.store.lookup_all_audits(LocationKind::Train).await?;
                filter_by_route(all, from, to)
            }
        };

        for audit in &mut audits {
            audit.annotate_scores();
        }
        Ok(audits)
    }

    /// Completion time of the location's latest audit, or `"--"`. Issues its
    /// own store lookup, separate from the one behind the `audits` field.
    pub async fn last_audit_date(
        &self,
        kind: LocationKind,
        name: &str,
    ) -> Result<String, StoreError> {
        let audits = self
            .store
            .lookup_audits_for_location(kind, name)
            .await?;
        Ok(last_audit_date(&audits))
    }

    pub async fn stations(&self, name: Option<&str>) -> QueryResponse<Vec<StationView>> {
        let stations = filter_by_name(self.catalog.stations.clone(), name);
        let resolved = join_all(
            stations
                .into_iter()
                .enumerate()
                .map(|(index, station)| self.resolve_station(index, station)),
        )
        .await;
        collect_views(resolved)
    }

    pub async fn depots(
        &self,
        name: Option<&str>,
        origin: CallerOrigin,
    ) -> QueryResponse<Vec<LocationView>> {
        if origin == CallerOrigin::Sqms {
            return QueryResponse::resolved(Vec::new(), Vec::new());
        }
        let depots = filter_by_name(self.catalog.depots.clone(), name);
        self.resolve_locations("depots", LocationKind::Depot, depots)
            .await
    }

    pub async fn offices(
        &self,
        name: Option<&str>,
        origin: CallerOrigin,
    ) -> QueryResponse<Vec<LocationView>> {
        if origin == CallerOrigin::Sqms {
            return QueryResponse::resolved(Vec::new(), Vec::new());
        }
        let offices = filter_by_name(self.catalog.offices.clone(), name);
        self.resolve_locations("offices", LocationKind::Office, offices)
            .await
    }

    pub async fn trains(&self, from: Option<&str>, to: Option<&str>) -> QueryResponse<TrainView> {
        match self.fetch_audits(AuditLookup::Route { from, to }).await {
            Ok(audits) => QueryResponse::resolved(TrainView { audits }, Vec::new()),
            Err(err) => {
                warn!(error = %err, "train audit lookup failed");
                QueryResponse::failed(FieldError::new(vec!["trains".into()], err.to_string()))
            }
        }
    }

    async fn resolve_station(
        &self,
        index: usize,
        station: Station,
    ) -> (StationView, Vec<FieldError>) {
        let path = |field: &'static str| -> Vec<PathSegment> {
            vec!["stations".into(), index.into(), field.into()]
        };
        let mut errors = Vec::new();

        let platforms = match normalize_platforms(&station.platforms) {
            Ok(labels) => Some(labels),
            Err(err) => {
                warn!(station = %station.name, error = %err, "catalog platform label rejected");
                errors.push(FieldError::new(path("platforms"), err.to_string()));
                None
            }
        };

        let (last_audit_date, audits) = self
            .resolve_history(LocationKind::Station, &station.name)
            .await;
        let last_audit_date = capture(last_audit_date, path("lastAuditDate"), &mut errors);
        let audits = capture(audits, path("audits"), &mut errors);

        let view = StationView {
            name: station.name,
            latitude: station.latitude,
            longitude: station.longitude,
            platforms,
            last_audit_date,
            audits,
        };
        (view, errors)
    }

    async fn resolve_locations<T: Named>(
        &self,
        root: &'static str,
        kind: LocationKind,
        items: Vec<T>,
    ) -> QueryResponse<Vec<LocationView>> {
        let resolved = join_all(
            items
                .into_iter()
                .enumerate()
                .map(|(index, item)| {
                    self.resolve_location(root, kind, index, item.name().to_string())
                }),
        )
        .await;
        collect_views(resolved)
    }

    async fn resolve_location(
        &self,
        root: &'static str,
        kind: LocationKind,
        index: usize,
        name: String,
    ) -> (LocationView, Vec<FieldError>) {
        let path = |field: &'static str| -> Vec<PathSegment> {
            vec![root.into(), index.into(), field.into()]
        };
        let mut errors = Vec::new();

        let (last_audit_date, audits) = self.resolve_history(kind, &name).await;
        let view = LocationView {
            last_audit_date: capture(last_audit_date, path("lastAuditDate"), &mut errors),
            audits: capture(audits, path("audits"), &mut errors),
            name,
        };
        (view, errors)
    }

    /// `lastAuditDate` and `audits` resolve as independent fields, each with
    /// its own lookup, so one failing does not null the other.
    async fn resolve_history(
        &self,
        kind: LocationKind,
        name: &str,
    ) -> (Result<String, StoreError>, Result<Vec<Audit>, StoreError>) {
        tokio::join!(
            self.last_audit_date(kind, name),
            self.fetch_audits(AuditLookup::Location { kind, name }),
        )
    }
}

fn capture<T>(
    result: Result<T, StoreError>,
    path: Vec<PathSegment>,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(error = %err, "audit lookup failed");
            errors.push(FieldError::new(path, err.to_string()));
            None
        }
    }
}

fn collect_views<V>(resolved: Vec<(V, Vec<FieldError>)>) -> QueryResponse<Vec<V>> {
    let mut views = Vec::with_capacity(resolved.len());
    let mut errors = Vec::new();
    for (view, view_errors) in resolved {
        views.push(view);
        errors.extend(view_errors);
    }
    QueryResponse::resolved(views, errors)
}
