use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use super::service::{AuditQueryService, CallerOrigin};
use super::views::{LocationView, QueryResponse, StationView, TrainView};
use crate::audits::{Audit, AuditStore};
use crate::error::{AppError, DataLoadError};

/// Header carrying the upstream caller marker (see [`CallerOrigin`]).
pub const CALLER_ORIGIN_HEADER: &str = "x-caller-origin";

#[derive(Debug, Default, Deserialize)]
pub(crate) struct NameParams {
    pub(crate) name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RouteParams {
    pub(crate) from: Option<String>,
    pub(crate) to: Option<String>,
}

/// Router builder exposing the audit query surface.
pub fn audit_router<S>(service: Arc<AuditQueryService<S>>) -> Router
where
    S: AuditStore + 'static,
{
    Router::new()
        .route("/api/v1/stations", get(stations_handler::<S>))
        .route("/api/v1/depots", get(depots_handler::<S>))
        .route("/api/v1/offices", get(offices_handler::<S>))
        .route("/api/v1/trains", get(trains_handler::<S>))
        .route("/api/v1/audits/score", post(score_handler))
        .with_state(service)
}

pub(crate) async fn stations_handler<S>(
    State(service): State<Arc<AuditQueryService<S>>>,
    Query(params): Query<NameParams>,
) -> Json<QueryResponse<Vec<StationView>>>
where
    S: AuditStore + 'static,
{
    Json(service.stations(params.name.as_deref()).await)
}

pub(crate) async fn depots_handler<S>(
    State(service): State<Arc<AuditQueryService<S>>>,
    headers: HeaderMap,
    Query(params): Query<NameParams>,
) -> Json<QueryResponse<Vec<LocationView>>>
where
    S: AuditStore + 'static,
{
    let origin = caller_origin(&headers);
    Json(service.depots(params.name.as_deref(), origin).await)
}

pub(crate) async fn offices_handler<S>(
    State(service): State<Arc<AuditQueryService<S>>>,
    headers: HeaderMap,
    Query(params): Query<NameParams>,
) -> Json<QueryResponse<Vec<LocationView>>>
where
    S: AuditStore + 'static,
{
    let origin = caller_origin(&headers);
    Json(service.offices(params.name.as_deref(), origin).await)
}

pub(crate) async fn trains_handler<S>(
    State(service): State<Arc<AuditQueryService<S>>>,
    Query(params): Query<RouteParams>,
) -> Json<QueryResponse<TrainView>>
where
    S: AuditStore + 'static,
{
    Json(
        service
            .trains(params.from.as_deref(), params.to.as_deref())
            .await,
    )
}

/// Score an audit document supplied in the request body, without storing it.
pub(crate) async fn score_handler(body: String) -> Result<Json<Audit>, AppError> {
    let mut audit: Audit = serde_json::from_str(&body).map_err(DataLoadError::from)?;
    audit.annotate_scores();
    Ok(Json(audit))
}

fn caller_origin(headers: &HeaderMap) -> CallerOrigin {
    CallerOrigin::from_marker(
        headers
            .get(CALLER_ORIGIN_HEADER)
            .and_then(|value| value.to_str().ok()),
    )
}
