//! Query surface over the catalog and the audit store: name and route
//! filtering, per-location audit history, and score projection.

pub mod filters;
pub mod router;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use filters::{filter_by_name, filter_by_route};
pub use router::{audit_router, CALLER_ORIGIN_HEADER};
pub use service::{AuditLookup, AuditQueryService, CallerOrigin};
pub use views::{FieldError, LocationView, PathSegment, QueryResponse, StationView, TrainView};
