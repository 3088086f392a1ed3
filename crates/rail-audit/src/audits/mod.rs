pub mod domain;
pub mod recency;
pub mod scoring;
pub mod store;

pub use domain::{Answer, Audit, LocationKind, Platform, Section, SubSection};
pub use recency::{last_audit_date, NO_AUDITS_YET};
pub use scoring::{answer_score, Scored};
pub use store::{AuditStore, InMemoryAuditStore, StoreError};
