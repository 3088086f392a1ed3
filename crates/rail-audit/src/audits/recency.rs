use super::domain::Audit;

/// Placeholder reported for locations that have never been audited.
pub const NO_AUDITS_YET: &str = "--";

/// Completion time of the most recent audit.
///
/// Expects `audits` ordered most recent first, as returned by
/// [`AuditStore::lookup_audits_for_location`](super::store::AuditStore). The
/// order is not checked here; an unordered input simply yields whichever
/// audit comes first.
pub fn last_audit_date(audits: &[Audit]) -> String {
    audits
        .first()
        .and_then(|latest| latest.complete_time.clone())
        .unwrap_or_else(|| NO_AUDITS_YET.to_string())
}
