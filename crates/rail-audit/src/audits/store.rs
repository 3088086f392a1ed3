use super::domain::{Audit, LocationKind};
use crate::error::DataLoadError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// Lookup surface over previously filed audits.
///
/// Implementations own ordering: `lookup_audits_for_location` must return
/// audits most recently completed first, and an empty list (not an error) for
/// unknown locations.
#[async_trait]
pub trait AuditStore: Send + Sync {
    async fn lookup_audits_for_location(
        &self,
        kind: LocationKind,
        name: &str,
    ) -> Result<Vec<Audit>, StoreError>;

    /// Every audit of the given kind, in no particular order.
    async fn lookup_all_audits(&self, kind: LocationKind) -> Result<Vec<Audit>, StoreError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("audit store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Default, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    station: HashMap<String, Vec<Audit>>,
    #[serde(default)]
    depot: HashMap<String, Vec<Audit>>,
    #[serde(default)]
    office: HashMap<String, Vec<Audit>>,
    #[serde(default)]
    train: HashMap<String, Vec<Audit>>,
}

/// Read-only store backed by a JSON document loaded at startup.
#[derive(Debug, Default, Clone)]
pub struct InMemoryAuditStore {
    audits: HashMap<LocationKind, HashMap<String, Vec<Audit>>>,
}

impl InMemoryAuditStore {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DataLoadError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataLoadError> {
        let document: StoreDocument = serde_json::from_reader(reader)?;
        let mut store = Self::default();
        for (kind, locations) in [
            (LocationKind::Station, document.station),
            (LocationKind::Depot, document.depot),
            (LocationKind::Office, document.office),
            (LocationKind::Train, document.train),
        ] {
            for (name, audits) in locations {
                store.insert(kind, name, audits);
            }
        }
        Ok(store)
    }

    /// Add audits for a location, keeping the per-location list ordered.
    pub fn insert(&mut self, kind: LocationKind, name: impl Into<String>, audits: Vec<Audit>) {
        let entry = self
            .audits
            .entry(kind)
            .or_default()
            .entry(name.into())
            .or_default();
        entry.extend(audits);
        entry.sort_by(most_recent_first);
    }

    pub fn location_count(&self, kind: LocationKind) -> usize {
        self.audits.get(&kind).map(HashMap::len).unwrap_or(0)
    }
}

#[async_trait]
impl AuditStore for InMemoryAuditStore {
    async fn lookup_audits_for_location(
        &self,
        kind: LocationKind,
        name: &str,
    ) -> Result<Vec<Audit>, StoreError> {
        Ok(self
            .audits
            .get(&kind)
            .and_then(|locations| locations.get(name))
            .cloned()
            .unwrap_or_default())
    }

    async fn lookup_all_audits(&self, kind: LocationKind) -> Result<Vec<Audit>, StoreError> {
        Ok(self
            .audits
            .get(&kind)
            .map(|locations| locations.values().flatten().cloned().collect())
            .unwrap_or_default())
    }
}

/// Descending by completion time. Parseable timestamps rank above ones that
/// only compare as strings; in-progress audits go last.
fn most_recent_first(a: &Audit, b: &Audit) -> Ordering {
    completion_key(b).cmp(&completion_key(a))
}

/// Ascending sort key; variant order ranks the classes.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum CompletionKey<'a> {
    InProgress,
    Unparsed(&'a str),
    Instant(NaiveDateTime),
}

fn completion_key(audit: &Audit) -> CompletionKey<'_> {
    match audit.complete_time.as_deref() {
        None => CompletionKey::InProgress,
        Some(raw) => completion_instant(raw)
            .map(CompletionKey::Instant)
            .unwrap_or(CompletionKey::Unparsed(raw)),
    }
}

fn completion_instant(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.naive_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn audit(id: &str, complete_time: Option<&str>) -> Audit {
        Audit {
            id: id.to_string(),
            complete_time: complete_time.map(str::to_string),
            ..Audit::default()
        }
    }

    fn ids(audits: &[Audit]) -> Vec<&str> {
        audits.iter().map(|audit| audit.id.as_str()).collect()
    }

    #[tokio::test]
    async fn location_lookup_is_most_recent_first() {
        let mut store = InMemoryAuditStore::default();
        store.insert(
            LocationKind::Station,
            "Leeds",
            vec![
                audit("old", Some("2024-01-01")),
                audit("open", None),
                audit("new", Some("2024-05-01T09:30:00Z")),
                audit("mid", Some("2024-03-12")),
            ],
        );

        let audits = store
            .lookup_audits_for_location(LocationKind::Station, "Leeds")
            .await
            .expect("lookup succeeds");
        assert_eq!(ids(&audits), vec!["new", "mid", "old", "open"]);
    }

    #[test]
    fn unparseable_completion_times_rank_below_timestamps() {
        let expected = vec!["offset", "date", "garbled", "open"];
        let inputs = [
            ["date", "offset", "garbled", "open"],
            ["garbled", "open", "offset", "date"],
            ["open", "garbled", "date", "offset"],
        ];
        for order in inputs {
            let audits = order
                .iter()
                .map(|id| match *id {
                    "date" => audit(id, Some("2024-01-02")),
                    "offset" => audit(id, Some("2024-01-01T23:00:00-05:00")),
                    "garbled" => audit(id, Some("2024-01-01Z")),
                    _ => audit(id, None),
                })
                .collect();
            let mut store = InMemoryAuditStore::default();
            store.insert(LocationKind::Station, "Leeds", audits);
            let sorted = &store.audits[&LocationKind::Station]["Leeds"];
            assert_eq!(ids(sorted), expected);
        }
    }

    #[test]
    fn unparseable_completion_times_sort_descending_as_strings() {
        let mut store = InMemoryAuditStore::default();
        store.insert(
            LocationKind::Depot,
            "Selhurst",
            vec![
                audit("a", Some("spring 2023")),
                audit("c", Some("winter 2023")),
                audit("b", Some("summer 2023")),
            ],
        );
        let sorted = &store.audits[&LocationKind::Depot]["Selhurst"];
        assert_eq!(ids(sorted), vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn unknown_location_returns_empty() {
        let store = InMemoryAuditStore::default();
        let audits = store
            .lookup_audits_for_location(LocationKind::Depot, "Nowhere")
            .await
            .expect("unknown locations are not an error");
        assert!(audits.is_empty());
    }

    #[tokio::test]
    async fn loads_document_by_kind() {
        let json = r#"{
            "station": { "York": [{ "id": "s-1", "completeTime": "2024-02-01" }] },
            "train": {
                "1A01": [{ "id": "t-1", "departureStation": "York", "arrivalStation": "Leeds" }],
                "1A02": [{ "id": "t-2", "departureStation": "Leeds", "arrivalStation": "York" }]
            }
        }"#;
        let store = InMemoryAuditStore::from_reader(Cursor::new(json)).expect("store loads");

        assert_eq!(store.location_count(LocationKind::Station), 1);
        assert_eq!(store.location_count(LocationKind::Office), 0);

        let mut trains = store
            .lookup_all_audits(LocationKind::Train)
            .await
            .expect("lookup succeeds");
        trains.sort_by(|a, b| a.id.cmp(&b.id));
        assert_eq!(ids(&trains), vec!["t-1", "t-2"]);

        let stations = store
            .lookup_audits_for_location(LocationKind::Station, "York")
            .await
            .expect("lookup succeeds");
        assert_eq!(stations[0].complete_time.as_deref(), Some("2024-02-01"));
    }

    #[test]
    fn rejects_malformed_documents() {
        let result = InMemoryAuditStore::from_reader(Cursor::new("{ \"station\": [] }"));
        assert!(matches!(result, Err(DataLoadError::Json(_))));
    }
}
