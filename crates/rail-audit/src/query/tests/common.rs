use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::audits::{
    Answer, Audit, AuditStore, LocationKind, Platform, Section, StoreError, SubSection,
};
use crate::catalog::{Catalog, Depot, Office, Station};
use crate::query::AuditQueryService;

pub(super) fn catalog() -> Catalog {
    Catalog {
        stations: vec![
            Station {
                name: "Brighton".to_string(),
                latitude: 50.8289,
                longitude: -0.1410,
                platforms: vec![
                    "Platform 3".to_string(),
                    "Platform 12a".to_string(),
                    "Platform 1".to_string(),
                ],
            },
            Station {
                name: "Hove".to_string(),
                latitude: 50.8352,
                longitude: -0.1706,
                platforms: vec!["Platform 1".to_string(), "Bay".to_string()],
            },
        ],
        depots: vec![
            Depot {
                name: "Selhurst".to_string(),
            },
            Depot {
                name: "Lovers Walk".to_string(),
            },
        ],
        offices: vec![Office {
            name: "Croydon".to_string(),
        }],
    }
}

pub(super) fn answer(selected: bool, icon: Option<&str>) -> Answer {
    Answer {
        value: Some("Checked".to_string()),
        selected: Some(selected),
        photos: None,
        comment: None,
        icon_name: icon.map(str::to_string),
    }
}

/// One selected scored answer and one selected informational answer.
pub(super) fn mixed_sub_section(title: &str) -> SubSection {
    SubSection {
        title: Some(title.to_string()),
        comment: None,
        answers: vec![answer(true, None), answer(true, Some("info"))],
        score: None,
    }
}

pub(super) fn concourse_audit(id: &str, complete_time: &str) -> Audit {
    Audit {
        id: id.to_string(),
        start_time: Some("2024-04-30T08:00:00Z".to_string()),
        complete_time: Some(complete_time.to_string()),
        username: Some("auditor-7".to_string()),
        sections: vec![Section {
            title: Some("Concourse".to_string()),
            comment: None,
            platforms: Vec::new(),
            sub_sections: vec![mixed_sub_section("Lighting"), mixed_sub_section("Signage")],
            score: None,
        }],
        ..Audit::default()
    }
}

pub(super) fn platform_audit(id: &str, complete_time: &str) -> Audit {
    Audit {
        id: id.to_string(),
        complete_time: Some(complete_time.to_string()),
        sections: vec![Section {
            title: Some("Platforms".to_string()),
            platforms: vec![
                Platform {
                    platform: Some("1".to_string()),
                    sub_sections: vec![mixed_sub_section("Seating")],
                    score: None,
                },
                Platform {
                    platform: Some("12a".to_string()),
                    sub_sections: vec![mixed_sub_section("Seating"), mixed_sub_section("Bins")],
                    score: None,
                },
            ],
            ..Section::default()
        }],
        ..Audit::default()
    }
}

pub(super) fn journey(id: &str, from: &str, to: &str) -> Audit {
    Audit {
        id: id.to_string(),
        complete_time: Some("2024-03-01".to_string()),
        departure_station: Some(from.to_string()),
        departure_time: Some("07:15".to_string()),
        arrival_station: Some(to.to_string()),
        arrival_time: Some("08:02".to_string()),
        sections: vec![Section {
            title: Some("Carriage".to_string()),
            sub_sections: vec![mixed_sub_section("Toilets")],
            ..Section::default()
        }],
        ..Audit::default()
    }
}

/// Store returning canned audit lists in the order given.
#[derive(Default)]
pub(super) struct MemoryStore {
    pub(super) locations: HashMap<(LocationKind, String), Vec<Audit>>,
    pub(super) lookups: AtomicUsize,
}

impl MemoryStore {
    pub(super) fn with(mut self, kind: LocationKind, name: &str, audits: Vec<Audit>) -> Self {
        self.locations.insert((kind, name.to_string()), audits);
        self
    }

    pub(super) fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuditStore for MemoryStore {
    async fn lookup_audits_for_location(
        &self,
        kind: LocationKind,
        name: &str,
    ) -> Result<Vec<Audit>, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .locations
            .get(&(kind, name.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn lookup_all_audits(&self, kind: LocationKind) -> Result<Vec<Audit>, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .locations
            .iter()
            .filter(|((entry_kind, _), _)| *entry_kind == kind)
            .flat_map(|(_, audits)| audits.iter().cloned())
            .collect())
    }
}

pub(super) struct UnavailableStore;

#[async_trait]
impl AuditStore for UnavailableStore {
    async fn lookup_audits_for_location(
        &self,
        _kind: LocationKind,
        _name: &str,
    ) -> Result<Vec<Audit>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    async fn lookup_all_audits(&self, _kind: LocationKind) -> Result<Vec<Audit>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

/// Fails lookups for a single location name only.
pub(super) struct FailingLocationStore {
    pub(super) inner: MemoryStore,
    pub(super) failing: &'static str,
}

#[async_trait]
impl AuditStore for FailingLocationStore {
    async fn lookup_audits_for_location(
        &self,
        kind: LocationKind,
        name: &str,
    ) -> Result<Vec<Audit>, StoreError> {
        if name == self.failing {
            return Err(StoreError::Unavailable(format!("{name} shard offline")));
        }
        self.inner.lookup_audits_for_location(kind, name).await
    }

    async fn lookup_all_audits(&self, kind: LocationKind) -> Result<Vec<Audit>, StoreError> {
        self.inner.lookup_all_audits(kind).await
    }
}

pub(super) fn build_service<S: AuditStore + 'static>(store: S) -> AuditQueryService<S> {
    AuditQueryService::new(Arc::new(catalog()), Arc::new(store))
}

pub(super) fn seeded_store() -> MemoryStore {
    MemoryStore::default()
        .with(
            LocationKind::Station,
            "Brighton",
            vec![
                concourse_audit("stn-2", "2024-05-01"),
                platform_audit("stn-1", "2024-01-01"),
            ],
        )
        .with(
            LocationKind::Depot,
            "Selhurst",
            vec![concourse_audit("dep-1", "2023-11-20")],
        )
        .with(
            LocationKind::Train,
            "1A01",
            vec![journey("trn-1", "Brighton", "London Victoria")],
        )
        .with(
            LocationKind::Train,
            "1A02",
            vec![journey("trn-2", "London Victoria", "Brighton")],
        )
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
