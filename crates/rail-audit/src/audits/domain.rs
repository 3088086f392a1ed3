use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of place (or journey) an audit was filed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    Station,
    Depot,
    Office,
    Train,
}

impl LocationKind {
    pub const fn ordered() -> [Self; 4] {
        [Self::Station, Self::Depot, Self::Office, Self::Train]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Station => "station",
            Self::Depot => "depot",
            Self::Office => "office",
            Self::Train => "train",
        }
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A filed (or in-progress) inspection of a location or train journey.
///
/// Route fields are only populated for train audits. Timestamps are kept as
/// the strings stored upstream; ordering is the store's responsibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    pub id: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub complete_time: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_station: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_station: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// Top-level checklist grouping. A section may hold sub-sections directly,
/// platform partitions, both, or neither.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub sub_sections: Vec<SubSection>,
    #[serde(default, skip_deserializing)]
    pub score: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    /// Platform number as recorded by the auditor, e.g. `"12a"`.
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub sub_sections: Vec<SubSection>,
    #[serde(default, skip_deserializing)]
    pub score: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubSection {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, rename = "questions")]
    pub answers: Vec<Answer>,
    #[serde(default, skip_deserializing)]
    pub score: Option<u32>,
}

/// A single checklist response. Entries carrying an `iconName` are
/// informational and never scored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub selected: Option<bool>,
    #[serde(default)]
    pub photos: Option<Vec<String>>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub icon_name: Option<String>,
}

impl Answer {
    pub fn is_informational(&self) -> bool {
        self.icon_name
            .as_deref()
            .map(|icon| !icon.is_empty())
            .unwrap_or(false)
    }
}
