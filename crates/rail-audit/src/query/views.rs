use crate::audits::Audit;
use serde::Serialize;

/// One step in the path to a field that failed to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Field(&'static str),
    Index(usize),
}

impl From<&'static str> for PathSegment {
    fn from(value: &'static str) -> Self {
        Self::Field(value)
    }
}

impl From<usize> for PathSegment {
    fn from(value: usize) -> Self {
        Self::Index(value)
    }
}

/// Error entry reported alongside a `null` field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub path: Vec<PathSegment>,
    pub message: String,
}

impl FieldError {
    pub fn new(path: Vec<PathSegment>, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }
}

/// Response envelope: resolved data plus any field-level failures.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse<T> {
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl<T> QueryResponse<T> {
    pub fn resolved(data: T, errors: Vec<FieldError>) -> Self {
        Self {
            data: Some(data),
            errors,
        }
    }

    pub fn failed(error: FieldError) -> Self {
        Self {
            data: None,
            errors: vec![error],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationView {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub platforms: Option<Vec<String>>,
    pub last_audit_date: Option<String>,
    pub audits: Option<Vec<Audit>>,
}

/// Depot or office projection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationView {
    pub name: String,
    pub last_audit_date: Option<String>,
    pub audits: Option<Vec<Audit>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrainView {
    pub audits: Vec<Audit>,
}
