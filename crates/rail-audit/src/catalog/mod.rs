//! Static location catalog: stations with coordinates and platforms, plus the
//! depot and office names audits can be filed against.

pub mod platforms;

use crate::error::DataLoadError;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

pub use platforms::{normalize_platforms, MalformedPlatformLabel};

/// Anything listed by name in the catalog.
pub trait Named {
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Raw platform labels, e.g. `"Platform 12a"`.
    #[serde(default)]
    pub platforms: Vec<String>,
}

impl Named for Station {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Depot {
    pub name: String,
}

impl Named for Depot {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Office {
    pub name: String,
}

impl Named for Office {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub stations: Vec<Station>,
    #[serde(default)]
    pub depots: Vec<Depot>,
    #[serde(default)]
    pub offices: Vec<Office>,
}

impl Catalog {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DataLoadError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataLoadError> {
        Ok(serde_json::from_reader(reader)?)
    }
}
