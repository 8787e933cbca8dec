//! Selectable forecast regions, flattened from the `offices` section of the
//! area catalog.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::RegionCode;

/// A forecast region as offered for selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub code: RegionCode,
    pub name: String,
    pub en_name: Option<String>,
    pub office_name: Option<String>,
}

impl Region {
    /// Case-insensitive substring match on the Japanese or English name.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&query)
            || self
                .en_name
                .as_deref()
                .is_some_and(|en| en.to_lowercase().contains(&query))
    }
}

/// All regions from one catalog response, in response order.
///
/// Built once at startup and never modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionCatalog {
    regions: Vec<Region>,
}

/// Shape of the area catalog response. Only `offices` is read.
#[derive(Debug, Deserialize)]
pub(crate) struct AreaDocument {
    #[serde(default)]
    pub(crate) offices: Map<String, Value>,
}

impl RegionCatalog {
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    /// Flatten the `offices` object into regions.
    ///
    /// Entries without a string `name` cannot be offered and are skipped.
    pub fn from_offices(offices: &Map<String, Value>) -> Self {
        let regions = offices
            .iter()
            .filter_map(|(code, info)| {
                let Some(name) = info.get("name").and_then(Value::as_str) else {
                    tracing::debug!("Skipping office {} without a name", code);
                    return None;
                };
                let text = |key: &str| info.get(key).and_then(Value::as_str).map(str::to_string);
                Some(Region {
                    code: RegionCode::new(code.as_str()),
                    name: name.to_string(),
                    en_name: text("enName"),
                    office_name: text("officeName"),
                })
            })
            .collect();

        Self { regions }
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    /// Region at a position in catalog order
    pub fn get_index(&self, index: usize) -> Option<&Region> {
        self.regions.get(index)
    }

    pub fn get(&self, code: &RegionCode) -> Option<&Region> {
        self.regions.iter().find(|r| &r.code == code)
    }

    /// Regions whose name matches `query`, paired with their catalog position
    pub fn search(&self, query: &str) -> impl Iterator<Item = (usize, &Region)> {
        let query = query.to_string();
        self.regions
            .iter()
            .enumerate()
            .filter(move |(_, r)| r.matches(&query))
    }
}
