//! Satellite-derived vegetation index models

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Satellite-derived vegetation indices for one location at a point in time.
///
/// The key set is open: providers may report ndvi, evi, savi or any other
/// index, and unknown keys are passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VegetationIndices {
    pub timestamp: DateTime<Utc>,
    pub indices: BTreeMap<String, f64>,
}

impl VegetationIndices {
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            indices: BTreeMap::new(),
        }
    }

    pub fn with_index(mut self, name: &str, value: f64) -> Self {
        self.indices.insert(name.to_string(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.indices.get(name).copied()
    }

    pub fn ndvi(&self) -> Option<f64> {
        self.get("ndvi")
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
