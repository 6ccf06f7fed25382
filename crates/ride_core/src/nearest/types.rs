use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// A driver or station that can be selected by a nearest search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub coordinate: Coordinate,
    /// Only active candidates participate in nearest searches.
    #[serde(default = "default_active")]
    pub active: bool,
    /// Free-form attributes supplied by the availability collaborator
    /// (display name, plate number, vehicle class, ...).
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

fn default_active() -> bool {
    true
}

impl Candidate {
    pub fn new(id: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id: id.into(),
            coordinate,
            active: true,
            metadata: BTreeMap::new(),
        }
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Outcome of a nearest search: the winning candidate and how far it is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest<'a> {
    pub candidate: &'a Candidate,
    /// Position of the winner in the input slice.
    pub index: usize,
    pub distance_m: f64,
}
