//! Chemical identifiers and master records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// CAS number of water, the substitution reference for missing properties.
pub const CAS_WATER: &str = "7732-18-5";

/// Chemical identifier (CAS registry number).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChemicalId(String);

impl ChemicalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    pub fn water() -> Self {
        Self(CAS_WATER.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_water(&self) -> bool {
        self.0 == CAS_WATER
    }
}

impl From<&str> for ChemicalId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ChemicalId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for ChemicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Chemical master data consumed by the property engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChemicalRecord {
    pub id: ChemicalId,
    pub name: String,
    /// Molecular weight [g/mol = kg/kmol]
    pub molecular_weight: f64,
}

impl ChemicalRecord {
    pub fn new(id: impl Into<ChemicalId>, name: impl Into<String>, molecular_weight: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            molecular_weight,
        }
    }

    /// Case-insensitive match on name or CAS number. Empty queries match everything.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }

        self.name.to_ascii_lowercase().contains(&query) || self.id.as_str().contains(&query)
    }
}
