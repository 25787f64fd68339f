//! Immutable correlation store.
//!
//! Built once from loader output and then only read. Every evaluator and
//! simulation run borrows the same table; nothing mutates it after `new`.

use crate::chemical::{ChemicalId, ChemicalRecord};
use crate::error::{PropsError, PropsResult};
use crate::property::PropertyId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maximum number of coefficients carried by a correlation row (a..g).
pub const MAX_COEFFICIENTS: usize = 7;

/// One temperature-dependent correlation for a chemical property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationRow {
    pub chemical: ChemicalId,
    pub property: PropertyId,
    /// Raw equation form id (DIPPR numbering, e.g. 100, 101, 105).
    pub form_id: u16,
    /// Lower bound of the valid temperature range [K]
    pub min_t: f64,
    /// Upper bound of the valid temperature range [K]
    pub max_t: f64,
    /// Coefficients a..g; missing trailing entries read as zero.
    #[serde(default)]
    pub coefficients: Vec<f64>,
}

impl CorrelationRow {
    pub fn new(
        chemical: impl Into<ChemicalId>,
        property: PropertyId,
        form_id: u16,
        range: (f64, f64),
        coefficients: &[f64],
    ) -> Self {
        Self {
            chemical: chemical.into(),
            property,
            form_id,
            min_t: range.0,
            max_t: range.1,
            coefficients: coefficients.to_vec(),
        }
    }

    /// Coefficients padded to a..g.
    pub fn coefficient_array(&self) -> [f64; MAX_COEFFICIENTS] {
        let mut out = [0.0; MAX_COEFFICIENTS];
        for (slot, c) in out.iter_mut().zip(&self.coefficients) {
            *slot = *c;
        }
        out
    }

    pub fn contains(&self, t_k: f64) -> bool {
        t_k >= self.min_t && t_k <= self.max_t
    }

    /// Distance from `t_k` to the nearer boundary of the valid range.
    pub fn distance_to_range(&self, t_k: f64) -> f64 {
        (t_k - self.min_t).abs().min((t_k - self.max_t).abs())
    }

    fn validate(&self) -> PropsResult<()> {
        if !self.min_t.is_finite() || !self.max_t.is_finite() {
            return Err(PropsError::InvalidArg {
                what: "correlation temperature range must be finite",
            });
        }
        if self.min_t > self.max_t {
            return Err(PropsError::InvalidArg {
                what: "correlation min_t exceeds max_t",
            });
        }
        if self.coefficients.len() > MAX_COEFFICIENTS {
            return Err(PropsError::InvalidArg {
                what: "correlation has more than 7 coefficients",
            });
        }
        if self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(PropsError::InvalidArg {
                what: "correlation coefficient is not finite",
            });
        }
        Ok(())
    }
}

/// Scalar property constant (critical temperature, molecular weight, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantRow {
    pub chemical: ChemicalId,
    pub property: PropertyId,
    pub value: f64,
}

impl ConstantRow {
    pub fn new(chemical: impl Into<ChemicalId>, property: PropertyId, value: f64) -> Self {
        Self {
            chemical: chemical.into(),
            property,
            value,
        }
    }
}

/// Read-only store of chemical records, correlation rows and constants.
#[derive(Debug, Clone, Default)]
pub struct CorrelationTable {
    chemicals: HashMap<ChemicalId, ChemicalRecord>,
    rows: HashMap<ChemicalId, HashMap<PropertyId, Vec<CorrelationRow>>>,
    constants: HashMap<ChemicalId, HashMap<PropertyId, f64>>,
}

impl CorrelationTable {
    /// Build the store. Row order per chemical/property is preserved, so the
    /// first in-range row wins ties.
    ///
    /// Rows and constants tagged `PropertyId::Other` are dropped.
    pub fn new(
        chemicals: Vec<ChemicalRecord>,
        rows: Vec<CorrelationRow>,
        constants: Vec<ConstantRow>,
    ) -> PropsResult<Self> {
        let mut table = Self::default();

        for record in chemicals {
            if table.chemicals.contains_key(&record.id) {
                return Err(PropsError::InvalidArg {
                    what: "duplicate chemical id",
                });
            }
            table.chemicals.insert(record.id.clone(), record);
        }

        for row in rows {
            row.validate()?;
            if row.property == PropertyId::Other {
                continue;
            }
            table
                .rows
                .entry(row.chemical.clone())
                .or_default()
                .entry(row.property)
                .or_default()
                .push(row);
        }

        for constant in constants {
            if constant.property == PropertyId::Other {
                continue;
            }
            if !constant.value.is_finite() {
                return Err(PropsError::InvalidArg {
                    what: "constant value is not finite",
                });
            }
            table
                .constants
                .entry(constant.chemical)
                .or_default()
                .insert(constant.property, constant.value);
        }

        Ok(table)
    }

    pub fn chemical(&self, id: &ChemicalId) -> Option<&ChemicalRecord> {
        self.chemicals.get(id)
    }

    /// All chemical records, sorted by display name.
    pub fn chemicals(&self) -> Vec<&ChemicalRecord> {
        let mut all: Vec<&ChemicalRecord> = self.chemicals.values().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        all
    }

    /// Records whose name or CAS number contains `query`.
    pub fn search(&self, query: &str) -> Vec<&ChemicalRecord> {
        self.chemicals()
            .into_iter()
            .filter(|record| record.matches_query(query))
            .collect()
    }

    /// Coefficient rows for a chemical/property pair (empty if none).
    pub fn rows(&self, chemical: &ChemicalId, property: PropertyId) -> &[CorrelationRow] {
        self.rows
            .get(chemical)
            .and_then(|by_prop| by_prop.get(&property))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn constant(&self, chemical: &ChemicalId, property: PropertyId) -> Option<f64> {
        self.constants
            .get(chemical)
            .and_then(|by_prop| by_prop.get(&property))
            .copied()
    }

    /// Molecular weight from the master record, else from an `MW` constant row.
    pub fn molar_mass(&self, chemical: &ChemicalId) -> Option<f64> {
        self.chemical(chemical)
            .map(|record| record.molecular_weight)
            .filter(|mw| mw.is_finite() && *mw > 0.0)
            .or_else(|| {
                self.constant(chemical, PropertyId::MolecularWeight)
                    .filter(|mw| *mw > 0.0)
            })
    }

    pub fn chemical_count(&self) -> usize {
        self.chemicals.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows
            .values()
            .flat_map(|by_prop| by_prop.values())
            .map(Vec::len)
            .sum()
    }
}
