//! Correlation evaluator: row selection plus equation-form dispatch.

use crate::chemical::ChemicalId;
use crate::equation::EquationForm;
use crate::error::{PropsError, PropsResult};
use crate::property::PropertyId;
use crate::provider::PropertyProvider;
use crate::table::{CorrelationRow, CorrelationTable};

/// How a correlation row was chosen for a temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowMatch {
    /// The temperature lies inside the row's valid range.
    InRange,
    /// No range contains the temperature; this row has the nearest boundary.
    /// The formula is still evaluated at the requested temperature.
    Nearest { distance_k: f64 },
}

/// A selected row with its parsed equation form.
#[derive(Debug, Clone, Copy)]
pub struct SelectedRow<'a> {
    pub row: &'a CorrelationRow,
    pub form: EquationForm,
    pub matched: RowMatch,
}

/// Pure evaluation layer over a borrowed [`CorrelationTable`].
#[derive(Debug, Clone, Copy)]
pub struct CorrelationEvaluator<'a> {
    table: &'a CorrelationTable,
}

impl<'a> CorrelationEvaluator<'a> {
    pub fn new(table: &'a CorrelationTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a CorrelationTable {
        self.table
    }

    /// Evaluate `property` of `chemical` at `t_k`.
    ///
    /// Returns `None` when no rows exist, the form id is unknown, a required
    /// constant is missing, the formula leaves its domain, or `integrated` is
    /// requested for a form without an integrated variant.
    pub fn evaluate(
        &self,
        chemical: &ChemicalId,
        property: PropertyId,
        t_k: f64,
        integrated: bool,
    ) -> Option<f64> {
        match self.try_evaluate(chemical, property, t_k, integrated) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::debug!(%chemical, %property, t_k, error = %err, "property unavailable");
                None
            }
        }
    }

    /// Like [`evaluate`](Self::evaluate) but reports why a value is missing.
    pub fn try_evaluate(
        &self,
        chemical: &ChemicalId,
        property: PropertyId,
        t_k: f64,
        integrated: bool,
    ) -> PropsResult<f64> {
        if !t_k.is_finite() {
            return Err(PropsError::InvalidArg {
                what: "temperature must be finite",
            });
        }

        let selected = self.select_row(chemical, property, t_k)?;
        let tc = if selected.form.needs_critical_temperature() {
            Some(self.critical_temperature(chemical).ok_or_else(|| {
                PropsError::MissingConstant {
                    chemical: chemical.to_string(),
                    property: PropertyId::CriticalTemperature,
                }
            })?)
        } else {
            None
        };

        selected
            .form
            .evaluate(&selected.row.coefficient_array(), t_k, tc, integrated)
    }

    /// Pick the row whose range contains `t_k`, else the row (with a known form)
    /// whose nearer range boundary is closest to `t_k`.
    pub fn select_row(
        &self,
        chemical: &ChemicalId,
        property: PropertyId,
        t_k: f64,
    ) -> PropsResult<SelectedRow<'a>> {
        let rows = self.table.rows(chemical, property);
        if rows.is_empty() {
            return Err(PropsError::NoCorrelation {
                chemical: chemical.to_string(),
                property,
            });
        }

        if let Some(row) = rows.iter().find(|row| row.contains(t_k)) {
            let form = EquationForm::from_id(row.form_id).ok_or(
                PropsError::UnknownEquationForm {
                    form_id: row.form_id,
                },
            )?;
            return Ok(SelectedRow {
                row,
                form,
                matched: RowMatch::InRange,
            });
        }

        let nearest = rows
            .iter()
            .filter_map(|row| EquationForm::from_id(row.form_id).map(|form| (row, form)))
            .min_by(|(a, _), (b, _)| {
                a.distance_to_range(t_k)
                    .total_cmp(&b.distance_to_range(t_k))
            });

        match nearest {
            Some((row, form)) => {
                let distance_k = row.distance_to_range(t_k);
                tracing::debug!(
                    %chemical,
                    %property,
                    t_k,
                    min_t = row.min_t,
                    max_t = row.max_t,
                    "temperature outside all correlation ranges, using nearest range"
                );
                Ok(SelectedRow {
                    row,
                    form,
                    matched: RowMatch::Nearest { distance_k },
                })
            }
            None => Err(PropsError::UnknownEquationForm {
                form_id: rows[0].form_id,
            }),
        }
    }

    pub fn critical_temperature(&self, chemical: &ChemicalId) -> Option<f64> {
        self.table
            .constant(chemical, PropertyId::CriticalTemperature)
    }
}

impl PropertyProvider for CorrelationEvaluator<'_> {
    fn name(&self) -> &str {
        "correlation-table"
    }

    fn property(&self, chemical: &ChemicalId, property: PropertyId, t_k: f64) -> Option<f64> {
        self.evaluate(chemical, property, t_k, false)
    }

    fn molar_mass(&self, chemical: &ChemicalId) -> Option<f64> {
        self.table.molar_mass(chemical)
    }
}
