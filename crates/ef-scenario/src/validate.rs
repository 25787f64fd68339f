//! Scenario validation logic.

use crate::schema::{ComponentDef, HoodDef, ManualDef, RunDef, Scenario};
use ef_sim::{MAX_DURATION_S, MAX_STEPS};
use std::collections::HashSet;
use std::time::Duration;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing value: {field} ({reason})")]
    MissingValue { field: String, reason: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be positive"))
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be non-negative"))
    }
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }

    positive("ambient_temperature_k", scenario.ambient_temperature_k)?;
    validate_hood(&scenario.hood)?;
    positive("spill.volume_ml", scenario.spill.volume_ml)?;
    validate_components(&scenario.components)?;
    validate_manual(scenario.manual.as_ref(), scenario.components.is_empty())?;
    validate_run(&scenario.run)?;

    Ok(())
}

fn validate_hood(hood: &HoodDef) -> Result<(), ValidationError> {
    positive("hood.length_ft", hood.length_ft)?;
    positive("hood.depth_ft", hood.depth_ft)?;
    positive("hood.face_velocity_fpm", hood.face_velocity_fpm)?;
    if let Some(sash) = &hood.sash {
        positive("hood.sash.height_ft", sash.height_ft)?;
        positive("hood.sash.width_ft", sash.width_ft)?;
    }
    Ok(())
}

fn validate_components(components: &[ComponentDef]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for component in components {
        let id = component.chemical.trim();
        if id.is_empty() {
            return Err(ValidationError::MissingValue {
                field: "components.chemical".to_string(),
                reason: "chemical id is empty".to_string(),
            });
        }
        if !seen.insert(id) {
            return Err(ValidationError::DuplicateId {
                id: id.to_string(),
                context: "components".to_string(),
            });
        }
        non_negative("components.amount", component.amount)?;
    }

    if !components.is_empty() && components.iter().all(|c| c.amount == 0.0) {
        return Err(ValidationError::InvalidValue {
            field: "components.amount".to_string(),
            value: "0".to_string(),
            reason: "amounts sum to zero".to_string(),
        });
    }
    Ok(())
}

fn validate_manual(manual: Option<&ManualDef>, no_components: bool) -> Result<(), ValidationError> {
    let manual = manual.cloned().unwrap_or_default();

    if let Some(mw) = manual.molar_mass {
        positive("manual.molar_mass", mw)?;
    }
    if let Some(vp) = manual.vapor_pressure_pa {
        non_negative("manual.vapor_pressure_pa", vp)?;
    }
    if let Some(rho) = manual.density_kg_m3 {
        positive("manual.density_kg_m3", rho)?;
    }

    if no_components {
        let reason = "required when no components are listed".to_string();
        if manual.molar_mass.is_none() {
            return Err(ValidationError::MissingValue {
                field: "manual.molar_mass".to_string(),
                reason,
            });
        }
        if manual.vapor_pressure_pa.is_none() {
            return Err(ValidationError::MissingValue {
                field: "manual.vapor_pressure_pa".to_string(),
                reason,
            });
        }
    }
    Ok(())
}

fn validate_run(run: &RunDef) -> Result<(), ValidationError> {
    positive("run.dt_s", run.dt_s)?;
    positive("run.spill_duration_s", run.spill_duration_s)?;
    if !run.max_duration_s.is_finite() || run.max_duration_s < run.dt_s {
        return Err(invalid(
            "run.max_duration_s",
            run.max_duration_s,
            "must cover at least one step",
        ));
    }
    if run.max_duration_s > MAX_DURATION_S {
        return Err(invalid(
            "run.max_duration_s",
            run.max_duration_s,
            "must not exceed 3600 s",
        ));
    }
    if (run.max_duration_s / run.dt_s).ceil() > MAX_STEPS as f64 {
        return Err(invalid(
            "run.dt_s",
            run.dt_s,
            "too small for the run duration (at most 3600 steps)",
        ));
    }
    if let Some(timeout) = run.timeout_s {
        positive("run.timeout_s", timeout)?;
        if Duration::try_from_secs_f64(timeout).is_err() {
            return Err(invalid("run.timeout_s", timeout, "too large"));
        }
    }
    Ok(())
}
