//! Schema migration framework.

use crate::ScenarioError;
use crate::schema::Scenario;

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut scenario: Scenario) -> Result<Scenario, ScenarioError> {
    while scenario.version < LATEST_VERSION {
        scenario = migrate_one_version(scenario)?;
    }
    Ok(scenario)
}

fn migrate_one_version(scenario: Scenario) -> Result<Scenario, ScenarioError> {
    match scenario.version {
        0 => migrate_v0_to_v1(scenario),
        v => Err(ScenarioError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

/// Version 0 files predate the version field; the layout is unchanged.
fn migrate_v0_to_v1(mut scenario: Scenario) -> Result<Scenario, ScenarioError> {
    scenario.version = 1;
    Ok(scenario)
}
