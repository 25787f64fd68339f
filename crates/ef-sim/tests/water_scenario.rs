//! Integration test: pure water spill in a 6 ft hood.
//!
//! Properties come from the sample database through the correlation evaluator,
//! so this exercises loader → evaluator → mixture → pool → report.

use ef_core::units::{fpm, ft, ml};
use ef_props::{AmountBasis, CAS_WATER, CorrelationEvaluator, CorrelationTable, database};
use ef_sim::{PoolOptions, SimulationRequest, run_simulation, run_steady_state};
use std::path::PathBuf;

fn table() -> CorrelationTable {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/chemicals.yaml");
    database::load(&path).unwrap()
}

fn water_request() -> SimulationRequest {
    SimulationRequest::default()
        .with_component(CAS_WATER, 100.0, AmountBasis::Mass)
        .with_hood(ft(6.0), ft(2.5), fpm(100.0))
        .with_spill_volume(ml(6_200_000.0))
}

#[test]
fn water_spill_report() {
    let table = table();
    let eval = CorrelationEvaluator::new(&table);
    let report = run_simulation(&water_request(), &eval).unwrap();

    assert!(report.peak_rate_g_per_s.is_finite());
    assert!(report.peak_rate_g_per_s > 0.0);
    assert!(report.peak_time_s > 0.0 && report.peak_time_s <= 3600.0);

    let c = report.checkpoints;
    assert!(0.0 < c.at_10_s_g);
    assert!(c.at_10_s_g < c.at_60_s_g);
    assert!(c.at_60_s_g < c.at_3600_s_g);

    assert!(report.substituted_properties.is_empty());
    assert_eq!(report.time_to_full_evaporation_s, None);
    assert!((report.liquid.molar_mass - 18.015).abs() < 1e-12);
    assert!(report.liquid.density_kg_m3 > 990.0 && report.liquid.density_kg_m3 < 1005.0);
    assert!(report.history.is_empty());
}

#[test]
fn pool_never_exceeds_steady_state_footprint_rate() {
    // The steady-state mode assumes the whole footprint is wetted; the pool is a
    // circle inscribed in the same area, so its rate cannot be higher.
    let table = table();
    let eval = CorrelationEvaluator::new(&table);
    let request = water_request();
    let pool = run_simulation(&request, &eval).unwrap();
    let steady = run_steady_state(&request, &eval).unwrap();
    assert!(pool.peak_rate_g_per_s <= steady.rate_g_per_s * (1.0 + 1e-12));
}

#[test]
fn history_is_recorded_on_request() {
    let table = table();
    let eval = CorrelationEvaluator::new(&table);
    let mut request = water_request();
    request.options = PoolOptions {
        record_every: 60,
        ..PoolOptions::default()
    };
    let report = run_simulation(&request, &eval).unwrap();
    assert_eq!(report.history.len(), 60);
    assert_eq!(report.history.t.first(), Some(&60.0));
    assert_eq!(report.history.t.last(), Some(&3600.0));
}

#[test]
fn unknown_chemical_runs_on_water_properties() {
    let table = table();
    let eval = CorrelationEvaluator::new(&table);
    let request = SimulationRequest::default()
        .with_component("0-00-0", 1.0, AmountBasis::Molar)
        .with_hood(ft(6.0), ft(2.5), fpm(100.0))
        .with_spill_volume(ml(1000.0));
    let report = run_simulation(&request, &eval).unwrap();
    assert_eq!(report.substituted_properties.len(), 3);
    assert!(report.peak_rate_g_per_s > 0.0);
}
