use ef_core::units::constants::AMBIENT_K;
use ef_props::{CorrelationEvaluator, database};
use ef_sim::{run_simulation, run_steady_state};
use std::path::Path;

fn root() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn bundled_scenarios_load_and_run() {
    let table = database::load(&root().join("../../data/chemicals.yaml")).unwrap();
    let eval = CorrelationEvaluator::new(&table);
    let scenarios = [
        "water_6ft_hood.yaml",
        "acetone_ethanol.yaml",
        "manual_entry.yaml",
    ];

    for name in scenarios {
        let path = root().join("../../scenarios").join(name);
        let scenario = ef_scenario::load(&path)
            .unwrap_or_else(|e| panic!("Failed to load {}: {}", name, e));
        let request = scenario.to_request();
        let report = run_simulation(&request, &eval)
            .unwrap_or_else(|e| panic!("Failed to run {}: {}", name, e));
        assert!(report.peak_rate_g_per_s > 0.0, "{name}");
        run_steady_state(&request, &eval)
            .unwrap_or_else(|e| panic!("Failed steady state {}: {}", name, e));
    }
}

#[test]
fn request_carries_scenario_values() {
    let path = root().join("../../scenarios/water_6ft_hood.yaml");
    let request = ef_scenario::load(&path).unwrap().to_request();

    let hood = request.hood().unwrap();
    assert!((hood.length_m - 6.0 * 0.3048).abs() < 1e-12);
    assert!((hood.depth_m - 2.5 * 0.3048).abs() < 1e-12);
    assert!((hood.face_velocity_mps - 100.0 * 0.3048 / 60.0).abs() < 1e-12);
    assert!((request.spill_volume.unwrap().value - 6.2).abs() < 1e-12);
    assert!((request.ambient_temperature.value - AMBIENT_K).abs() < 1e-9);
    assert_eq!(request.components.len(), 1);
    assert!(request.sash().unwrap().is_some());
}
