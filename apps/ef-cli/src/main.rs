use clap::{Parser, Subcommand};
use ef_props::{
    ChemicalId, CorrelationEvaluator, CorrelationTable, PropertyId, RowMatch, Substitution,
};
use ef_scenario::Scenario;
use ef_sim::{EvaporationReport, SimRecord};
use std::path::{Path, PathBuf};
use std::time::Instant;

mod error;

use error::{CliError, CliResult};

#[derive(Parser)]
#[command(name = "ef-cli")]
#[command(about = "evapflow CLI - chemical spill evaporation in a fume hood", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one property correlation at a temperature
    Evaluate {
        /// Path to the property database (YAML or JSON)
        db_path: PathBuf,
        /// CAS number or chemical name
        chemical: String,
        /// Property code (VP, LDN, ST, LVS, LCP, ICP, HVP)
        property: String,
        /// Temperature in kelvin
        temperature: f64,
        /// Evaluate the integrated form (ICP and LCP only)
        #[arg(long)]
        integrated: bool,
    },
    /// Run the transient pool simulation for a scenario
    Run {
        /// Path to the property database (YAML or JSON)
        db_path: PathBuf,
        /// Path to the scenario file
        scenario_path: PathBuf,
        /// Write the recorded history as CSV (set run.record_every in the scenario)
        #[arg(long)]
        history: Option<PathBuf>,
        /// Print the full report as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Compute the steady-state evaporation rate for a scenario
    Steady {
        /// Path to the property database (YAML or JSON)
        db_path: PathBuf,
        /// Path to the scenario file
        scenario_path: PathBuf,
        /// Print the full report as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Validate scenario file syntax and values
    Validate {
        /// Path to the scenario file
        scenario_path: PathBuf,
    },
    /// List chemicals in a property database
    Chemicals {
        /// Path to the property database (YAML or JSON)
        db_path: PathBuf,
        /// Filter by name or CAS substring
        query: Option<String>,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate {
            db_path,
            chemical,
            property,
            temperature,
            integrated,
        } => cmd_evaluate(&db_path, &chemical, &property, temperature, integrated),
        Commands::Run {
            db_path,
            scenario_path,
            history,
            json,
        } => cmd_run(&db_path, &scenario_path, history.as_deref(), json),
        Commands::Steady {
            db_path,
            scenario_path,
            json,
        } => cmd_steady(&db_path, &scenario_path, json),
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Chemicals { db_path, query } => cmd_chemicals(&db_path, query.as_deref()),
    }
}

fn load_database(path: &Path) -> CliResult<CorrelationTable> {
    let table = ef_props::database::load(path).map_err(|source| CliError::Database {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(
        path = %path.display(),
        chemicals = table.chemical_count(),
        rows = table.row_count(),
        "property database loaded"
    );
    Ok(table)
}

fn load_scenario(path: &Path) -> CliResult<Scenario> {
    ef_scenario::load(path).map_err(|source| CliError::Scenario {
        path: path.to_path_buf(),
        source,
    })
}

/// Accept a CAS number as stored, else an exact (case-insensitive) name.
fn lookup_chemical(table: &CorrelationTable, query: &str) -> CliResult<ChemicalId> {
    let id = ChemicalId::from(query.trim());
    if table.chemical(&id).is_some() {
        return Ok(id);
    }
    table
        .chemicals()
        .into_iter()
        .find(|record| record.name.eq_ignore_ascii_case(query.trim()))
        .map(|record| record.id.clone())
        .ok_or_else(|| CliError::UnknownChemical(query.to_string()))
}

fn cmd_evaluate(
    db_path: &Path,
    chemical: &str,
    property: &str,
    temperature: f64,
    integrated: bool,
) -> CliResult<()> {
    let table = load_database(db_path)?;
    let id = lookup_chemical(&table, chemical)?;
    let property_id = PropertyId::from_key(property)
        .filter(|p| !matches!(p, PropertyId::CriticalTemperature | PropertyId::MolecularWeight))
        .ok_or_else(|| CliError::UnknownProperty(property.to_string()))?;

    let eval = CorrelationEvaluator::new(&table);
    let selected = eval.select_row(&id, property_id, temperature)?;
    let value = eval.try_evaluate(&id, property_id, temperature, integrated)?;

    let name = table
        .chemical(&id)
        .map(|record| record.name.as_str())
        .unwrap_or(id.as_str());
    println!(
        "{} of {} at {:.2} K: {}",
        property_id.display_name(),
        name,
        temperature,
        value
    );
    println!(
        "  Form {} ({}), valid {:.2} - {:.2} K",
        selected.form.id(),
        selected.form.name(),
        selected.row.min_t,
        selected.row.max_t
    );
    if let RowMatch::Nearest { distance_k } = selected.matched {
        println!(
            "  Outside all ranges; nearest range used ({:.2} K away)",
            distance_k
        );
    }
    Ok(())
}

fn print_substitutions(substitutions: &[Substitution]) {
    if substitutions.is_empty() {
        return;
    }
    println!("\nSubstituted properties:");
    for sub in substitutions {
        println!("  {}", sub);
    }
}

fn print_concentration(ppm: Option<f64>) {
    if let Some(ppm) = ppm {
        println!("  Breathing-zone estimate: {:.1} ppm", ppm);
    }
}

fn cmd_run(
    db_path: &Path,
    scenario_path: &Path,
    history: Option<&Path>,
    json: bool,
) -> CliResult<()> {
    let table = load_database(db_path)?;
    let scenario = load_scenario(scenario_path)?;
    let eval = CorrelationEvaluator::new(&table);

    tracing::info!(scenario = %scenario.name, "starting pool simulation");
    let start = Instant::now();
    let report = ef_sim::run_simulation(&scenario.to_request(), &eval)?;
    let elapsed = start.elapsed();
    tracing::info!(
        scenario = %scenario.name,
        history_samples = report.history.len(),
        substitutions = report.substituted_properties.len(),
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        "pool simulation finished"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_run_summary(&scenario, &report);
        println!("  Wall time: {:.1} ms", elapsed.as_secs_f64() * 1000.0);
    }

    if let Some(path) = history {
        write_history(&report.history, path)?;
    }
    Ok(())
}

fn print_run_summary(scenario: &Scenario, report: &EvaporationReport) {
    println!("Scenario: {}", scenario.name);
    println!(
        "  Liquid: MW {:.3} kg/kmol, VP {:.1} Pa, density {:.1} kg/m³",
        report.liquid.molar_mass, report.liquid.vapor_pressure_pa, report.liquid.density_kg_m3
    );
    println!("  Spill mass: {:.1} g", report.spill_mass_g);
    println!(
        "\n✓ Peak rate: {:.4} g/s at {:.0} s",
        report.peak_rate_g_per_s, report.peak_time_s
    );
    println!("  Evaporated after 10 s: {:.3} g", report.checkpoints.at_10_s_g);
    println!("  Evaporated after 60 s: {:.3} g", report.checkpoints.at_60_s_g);
    println!(
        "  Evaporated after 3600 s: {:.3} g",
        report.checkpoints.at_3600_s_g
    );
    match report.time_to_full_evaporation_s {
        Some(t) => println!("  Fully evaporated after {:.0} s", t),
        None => println!("  Liquid remains at the end of the run"),
    }
    print_concentration(report.concentration_ppm);
    print_substitutions(&report.substituted_properties);
}

fn write_history(record: &SimRecord, path: &Path) -> CliResult<()> {
    let mut csv = String::from("time_s,radius_m,height_m,volume_m3,flux_kg_s,evaporated_kg\n");
    for state in &record.x {
        csv.push_str(&format!(
            "{},{},{},{},{},{}\n",
            state.t_s,
            state.radius_m,
            state.height_m,
            state.volume_m3,
            state.flux_kg_s,
            state.evaporated_kg
        ));
    }
    std::fs::write(path, csv)?;
    if record.is_empty() {
        println!("No history recorded (run.record_every is 0)");
    } else {
        println!("✓ Exported {} samples to {}", record.len(), path.display());
    }
    Ok(())
}

fn cmd_steady(db_path: &Path, scenario_path: &Path, json: bool) -> CliResult<()> {
    let table = load_database(db_path)?;
    let scenario = load_scenario(scenario_path)?;
    let eval = CorrelationEvaluator::new(&table);

    tracing::info!(scenario = %scenario.name, "computing steady-state rate");
    let report = ef_sim::run_steady_state(&scenario.to_request(), &eval)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Scenario: {}", scenario.name);
    println!("\n✓ Steady-state rate: {:.4} g/s", report.rate_g_per_s);
    println!(
        "  Mass transfer coefficient: {:.5} m/s",
        report.mass_transfer_coefficient_m_s
    );
    println!("  After 10 s: {:.3} g", report.checkpoints.at_10_s_g);
    println!("  After 60 s: {:.3} g", report.checkpoints.at_60_s_g);
    println!("  After 3600 s: {:.3} g", report.checkpoints.at_3600_s_g);
    print_concentration(report.concentration_ppm);
    print_substitutions(&report.substituted_properties);
    Ok(())
}

fn cmd_validate(scenario_path: &Path) -> CliResult<()> {
    println!("Validating scenario: {}", scenario_path.display());

    let scenario = load_scenario(scenario_path)?;

    println!("✓ Scenario is valid");
    println!("  Name: {}", scenario.name);
    println!("  Version: {}", scenario.version);
    println!("  Components: {}", scenario.components.len());
    println!(
        "  Hood: {} ft × {} ft at {} ft/min",
        scenario.hood.length_ft, scenario.hood.depth_ft, scenario.hood.face_velocity_fpm
    );
    Ok(())
}

fn cmd_chemicals(db_path: &Path, query: Option<&str>) -> CliResult<()> {
    let table = load_database(db_path)?;
    let records = table.search(query.unwrap_or(""));

    if records.is_empty() {
        println!("No chemicals found");
        return Ok(());
    }

    println!("Chemicals ({}):", records.len());
    for record in records {
        println!(
            "  {:<12} {:<24} MW {:.3}",
            record.id.as_str(),
            record.name,
            record.molecular_weight
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_db() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/chemicals.yaml")
    }

    #[test]
    fn database_loads_and_chemicals_resolve_by_cas_or_name() {
        let table = load_database(&sample_db()).unwrap();
        assert_eq!(lookup_chemical(&table, "7732-18-5").unwrap(), ChemicalId::water());
        assert_eq!(lookup_chemical(&table, "water").unwrap(), ChemicalId::water());
        assert!(matches!(
            lookup_chemical(&table, "unobtainium"),
            Err(CliError::UnknownChemical(_))
        ));
    }

    #[test]
    fn missing_database_reports_path() {
        let path = PathBuf::from("does/not/exist.yaml");
        match load_database(&path) {
            Err(CliError::Database { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected database error, got {:?}", other.map(|_| ())),
        }
    }
}
