//! Spill evaporation models for evapflow.
//!
//! Provides:
//! - Transient pool model: pour, spreading, evaporation, footprint limit
//! - Steady-state rate over the full hood footprint
//! - Mass-transfer correlations
//! - Breathing-zone concentration estimate
//! - Request-level entry points taking hood-side units

pub mod assessment;
pub mod concentration;
pub mod error;
pub mod inputs;
pub mod mass_transfer;
pub mod pool;
pub mod sim;
pub mod steady;

// Re-exports for public API
pub use assessment::{
    Checkpoints, ComponentSpec, EvaporationReport, ManualOverrides, SimulationRequest,
    SteadyStateReport, resolve_liquid, run_simulation, run_steady_state,
};
pub use concentration::{SashOpening, exhaust_flow_m3_s, hood_concentration_ppm};
pub use error::{SimError, SimResult};
pub use inputs::{Hood, LiquidProperties, PoolInputs};
pub use pool::{
    MIN_EVAPORATION_RATE_KG_S, PoolEvaporationSimulator, ROUGHNESS_HEIGHT_M, SimulationState,
    StepOutcome,
};
pub use sim::{
    CHECKPOINT_TIMES_S, CheckpointTotals, MAX_DURATION_S, MAX_STEPS, PoolOptions, PoolRun,
    SimRecord, run_pool,
};
pub use steady::{SteadyStateRate, steady_state_rate};
