//! Simulation runner and result recording.

use crate::error::{SimError, SimResult};
use crate::pool::{PoolEvaporationSimulator, SimulationState, StepOutcome};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Slack for comparing accumulated step times against fixed marks.
pub(crate) const TIME_EPS: f64 = 1e-9;

/// Longest simulated time a pool run may cover [s].
pub const MAX_DURATION_S: f64 = 3600.0;

/// Upper bound on the number of steps in one pool run.
pub const MAX_STEPS: usize = 3600;

/// Times at which cumulative evaporated mass is reported [s].
pub const CHECKPOINT_TIMES_S: [f64; 3] = [10.0, 60.0, 3600.0];

/// Options for pool runs.
#[derive(Clone, Debug, PartialEq)]
pub struct PoolOptions {
    /// Fixed time step (seconds)
    pub dt: f64,
    /// Simulated time limit (seconds)
    pub max_duration_s: f64,
    /// Duration of the constant-rate pour (seconds)
    pub spill_duration_s: f64,
    /// Record every N-th step into the history (0 = no history)
    pub record_every: usize,
    /// Wall-clock limit for a run
    pub timeout: Option<Duration>,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            dt: 1.0,
            max_duration_s: 3600.0,
            spill_duration_s: 10.0,
            record_every: 0,
            timeout: None,
        }
    }
}

impl PoolOptions {
    pub fn validate(&self) -> SimResult<()> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "dt must be positive",
            });
        }
        if !self.max_duration_s.is_finite() || self.max_duration_s < self.dt {
            return Err(SimError::InvalidArg {
                what: "max duration must cover at least one step",
            });
        }
        if self.max_duration_s > MAX_DURATION_S + TIME_EPS {
            return Err(SimError::InvalidArg {
                what: "max duration exceeds 3600 s",
            });
        }
        if self.steps_f64() > MAX_STEPS as f64 {
            return Err(SimError::InvalidArg {
                what: "run would exceed 3600 steps",
            });
        }
        if !self.spill_duration_s.is_finite() || self.spill_duration_s <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "spill duration must be positive",
            });
        }
        Ok(())
    }

    fn steps_f64(&self) -> f64 {
        (self.max_duration_s / self.dt - TIME_EPS).ceil()
    }

    /// Number of steps in a run. Bounded by [`MAX_STEPS`] once validated.
    fn step_count(&self) -> usize {
        (self.steps_f64() as usize).min(MAX_STEPS)
    }
}

/// Record of pool states.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SimRecord {
    /// Time points (seconds)
    pub t: Vec<f64>,
    /// State snapshots
    pub x: Vec<SimulationState>,
}

impl SimRecord {
    fn push(&mut self, state: &SimulationState) {
        self.t.push(state.t_s);
        self.x.push(*state);
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }
}

/// Cumulative evaporated mass at the report times [kg].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckpointTotals {
    pub at_10_s_kg: f64,
    pub at_60_s_kg: f64,
    pub at_3600_s_kg: f64,
}

impl CheckpointTotals {
    /// Totals for a rate held constant from t = 0.
    pub fn from_constant_rate(rate_kg_s: f64) -> Self {
        let [a, b, c] = CHECKPOINT_TIMES_S.map(|t| rate_kg_s * t);
        Self {
            at_10_s_kg: a,
            at_60_s_kg: b,
            at_3600_s_kg: c,
        }
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.at_10_s_kg, self.at_60_s_kg, self.at_3600_s_kg]
    }
}

#[derive(Default)]
struct CheckpointRecorder {
    totals: [Option<f64>; 3],
}

impl CheckpointRecorder {
    fn observe(&mut self, t_s: f64, evaporated_kg: f64) {
        for (slot, mark) in self.totals.iter_mut().zip(CHECKPOINT_TIMES_S) {
            if slot.is_none() && t_s >= mark - TIME_EPS {
                *slot = Some(evaporated_kg);
            }
        }
    }

    /// Marks not reached report the final total.
    fn finish(self, final_kg: f64) -> CheckpointTotals {
        let [a, b, c] = self.totals.map(|v| v.unwrap_or(final_kg));
        CheckpointTotals {
            at_10_s_kg: a,
            at_60_s_kg: b,
            at_3600_s_kg: c,
        }
    }
}

/// Outcome of a pool run.
#[derive(Clone, Debug, PartialEq)]
pub struct PoolRun {
    /// Highest evaporation rate [kg/s]
    pub peak_flux_kg_s: f64,
    /// Time of the highest rate [s]
    pub peak_time_s: f64,
    pub checkpoints: CheckpointTotals,
    /// Time at which the last liquid evaporated, if within the run
    pub time_to_full_evaporation_s: Option<f64>,
    pub steps: usize,
    pub final_state: SimulationState,
    /// Decimated states; empty unless `record_every > 0`
    pub history: SimRecord,
}

/// Run a pool simulation to depletion or the time limit.
pub fn run_pool(sim: &PoolEvaporationSimulator) -> SimResult<PoolRun> {
    let opts = sim.options();
    let started = Instant::now();

    let mut state = sim.initial_state();
    let mut peak_flux_kg_s = 0.0;
    let mut peak_time_s = 0.0;
    let mut checkpoints = CheckpointRecorder::default();
    let mut history = SimRecord::default();
    let mut time_to_full_evaporation_s = None;
    let mut steps = 0;

    tracing::debug!(
        inflow_m3_s = sim.inflow_rate_m3_s(),
        max_radius_m = sim.max_radius_m(),
        radius_m = state.radius_m,
        "pool run start"
    );

    for step in 1..=opts.step_count() {
        if let Some(limit) = opts.timeout {
            if started.elapsed() >= limit {
                return Err(SimError::Timeout {
                    limit_s: limit.as_secs_f64(),
                    t_sim_s: state.t_s,
                });
            }
        }

        let outcome = sim.step(&mut state);
        steps = step;

        if state.flux_kg_s > peak_flux_kg_s {
            peak_flux_kg_s = state.flux_kg_s;
            peak_time_s = state.t_s;
        }
        checkpoints.observe(state.t_s, state.evaporated_kg);

        if opts.record_every > 0 && step % opts.record_every == 0 {
            history.push(&state);
        }

        tracing::trace!(
            t_s = state.t_s,
            radius_m = state.radius_m,
            height_m = state.height_m,
            volume_m3 = state.volume_m3,
            flux_kg_s = state.flux_kg_s,
            "pool step"
        );

        if outcome == StepOutcome::Depleted {
            time_to_full_evaporation_s = Some(state.t_s);
            break;
        }
    }

    // Always record final state
    if opts.record_every > 0 && history.t.last() != Some(&state.t_s) {
        history.push(&state);
    }

    tracing::debug!(
        steps,
        peak_flux_kg_s,
        peak_time_s,
        evaporated_kg = state.evaporated_kg,
        depleted = time_to_full_evaporation_s.is_some(),
        "pool run end"
    );

    Ok(PoolRun {
        peak_flux_kg_s,
        peak_time_s,
        checkpoints: checkpoints.finish(state.evaporated_kg),
        time_to_full_evaporation_s,
        steps,
        final_state: state,
        history,
    })
}

impl PoolEvaporationSimulator {
    pub fn run(&self) -> SimResult<PoolRun> {
        run_pool(self)
    }
}
