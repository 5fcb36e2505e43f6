//! Simulation runner implementation.
//!
//! Drives a [`WavePropagationBlock`] through the fixed step cycle until a
//! step count or end time is reached, checking the state for NaN/Inf after
//! every step.

use std::time::Instant;

use tracing::{debug, error, info, warn};

use crate::block::WavePropagationBlock;
use crate::error::{Result, SweError};
use crate::precision::{PrecisionPolicy, Working};
use crate::riemann::RiemannSolver;
use crate::state::CellState;

// =============================================================================
// Simulation Configuration
// =============================================================================

/// Configuration for a simulation run.
///
/// At least one of `max_steps` and `end_time` must be set.
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    /// Maximum number of time steps.
    pub max_steps: Option<usize>,
    /// Simulation time to stop at; the last step is shortened to hit it.
    pub end_time: Option<f64>,
    /// Abort with [`SweError::NonFinite`] when NaN or Inf appears.
    pub check_finite: bool,
    /// Log progress at `info` level every this many steps.
    pub log_interval: Option<usize>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_steps: None,
            end_time: None,
            check_finite: true,
            log_interval: None,
        }
    }
}

impl SimulationConfig {
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn with_end_time(mut self, end_time: f64) -> Self {
        self.end_time = Some(end_time);
        self
    }

    pub fn with_finite_check(mut self, check_finite: bool) -> Self {
        self.check_finite = check_finite;
        self
    }

    pub fn with_log_interval(mut self, interval: usize) -> Self {
        self.log_interval = Some(interval);
        self
    }

    fn validate(&self) -> Result<()> {
        if self.max_steps.is_none() && self.end_time.is_none() {
            return Err(SweError::InvalidConfig(
                "simulation needs a step limit or an end time".into(),
            ));
        }
        if let Some(end_time) = self.end_time
            && !(end_time >= 0.0 && end_time.is_finite())
        {
            return Err(SweError::InvalidConfig(format!(
                "end time must be non-negative and finite, got {end_time}"
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Simulation Result
// =============================================================================

/// Summary of one completed time step, handed to observers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepReport {
    /// 1-based step number.
    pub step: usize,
    /// Simulation time after the step.
    pub time: f64,
    /// Time step taken.
    pub dt: f64,
    /// Fastest signal speed of the step.
    pub max_wave_speed: f64,
}

/// Result of a simulation run.
#[derive(Clone, Debug)]
pub struct SimulationResult {
    /// Final simulation time reached.
    pub final_time: f64,
    /// Total number of time steps taken.
    pub n_steps: usize,
    /// Minimum time step used.
    pub dt_min: f64,
    /// Maximum time step used.
    pub dt_max: f64,
    /// Water volume before the first step.
    pub initial_volume: f64,
    /// Water volume after the last step.
    pub final_volume: f64,
    /// Total wall-clock time in seconds.
    pub wall_time: f64,
}

impl SimulationResult {
    /// Relative change in water volume over the run.
    pub fn relative_volume_change(&self) -> f64 {
        if self.initial_volume == 0.0 {
            self.final_volume
        } else {
            (self.final_volume - self.initial_volume) / self.initial_volume
        }
    }
}

// =============================================================================
// Simulation Runner
// =============================================================================

/// High-level simulation runner around one block.
pub struct Simulation<'a, P: PrecisionPolicy, R> {
    block: WavePropagationBlock<'a, P, R>,
    config: SimulationConfig,
    time: f64,
    steps: usize,
}

impl<'a, P, R> Simulation<'a, P, R>
where
    P: PrecisionPolicy,
    R: RiemannSolver<P::Work>,
{
    pub fn new(block: WavePropagationBlock<'a, P, R>) -> Self {
        Self {
            block,
            config: SimulationConfig::default(),
            time: 0.0,
            steps: 0,
        }
    }

    pub fn with_config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the maximum number of steps.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.config.max_steps = Some(max_steps);
        self
    }

    /// Set the simulation end time.
    pub fn with_end_time(mut self, end_time: f64) -> Self {
        self.config.end_time = Some(end_time);
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn block(&self) -> &WavePropagationBlock<'a, P, R> {
        &self.block
    }

    /// Current simulation time.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Steps taken so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn state(&self) -> &CellState<P::Store> {
        self.block.state()
    }

    /// Run until the configured limit.
    pub fn run(&mut self) -> Result<SimulationResult> {
        self.run_with_observer(|_, _| Ok::<(), SweError>(()))
    }

    /// Run until the configured limit, calling `observer` after every step.
    ///
    /// An observer error stops the run and is returned as is.
    pub fn run_with_observer<F, E>(&mut self, mut observer: F) -> std::result::Result<SimulationResult, E>
    where
        F: FnMut(&StepReport, &CellState<P::Store>) -> std::result::Result<(), E>,
        E: From<SweError>,
    {
        self.config.validate()?;
        let start_wall = Instant::now();
        let initial_volume = self.block.total_volume();
        let first_step = self.steps;
        let mut dt_min = f64::INFINITY;
        let mut dt_max: f64 = 0.0;

        info!(
            precision = P::NAME,
            solver = self.block.solver().name(),
            cells = self.block.size(),
            cfl = self.block.cfl(),
            max_steps = ?self.config.max_steps,
            end_time = ?self.config.end_time,
            "starting simulation"
        );

        loop {
            if let Some(max_steps) = self.config.max_steps
                && self.steps - first_step >= max_steps
            {
                break;
            }
            if let Some(end_time) = self.config.end_time
                && self.time >= end_time
            {
                break;
            }

            self.block.apply_boundary_conditions();
            let mut dt = self.block.compute_numerical_fluxes()?.as_f64();

            if self.block.max_wave_speed() <= P::Work::ZERO && self.config.end_time.is_none() {
                warn!(step = self.steps, "no wave motion left, stopping early");
                break;
            }
            if let Some(end_time) = self.config.end_time {
                dt = dt.min(end_time - self.time);
            }

            self.block.update_unknowns(P::Work::from_f64_lossy(dt));
            self.time += dt;
            self.steps += 1;
            dt_min = dt_min.min(dt);
            dt_max = dt_max.max(dt);

            if self.config.check_finite
                && let Some((cell, quantity)) = self.block.state().first_non_finite()
            {
                error!(step = self.steps, cell, quantity, time = self.time, "non-finite state");
                return Err(SweError::NonFinite {
                    step: self.steps,
                    cell,
                    quantity,
                }
                .into());
            }

            let report = StepReport {
                step: self.steps,
                time: self.time,
                dt,
                max_wave_speed: self.block.max_wave_speed().as_f64(),
            };
            debug!(step = report.step, time = report.time, dt = report.dt, "step complete");
            if let Some(interval) = self.config.log_interval
                && interval > 0
                && self.steps % interval == 0
            {
                info!(step = report.step, time = report.time, dt = report.dt, "progress");
            }

            observer(&report, self.block.state())?;
        }

        let result = SimulationResult {
            final_time: self.time,
            n_steps: self.steps - first_step,
            dt_min,
            dt_max,
            initial_volume,
            final_volume: self.block.total_volume(),
            wall_time: start_wall.elapsed().as_secs_f64(),
        };

        info!(
            steps = result.n_steps,
            final_time = result.final_time,
            dt_min = result.dt_min,
            dt_max = result.dt_max,
            volume_change = result.relative_volume_change(),
            wall_time = result.wall_time,
            "simulation complete"
        );

        Ok(result)
    }
}
