//! Simulation runner.
//!
//! Ties a [`WavePropagationBlock`](crate::block::WavePropagationBlock) to a
//! stopping criterion, per-step diagnostics and an observer callback.
//!
//! # Example
//! ```
//! use swe1d::block::WavePropagationBlock;
//! use swe1d::precision::Double;
//! use swe1d::riemann::FWave;
//! use swe1d::scenario::{DamBreak, Scenario};
//! use swe1d::simulation::Simulation;
//! use swe1d::state::CellState;
//!
//! let scenario = DamBreak::new(100.0, 100, 10.0, 5.0, 0.0)?;
//! let mut state = CellState::<f64>::from_scenario(&scenario, 100)?;
//! let block = WavePropagationBlock::<Double, _>::new(&mut state, scenario.cell_size(), FWave::default())?;
//!
//! let result = Simulation::new(block).with_end_time(2.0).run()?;
//! assert!((result.final_time - 2.0).abs() < 1e-12);
//! # Ok::<(), swe1d::SweError>(())
//! ```

mod runner;

pub use runner::{Simulation, SimulationConfig, SimulationResult, StepReport};
