//! # swe1d
//!
//! A finite-volume solver for the one-dimensional shallow water equations
//! with variable bathymetry.
//!
//! ```text
//! ∂h/∂t  + ∂(hu)/∂x              = 0
//! ∂hu/∂t + ∂(hu² + g h²/2)/∂x    = -g h ∂b/∂x
//! ```
//!
//! The crate provides:
//! - Riemann solvers behind one trait (F-Wave, HLLC, Rusanov with
//!   hydrostatic reconstruction, Osher)
//! - A wave-propagation block with CFL time stepping and ghost-cell
//!   boundary conditions
//! - Precision policies pairing a storage type (`f64`, `f32`, bfloat16)
//!   with a working type (`f64`, `f32`)
//! - Scenarios, VTK/console output and a simulation runner

pub mod block;
pub mod boundary;
pub mod error;
pub mod io;
pub mod precision;
pub mod riemann;
pub mod scenario;
pub mod simulation;
pub mod state;

// Re-export main types for convenience
pub use block::WavePropagationBlock;
pub use boundary::BoundaryCondition;
pub use error::{Result, SweError};
pub use precision::{Bf16, Bf16Safe, Double, MixedBf16, MixedSingle, Precision, PrecisionPolicy};
pub use riemann::{
    EdgeState, FWave, Hllc, NetUpdates, Osher, RiemannError, RiemannSolver, Rusanov, SolverKind,
    create_solver,
};
pub use scenario::Scenario;
pub use simulation::{Simulation, SimulationConfig, SimulationResult};
pub use state::CellState;
