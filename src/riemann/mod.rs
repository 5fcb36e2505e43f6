//! Riemann solvers for the 1D shallow water equations.
//!
//! All solvers implement [`RiemannSolver`] and are interchangeable inside a
//! [`WavePropagationBlock`](crate::block::WavePropagationBlock):
//!
//! - [`FWave`]: Roe-linearised f-wave decomposition with bed-slope source
//! - [`Hllc`]: three-wave HLLC flux with a half-split bed source
//! - [`Rusanov`]: local Lax-Friedrichs flux with hydrostatic reconstruction,
//!   exactly well balanced
//! - [`Osher`]: path-integral dissipation with Gauss quadrature (flat bed)
//!
//! Wet/dry handling is shared, see [`dry`].

pub mod dry;
mod fwave;
mod hllc;
mod osher;
mod rusanov;
mod traits;

pub use fwave::FWave;
pub use hllc::Hllc;
pub use osher::Osher;
pub use rusanov::{Reconstructed, Rusanov};
pub use traits::{
    BoxedSolver, EdgeState, NetUpdates, RiemannError, RiemannSolver, SolverKind, StandardSolver,
    create_boxed_solver, create_solver,
};
