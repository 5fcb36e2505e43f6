//! Wave-propagation update of a 1D cell block.
//!
//! One time step is three sweeps in fixed order:
//!
//! 1. [`apply_boundary_conditions`](WavePropagationBlock::apply_boundary_conditions)
//!    refills the two ghost cells
//! 2. [`compute_numerical_fluxes`](WavePropagationBlock::compute_numerical_fluxes)
//!    solves one Riemann problem per edge and returns the CFL time step
//! 3. [`update_unknowns`](WavePropagationBlock::update_unknowns) applies the
//!    net updates to every physical cell
//!
//! [`WavePropagationBlock::step`] runs all three.

mod wave_propagation;

pub use wave_propagation::{NetUpdateBuffers, WavePropagationBlock};
