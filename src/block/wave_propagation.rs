//! Wave-propagation block over a borrowed cell state.
//!
//! Edge `k` (`0..=size`) separates cells `k` and `k + 1`. After the flux
//! sweep every physical cell `i` receives
//!
//! ```text
//! q_i ← q_i - Δt/Δx · (right_update[i-1] + left_update[i])
//! ```
//!
//! evaluated in working precision and rounded back into storage. The time
//! step is `Δt = cfl · Δx / max_k s_k` over all edges, ghosts included.
//!
//! Reference: LeVeque, "Finite Volume Methods for Hyperbolic Problems",
//! Cambridge University Press (2002), Ch. 15.

use crate::boundary::{BoundaryCondition, BoundarySide};
use crate::error::{Result, SweError};
use crate::precision::{PrecisionPolicy, Storage, Working};
use crate::riemann::{EdgeState, NetUpdates, RiemannSolver};
use crate::state::CellState;

use num_traits::Float;

/// Per-edge net updates from the last flux sweep, `size + 1` entries each.
#[derive(Clone, Debug, PartialEq)]
pub struct NetUpdateBuffers<W> {
    pub h_left: Vec<W>,
    pub h_right: Vec<W>,
    pub hu_left: Vec<W>,
    pub hu_right: Vec<W>,
}

impl<W: Working> NetUpdateBuffers<W> {
    fn new(edges: usize) -> Self {
        Self {
            h_left: vec![W::ZERO; edges],
            h_right: vec![W::ZERO; edges],
            hu_left: vec![W::ZERO; edges],
            hu_right: vec![W::ZERO; edges],
        }
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.h_left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.h_left.is_empty()
    }

    fn store(&mut self, k: usize, net: &NetUpdates<W>) {
        self.h_left[k] = net.h_left;
        self.h_right[k] = net.h_right;
        self.hu_left[k] = net.hu_left;
        self.hu_right[k] = net.hu_right;
    }

    /// Largest absolute entry over all four buffers.
    pub fn max_abs(&self) -> W {
        [&self.h_left, &self.h_right, &self.hu_left, &self.hu_right]
            .into_iter()
            .flat_map(|buf| buf.iter())
            .fold(W::ZERO, |acc, v| acc.max(v.abs()))
    }
}

/// Time stepper for one block of cells.
///
/// Borrows the cell state for its whole lifetime; the net-update buffers
/// are owned and reused across steps.
pub struct WavePropagationBlock<'a, P: PrecisionPolicy, R> {
    state: &'a mut CellState<P::Store>,
    updates: NetUpdateBuffers<P::Work>,
    solver: R,
    cell_size: P::Work,
    cfl: f64,
    left_bc: BoundaryCondition,
    right_bc: BoundaryCondition,
    max_wave_speed: P::Work,
    started: bool,
}

impl<'a, P, R> WavePropagationBlock<'a, P, R>
where
    P: PrecisionPolicy,
    R: RiemannSolver<P::Work>,
{
    /// Create a block with outflow boundaries on both ends.
    ///
    /// The CFL factor defaults to the solver's recommendation, capped by
    /// the policy's `MAX_CFL`.
    pub fn new(state: &'a mut CellState<P::Store>, cell_size: f64, solver: R) -> Result<Self> {
        if !(cell_size > 0.0 && cell_size.is_finite()) {
            return Err(SweError::InvalidConfig(format!(
                "cell size must be positive and finite, got {cell_size}"
            )));
        }
        let cfl = solver.recommended_cfl().min(P::MAX_CFL);
        let edges = state.size() + 1;
        Ok(Self {
            state,
            updates: NetUpdateBuffers::new(edges),
            solver,
            cell_size: P::Work::from_f64_lossy(cell_size),
            cfl,
            left_bc: BoundaryCondition::default(),
            right_bc: BoundaryCondition::default(),
            max_wave_speed: P::Work::ZERO,
            started: false,
        })
    }

    /// Override the CFL factor, `0 < cfl <= 1`.
    pub fn with_cfl(mut self, cfl: f64) -> Result<Self> {
        if !(cfl > 0.0 && cfl <= 1.0) {
            return Err(SweError::InvalidConfig(format!(
                "CFL factor must lie in (0, 1], got {cfl}"
            )));
        }
        self.cfl = cfl;
        Ok(self)
    }

    pub fn set_left_boundary_condition(&mut self, bc: BoundaryCondition) -> Result<()> {
        self.check_not_started("left")?;
        self.left_bc = bc;
        Ok(())
    }

    pub fn set_right_boundary_condition(&mut self, bc: BoundaryCondition) -> Result<()> {
        self.check_not_started("right")?;
        self.right_bc = bc;
        Ok(())
    }

    fn check_not_started(&self, side: &str) -> Result<()> {
        if self.started {
            return Err(SweError::InvalidConfig(format!(
                "{side} boundary condition cannot change after time stepping has started"
            )));
        }
        Ok(())
    }

    /// Refill both ghost cells from their physical neighbours.
    pub fn apply_boundary_conditions(&mut self) {
        self.left_bc.apply(BoundarySide::Left, &mut *self.state);
        self.right_bc.apply(BoundarySide::Right, &mut *self.state);
    }

    /// Solve the Riemann problem at every edge and return the stable time step.
    ///
    /// Returns `W::max_value()` when no wave moves (all edges at rest or dry).
    /// The cell state is left untouched.
    pub fn compute_numerical_fluxes(&mut self) -> Result<P::Work> {
        let mut max_speed = P::Work::ZERO;

        for k in 0..self.updates.len() {
            let net = self
                .solver
                .compute_net_updates(&edge_state::<P>(&*self.state, k))
                .map_err(|source| SweError::Degenerate { edge: k, source })?;
            self.updates.store(k, &net);
            max_speed = max_speed.max(net.max_speed);
        }

        self.max_wave_speed = max_speed;
        if max_speed > P::Work::ZERO {
            Ok(self.cell_size / max_speed * P::Work::from_f64_lossy(self.cfl))
        } else {
            Ok(P::Work::max_value())
        }
    }

    /// Apply the last flux sweep's updates over `dt`.
    ///
    /// A cell whose height would turn negative is set to rest: `h = hu = 0`.
    /// A `dt` so large that `dt / Δx` overflows leaves the state unchanged.
    pub fn update_unknowns(&mut self, dt: P::Work) {
        self.started = true;
        let ratio = -(dt / self.cell_size);
        if !ratio.is_finite() {
            return;
        }
        let size = self.state.size();
        let (h, hu, _) = self.state.arrays_mut();
        let u = &self.updates;

        for i in 1..=size {
            let h_old: P::Work = h[i].promote();
            let hu_old: P::Work = hu[i].promote();
            let h_new = ratio.mul_add(u.h_right[i - 1] + u.h_left[i], h_old);
            let hu_new = ratio.mul_add(u.hu_right[i - 1] + u.hu_left[i], hu_old);

            if h_new < P::Work::ZERO {
                h[i] = P::Store::default();
                hu[i] = P::Store::default();
            } else {
                h[i] = P::Store::demote(h_new);
                hu[i] = P::Store::demote(hu_new);
            }
        }
    }

    /// One full time step; returns the `dt` taken.
    ///
    /// With no wave motion the state is left as it is and `W::max_value()`
    /// is returned.
    pub fn step(&mut self) -> Result<P::Work> {
        self.apply_boundary_conditions();
        let dt = self.compute_numerical_fluxes()?;
        if self.max_wave_speed > P::Work::ZERO {
            self.update_unknowns(dt);
        } else {
            self.started = true;
        }
        Ok(dt)
    }

    pub fn state(&self) -> &CellState<P::Store> {
        &*self.state
    }

    pub fn net_updates(&self) -> &NetUpdateBuffers<P::Work> {
        &self.updates
    }

    /// Fastest signal speed seen in the last flux sweep.
    pub fn max_wave_speed(&self) -> P::Work {
        self.max_wave_speed
    }

    pub fn cfl(&self) -> f64 {
        self.cfl
    }

    pub fn size(&self) -> usize {
        self.state.size()
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size.as_f64()
    }

    pub fn solver(&self) -> &R {
        &self.solver
    }

    pub fn boundary_conditions(&self) -> (BoundaryCondition, BoundaryCondition) {
        (self.left_bc, self.right_bc)
    }

    /// Water volume over the physical cells, compensated if the policy asks for it.
    pub fn total_volume(&self) -> f64 {
        self.state.total_volume(P::USE_KAHAN) * self.cell_size.as_f64()
    }
}

/// Promote the two cells around edge `k` into working precision.
#[inline]
fn edge_state<P: PrecisionPolicy>(state: &CellState<P::Store>, k: usize) -> EdgeState<P::Work> {
    let (h, hu, b) = (state.h(), state.hu(), state.b());
    EdgeState::new(
        h[k].promote(),
        h[k + 1].promote(),
        hu[k].promote(),
        hu[k + 1].promote(),
        b[k].promote(),
        b[k + 1].promote(),
    )
}
