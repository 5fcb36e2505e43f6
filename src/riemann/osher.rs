//! Osher-type path-integral solver (Dumbser-Toro variant).
//!
//! The dissipation matrix is the integral of |A(q)| along the straight path
//! `q(s) = q_l + s (q_r - q_l)`, evaluated with 3-point Gauss-Legendre
//! quadrature:
//!
//! ```text
//! F = (f(q_l) + f(q_r)) / 2 - [Σ_k w_k |A(q(s_k))|] (q_r - q_l) / 2
//! ```
//!
//! With eigenvalues `a = u + c`, `b = u - c` of the Jacobian
//! `A = [[0, 1], [c² - u², 2u]]`, the absolute value in closed form is
//!
//! ```text
//! |A| = 1/(a - b) [[ a|b| - b|a|,      |a| - |b|  ],
//!                  [ ab(|b| - |a|),   a|a| - b|b| ]]
//! ```
//!
//! When `a` and `b` nearly coincide the averaged diagonal
//! `(|a| + |b|)/2 · I` is used instead. The bed elevation is not used.
//!
//! References:
//! - Dumbser, Toro, "A simple extension of the Osher Riemann solver to
//!   non-conservative hyperbolic systems", J. Sci. Comput. 48 (2011)
//! - Castro, Gallardo, Marquina, "Approximate Osher-Solomon schemes for
//!   hyperbolic systems", SEMA SIMAI Springer Series 8 (2016)

use crate::error::Result;
use crate::precision::{Storage, Tolerances, Working};

use super::dry::with_dry_treatment;
use super::{EdgeState, NetUpdates, RiemannError, RiemannSolver};

/// Gauss-Legendre weights on [0, 1].
const WEIGHTS: [f64; 3] = [5.0 / 18.0, 8.0 / 18.0, 5.0 / 18.0];

/// Offset of the outer Gauss-Legendre nodes from the midpoint, √15 / 10.
const NODE_OFFSET: f64 = 0.387_298_334_620_741_7;

/// 2×2 matrix, row major.
type Matrix2<W> = [[W; 2]; 2];

/// Osher solver with 3-point Gauss quadrature.
#[derive(Clone, Debug)]
pub struct Osher<W> {
    tolerances: Tolerances<W>,
    weights: [W; 3],
    nodes: [W; 3],
}

impl<W: Working> Default for Osher<W> {
    fn default() -> Self {
        Self::with_tolerances(Tolerances::default())
    }
}

impl<W: Working> Osher<W> {
    /// Create a solver, rejecting unusable thresholds.
    pub fn new(tolerances: Tolerances<W>) -> Result<Self> {
        tolerances.validate()?;
        Ok(Self::with_tolerances(tolerances))
    }

    /// Solver with the thresholds for a storage type.
    pub fn for_storage<S: Storage>() -> Self {
        Self::with_tolerances(Tolerances::for_storage::<S>())
    }

    fn with_tolerances(tolerances: Tolerances<W>) -> Self {
        let w = |v: f64| W::from_f64_lossy(v);
        Self {
            tolerances,
            weights: WEIGHTS.map(w),
            nodes: [w(0.5 - NODE_OFFSET), w(0.5), w(0.5 + NODE_OFFSET)],
        }
    }

    pub fn tolerances(&self) -> &Tolerances<W> {
        &self.tolerances
    }

    /// Eigenvalues `(u + c, u - c)` of the flux Jacobian at `(h, hu)`.
    pub fn eigenvalues(&self, h: W, hu: W) -> (W, W) {
        let t = &self.tolerances;
        let h_safe = h.max(t.h_min);
        let u = if h > t.dry_tol { hu / h_safe } else { W::ZERO };
        let c = (t.gravity * h_safe).sqrt();
        (u + c, u - c)
    }

    /// |A| for a Jacobian with eigenvalues `a` and `b`.
    pub fn abs_jacobian(&self, a: W, b: W) -> Matrix2<W> {
        let (abs_a, abs_b) = (a.abs(), b.abs());
        let d = a - b;
        let scale = W::max3(W::ONE, abs_a, abs_b);

        if d.abs() <= self.tolerances.eps_lambda * scale {
            let avg = W::HALF * (abs_a + abs_b);
            return [[avg, W::ZERO], [W::ZERO, avg]];
        }

        let inv_d = W::ONE / d;
        [
            [(a * abs_b - b * abs_a) * inv_d, (abs_a - abs_b) * inv_d],
            [a * b * (abs_b - abs_a) * inv_d, (a * abs_a - b * abs_b) * inv_d],
        ]
    }

    fn solve_wet(&self, edge: &EdgeState<W>) -> std::result::Result<NetUpdates<W>, RiemannError> {
        let g = self.tolerances.gravity;
        let dh = edge.h_r - edge.h_l;
        let dhu = edge.hu_r - edge.hu_l;

        let mut dissipation: Matrix2<W> = [[W::ZERO; 2]; 2];
        let mut max_speed = W::ZERO;

        for (&weight, &s) in self.weights.iter().zip(&self.nodes) {
            let h = edge.h_l + s * dh;
            let hu = edge.hu_l + s * dhu;
            let (a, b) = self.eigenvalues(h, hu);
            max_speed = W::max3(max_speed, a.abs(), b.abs());

            let m = self.abs_jacobian(a, b);
            for (row, m_row) in dissipation.iter_mut().zip(&m) {
                for (entry, &value) in row.iter_mut().zip(m_row) {
                    *entry += weight * value;
                }
            }
        }

        let u_l = edge.hu_l / edge.h_l;
        let u_r = edge.hu_r / edge.h_r;
        let momentum_flux_l = edge.hu_l * u_l + W::HALF * g * edge.h_l * edge.h_l;
        let momentum_flux_r = edge.hu_r * u_r + W::HALF * g * edge.h_r * edge.h_r;

        let half_dh = W::HALF * dh;
        let half_dhu = W::HALF * dhu;
        let flux_h = W::HALF * (edge.hu_l + edge.hu_r)
            - (dissipation[0][0] * half_dh + dissipation[0][1] * half_dhu);
        let flux_hu = W::HALF * (momentum_flux_l + momentum_flux_r)
            - (dissipation[1][0] * half_dh + dissipation[1][1] * half_dhu);

        Ok(NetUpdates::from_flux(flux_h, flux_hu, max_speed))
    }
}

impl<W: Working> RiemannSolver<W> for Osher<W> {
    fn compute_net_updates(&self, edge: &EdgeState<W>) -> std::result::Result<NetUpdates<W>, RiemannError> {
        with_dry_treatment(edge, self.tolerances.dry_tol, |wet| self.solve_wet(wet))
    }

    fn name(&self) -> &'static str {
        "osher"
    }

    fn uses_bathymetry(&self) -> bool {
        false
    }
}
