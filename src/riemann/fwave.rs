//! F-wave solver with bathymetry source term.
//!
//! The flux difference across the edge (including the bed-slope source) is
//! decomposed onto the Roe-linearised eigenvectors `(1, λ)`:
//!
//! ```text
//! h_roe = (h_l + h_r) / 2
//! u_roe = (u_l √h_l + u_r √h_r) / (√h_l + √h_r)
//! λ1,2  = u_roe ∓ √(g h_roe)
//!
//! ΔF = (hu_r - hu_l,
//!       hu_r u_r + g h_r²/2 - hu_l u_l - g h_l²/2 - ψ)
//! ψ  = -g (b_r - b_l)(h_l + h_r) / 2
//!
//! α1 = (λ2 ΔF₀ - ΔF₁) / (λ2 - λ1)
//! α2 = (ΔF₁ - λ1 ΔF₀) / (λ2 - λ1)
//! ```
//!
//! Wave `k` carries `(αk, αk λk)`; it is added to the left cell if `λk < 0`
//! and to the right cell if `λk > 0`. A stationary wave goes nowhere.
//!
//! With `b_l == b_r` the source vanishes, so one solver covers flat and
//! variable beds. A lake at rest (`h + b` constant, `hu = 0`) gives `ΔF = 0`
//! and therefore zero updates.
//!
//! Reference: Bale, LeVeque, Mitran, Rossmanith, "A wave propagation method
//! for conservation laws and balance laws with spatially varying flux
//! functions", SIAM J. Sci. Comput. 24 (2002).

use crate::error::Result;
use crate::precision::{Storage, Tolerances, Working};

use super::dry::with_dry_treatment;
use super::{EdgeState, NetUpdates, RiemannError, RiemannSolver};

/// Roe-linearised f-wave solver.
#[derive(Clone, Debug)]
pub struct FWave<W> {
    tolerances: Tolerances<W>,
}

impl<W: Working> Default for FWave<W> {
    fn default() -> Self {
        Self {
            tolerances: Tolerances::default(),
        }
    }
}

impl<W: Working> FWave<W> {
    /// Create a solver, rejecting unusable thresholds.
    pub fn new(tolerances: Tolerances<W>) -> Result<Self> {
        tolerances.validate()?;
        Ok(Self { tolerances })
    }

    /// Solver with the thresholds for a storage type.
    pub fn for_storage<S: Storage>() -> Self {
        Self {
            tolerances: Tolerances::for_storage::<S>(),
        }
    }

    pub fn tolerances(&self) -> &Tolerances<W> {
        &self.tolerances
    }

    /// Roe eigenvalues `(λ1, λ2)` of a wet edge.
    pub fn roe_eigenvalues(&self, edge: &EdgeState<W>) -> (W, W) {
        let g = self.tolerances.gravity;
        let sqrt_h_l = edge.h_l.sqrt();
        let sqrt_h_r = edge.h_r.sqrt();
        let u_l = edge.hu_l / edge.h_l;
        let u_r = edge.hu_r / edge.h_r;

        let h_roe = W::HALF * (edge.h_l + edge.h_r);
        let u_roe = (u_l * sqrt_h_l + u_r * sqrt_h_r) / (sqrt_h_l + sqrt_h_r);
        let c_roe = (g * h_roe).sqrt();

        (u_roe - c_roe, u_roe + c_roe)
    }

    fn solve_wet(&self, edge: &EdgeState<W>) -> std::result::Result<NetUpdates<W>, RiemannError> {
        let g = self.tolerances.gravity;
        let (lambda_1, lambda_2) = self.roe_eigenvalues(edge);

        let separation = lambda_2 - lambda_1;
        if !(separation > self.tolerances.eps_lambda) {
            return Err(RiemannError::DegenerateEigenvalues {
                lambda_1: lambda_1.as_f64(),
                lambda_2: lambda_2.as_f64(),
            });
        }

        let u_l = edge.hu_l / edge.h_l;
        let u_r = edge.hu_r / edge.h_r;
        let psi = -W::HALF * g * (edge.b_r - edge.b_l) * (edge.h_l + edge.h_r);

        let delta_f0 = edge.hu_r - edge.hu_l;
        let momentum_flux_l = edge.hu_l * u_l + W::HALF * g * edge.h_l * edge.h_l;
        let momentum_flux_r = edge.hu_r * u_r + W::HALF * g * edge.h_r * edge.h_r;
        let delta_f1 = momentum_flux_r - momentum_flux_l - psi;

        let inv_sep = W::ONE / separation;
        let alpha_1 = (lambda_2 * delta_f0 - delta_f1) * inv_sep;
        let alpha_2 = (delta_f1 - lambda_1 * delta_f0) * inv_sep;

        let mut updates = NetUpdates::zero();
        for (alpha, lambda) in [(alpha_1, lambda_1), (alpha_2, lambda_2)] {
            if lambda < W::ZERO {
                updates.h_left += alpha;
                updates.hu_left += alpha * lambda;
            } else if lambda > W::ZERO {
                updates.h_right += alpha;
                updates.hu_right += alpha * lambda;
            }
        }
        updates.max_speed = lambda_1.abs().max(lambda_2.abs());

        Ok(updates)
    }
}

impl<W: Working> RiemannSolver<W> for FWave<W> {
    fn compute_net_updates(&self, edge: &EdgeState<W>) -> std::result::Result<NetUpdates<W>, RiemannError> {
        with_dry_treatment(edge, self.tolerances.dry_tol, |wet| self.solve_wet(wet))
    }

    fn name(&self) -> &'static str {
        "fwave"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn solver() -> FWave<f64> {
        FWave::default()
    }

    #[test]
    fn test_equal_states_give_zero_updates() {
        let edge = EdgeState::flat(5.0, 5.0, 3.0, 3.0);
        let u = solver().compute_net_updates(&edge).unwrap();
        assert!(u.h_left.abs() < TOL && u.h_right.abs() < TOL);
        assert!(u.hu_left.abs() < TOL && u.hu_right.abs() < TOL);
        assert!(u.max_speed > 0.0);
    }

    #[test]
    fn test_lake_at_rest_over_step() {
        let edge = EdgeState::new(6.0, 2.0, 0.0, 0.0, -6.0, -2.0);
        let u = solver().compute_net_updates(&edge).unwrap();
        assert!(u.h_left.abs() < TOL && u.h_right.abs() < TOL);
        assert!(u.hu_left.abs() < TOL && u.hu_right.abs() < TOL);
    }

    #[test]
    fn test_dam_break_fluctuations_sum_to_flux_difference() {
        let g = 9.81;
        let (h_l, h_r) = (10.0, 8.0);
        let edge = EdgeState::flat(h_l, h_r, 0.0, 0.0);
        let u = solver().compute_net_updates(&edge).unwrap();

        // f-waves are a splitting of ΔF
        assert!((u.h_left + u.h_right - 0.0).abs() < TOL);
        let delta_f1 = 0.5 * g * (h_r * h_r - h_l * h_l);
        assert!((u.hu_left + u.hu_right - delta_f1).abs() < 1e-9);

        // water flows from left to right: the left cell loses mass
        // (q_i -= dt/dx * update), the right cell gains it
        assert!(u.h_left > 0.0);
        assert!(u.h_right < 0.0);
    }

    #[test]
    fn test_roe_eigenvalue_values() {
        let edge = EdgeState::flat(4.0, 1.0, 4.0, -1.0);
        let (l1, l2) = solver().roe_eigenvalues(&edge);
        // u_roe = (1*2 + -1*1)/3, c = sqrt(9.81*2.5)
        let u_roe = 1.0 / 3.0;
        let c = (9.81f64 * 2.5).sqrt();
        assert!((l1 - (u_roe - c)).abs() < TOL);
        assert!((l2 - (u_roe + c)).abs() < TOL);
        let u = solver().compute_net_updates(&edge).unwrap();
        assert!((u.max_speed - (u_roe + c)).abs() < TOL);
    }

    #[test]
    fn test_supersonic_flow_goes_right() {
        let edge = EdgeState::flat(1.0, 1.2, 20.0, 22.0);
        let u = solver().compute_net_updates(&edge).unwrap();
        assert_eq!(u.h_left, 0.0);
        assert_eq!(u.hu_left, 0.0);
        assert!((u.h_right - 2.0).abs() < TOL);
    }

    #[test]
    fn test_supersonic_flow_goes_left() {
        let edge = EdgeState::flat(1.2, 1.0, -22.0, -20.0);
        let u = solver().compute_net_updates(&edge).unwrap();
        assert_eq!(u.h_right, 0.0);
        assert_eq!(u.hu_right, 0.0);
        assert!((u.h_left - 2.0).abs() < TOL);
    }

    #[test]
    fn test_mirror_symmetry() {
        let edge = EdgeState::flat(9.0, 2.5, 1.3, -0.7);
        let original = solver().compute_net_updates(&edge).unwrap();
        let mirrored = solver().compute_net_updates(&edge.mirrored()).unwrap();
        assert!((mirrored.h_left - original.h_right).abs() < TOL);
        assert!((mirrored.h_right - original.h_left).abs() < TOL);
        assert!((mirrored.hu_left + original.hu_right).abs() < TOL);
        assert!((mirrored.hu_right + original.hu_left).abs() < TOL);
        assert_eq!(mirrored.max_speed, original.max_speed);
    }

    #[test]
    fn test_wall_against_dry_cell() {
        let edge = EdgeState::flat(2.0, 0.0, 3.0, 0.0);
        let u = solver().compute_net_updates(&edge).unwrap();
        // nothing enters the dry cell
        assert_eq!(u.h_right, 0.0);
        assert_eq!(u.hu_right, 0.0);
        // A⁻ΔQ = F* - F(q_l) with zero mass flux through the wall
        assert!((u.h_left + 3.0).abs() < TOL);
        assert!(u.hu_left > 0.0);
    }

    #[test]
    fn test_degenerate_eigenvalues_reported() {
        let tolerances = Tolerances::<f64>::default().with_dry_tol(1e-12).with_h_min(1e-14);
        let s = FWave::new(tolerances).unwrap();
        let edge = EdgeState::flat(1e-9, 1e-9, 0.0, 0.0);
        let err = s.compute_net_updates(&edge).unwrap_err();
        assert!(matches!(err, RiemannError::DegenerateEigenvalues { .. }));
    }

    #[test]
    fn test_single_precision_agrees_with_double() {
        let edge64 = EdgeState::new(3.0, 2.0, 0.5, 0.25, -3.0, -2.5);
        let edge32 = EdgeState::new(3.0f32, 2.0, 0.5, 0.25, -3.0, -2.5);
        let u64 = solver().compute_net_updates(&edge64).unwrap();
        let u32 = FWave::<f32>::default().compute_net_updates(&edge32).unwrap();
        assert!((u32.h_left as f64 - u64.h_left).abs() < 1e-4);
        assert!((u32.hu_right as f64 - u64.hu_right).abs() < 1e-4);
    }
}
