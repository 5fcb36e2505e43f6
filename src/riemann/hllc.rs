//! HLLC approximate Riemann solver for shallow water.
//!
//! Three-wave model with outer speeds
//!
//! ```text
//! s_l = min(u_l - c_l, u_r - c_r),   s_r = max(u_l + c_l, u_r + c_r)
//! ```
//!
//! and the contact speed from the Rankine-Hugoniot conditions
//!
//! ```text
//! s_m = (hu_r (s_r - u_r) - hu_l (s_l - u_l) + p_l - p_r)
//!       / (h_r (s_r - u_r) - h_l (s_l - u_l)),     p = g h² / 2
//! ```
//!
//! The star states are `h*_k = h_k (s_k - u_k) / (s_k - s_m)`,
//! `hu*_k = h*_k s_m`. The interface flux is returned in flux form; the
//! bed-slope source `ψ = -g (h_l + h_r)(b_r - b_l) / 2` is split evenly
//! between the two momentum updates.
//!
//! Reference: Toro, "Riemann Solvers and Numerical Methods for Fluid
//! Dynamics", 3rd ed., chapter 10.

use crate::error::Result;
use crate::precision::{Storage, Tolerances, Working};

use super::dry::with_dry_treatment;
use super::{EdgeState, NetUpdates, RiemannError, RiemannSolver};

/// HLLC solver with half-split bathymetry source.
#[derive(Clone, Debug)]
pub struct Hllc<W> {
    tolerances: Tolerances<W>,
}

impl<W: Working> Default for Hllc<W> {
    fn default() -> Self {
        Self {
            tolerances: Tolerances::default(),
        }
    }
}

impl<W: Working> Hllc<W> {
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

    fn solve_wet(&self, edge: &EdgeState<W>) -> std::result::Result<NetUpdates<W>, RiemannError> {
        let g = self.tolerances.gravity;
        let (h_l, h_r, hu_l, hu_r) = (edge.h_l, edge.h_r, edge.hu_l, edge.hu_r);

        let u_l = hu_l / h_l;
        let u_r = hu_r / h_r;
        let c_l = (g * h_l).sqrt();
        let c_r = (g * h_r).sqrt();
        let p_l = W::HALF * g * h_l * h_l;
        let p_r = W::HALF * g * h_r * h_r;

        let s_l = (u_l - c_l).min(u_r - c_r);
        let s_r = (u_l + c_l).max(u_r + c_r);

        let flux_l = (hu_l, hu_l * u_l + p_l);
        let flux_r = (hu_r, hu_r * u_r + p_r);

        let (flux, s_m) = if s_l >= W::ZERO {
            (flux_l, None)
        } else if s_r <= W::ZERO {
            (flux_r, None)
        } else {
            let denominator = h_r * (s_r - u_r) - h_l * (s_l - u_l);
            let degenerate = |s_m: W| RiemannError::DegenerateWaveSpeeds {
                s_left: s_l.as_f64(),
                s_middle: s_m.as_f64(),
                s_right: s_r.as_f64(),
            };
            if !(denominator > W::ZERO) {
                return Err(degenerate(W::nan()));
            }
            let s_m = (hu_r * (s_r - u_r) - hu_l * (s_l - u_l) + p_l - p_r) / denominator;

            let flux = if s_l <= W::ZERO && W::ZERO <= s_m {
                let gap = s_l - s_m;
                if gap == W::ZERO {
                    return Err(degenerate(s_m));
                }
                let h_star = h_l * (s_l - u_l) / gap;
                let hu_star = h_star * s_m;
                (
                    flux_l.0 + s_l * (h_star - h_l),
                    flux_l.1 + s_l * (hu_star - hu_l),
                )
            } else if s_m <= W::ZERO && W::ZERO <= s_r {
                let gap = s_r - s_m;
                if gap == W::ZERO {
                    return Err(degenerate(s_m));
                }
                let h_star = h_r * (s_r - u_r) / gap;
                let hu_star = h_star * s_m;
                (
                    flux_r.0 + s_r * (h_star - h_r),
                    flux_r.1 + s_r * (hu_star - hu_r),
                )
            } else if s_m >= W::ZERO {
                flux_l
            } else {
                flux_r
            };
            (flux, Some(s_m))
        };

        let psi = -g * W::HALF * (h_l + h_r) * (edge.b_r - edge.b_l);
        let half_source = W::HALF * psi;

        let max_speed = match s_m {
            Some(s_m) => W::max3(s_l.abs(), s_r.abs(), s_m.abs()),
            None => s_l.abs().max(s_r.abs()),
        };

        Ok(NetUpdates {
            h_left: flux.0,
            h_right: -flux.0,
            hu_left: flux.1 - half_source,
            hu_right: -flux.1 - half_source,
            max_speed,
        })
    }
}

impl<W: Working> RiemannSolver<W> for Hllc<W> {
    fn compute_net_updates(&self, edge: &EdgeState<W>) -> std::result::Result<NetUpdates<W>, RiemannError> {
        with_dry_treatment(edge, self.tolerances.dry_tol, |wet| self.solve_wet(wet))
    }

    fn name(&self) -> &'static str {
        "hllc"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const G: f64 = 9.81;
    const TOL: f64 = 1e-10;

    fn solver() -> Hllc<f64> {
        Hllc::default()
    }

    fn physical_flux(h: f64, hu: f64) -> (f64, f64) {
        (hu, hu * hu / h + 0.5 * G * h * h)
    }

    #[test]
    fn test_consistency_with_physical_flux() {
        let (h, hu) = (3.0, 1.2);
        let u = solver().compute_net_updates(&EdgeState::flat(h, h, hu, hu)).unwrap();
        let f = physical_flux(h, hu);
        assert!((u.h_left - f.0).abs() < TOL);
        assert!((u.hu_left - f.1).abs() < TOL);
        assert!((u.h_left + u.h_right).abs() < TOL);
        assert!((u.hu_left + u.hu_right).abs() < TOL);
    }

    #[test]
    fn test_supersonic_right_uses_left_flux() {
        let (h_l, hu_l) = (1.0, 20.0);
        let u = solver()
            .compute_net_updates(&EdgeState::flat(h_l, 1.5, hu_l, 27.0))
            .unwrap();
        let f = physical_flux(h_l, hu_l);
        assert_eq!(u.h_left, f.0);
        assert!((u.hu_left - f.1).abs() < TOL);
        // the fastest wave bounds the speed
        assert!((u.max_speed - (20.0 + G.sqrt())).abs() < 1e-9);
    }

    #[test]
    fn test_supersonic_left_uses_right_flux() {
        let (h_r, hu_r) = (1.0, -20.0);
        let u = solver()
            .compute_net_updates(&EdgeState::flat(1.5, h_r, -27.0, hu_r))
            .unwrap();
        let f = physical_flux(h_r, hu_r);
        assert_eq!(u.h_left, f.0);
        assert!((u.hu_left - f.1).abs() < TOL);
    }

    #[test]
    fn test_symmetric_collision_has_zero_contact_speed() {
        let u = solver()
            .compute_net_updates(&EdgeState::flat(2.0, 2.0, 1.0, -1.0))
            .unwrap();
        // equal and opposite streams: no net mass flux through the edge
        assert!(u.h_left.abs() < TOL);
        assert!(u.hu_left > 0.0);
    }

    #[test]
    fn test_mirror_symmetry() {
        let edge = EdgeState::flat(6.0, 1.5, 2.0, -0.5);
        let original = solver().compute_net_updates(&edge).unwrap();
        let mirrored = solver().compute_net_updates(&edge.mirrored()).unwrap();
        assert!((mirrored.h_left - original.h_right).abs() < TOL);
        assert!((mirrored.hu_left + original.hu_right).abs() < TOL);
        assert!((mirrored.max_speed - original.max_speed).abs() < TOL);
    }

    #[test]
    fn test_bed_source_split_evenly() {
        let flat = solver()
            .compute_net_updates(&EdgeState::new(3.0, 2.0, 0.5, 0.5, 0.0, 0.0))
            .unwrap();
        let sloped = solver()
            .compute_net_updates(&EdgeState::new(3.0, 2.0, 0.5, 0.5, 0.0, 0.4))
            .unwrap();
        let psi = -G * 0.5 * 5.0 * 0.4;
        assert_eq!(flat.h_left, sloped.h_left);
        assert!((sloped.hu_left - (flat.hu_left - 0.5 * psi)).abs() < TOL);
        assert!((sloped.hu_right - (flat.hu_right - 0.5 * psi)).abs() < TOL);
    }

    #[test]
    fn test_dry_right_side_is_a_wall() {
        let u = solver()
            .compute_net_updates(&EdgeState::flat(2.0, 0.0, 1.0, 0.0))
            .unwrap();
        assert!(u.h_left.abs() < TOL);
        assert_eq!(u.h_right, 0.0);
        assert_eq!(u.hu_right, 0.0);
    }
}
