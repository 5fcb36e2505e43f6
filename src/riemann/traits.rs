//! Trait-based Riemann solver abstraction.
//!
//! Every solver consumes the two cell states adjacent to an edge and produces
//! the net updates for the cells on either side plus the fastest signal speed
//! at the edge. The block applies the updates as
//!
//! ```text
//! q_i -= dt/dx * (right_update(edge i-1/2) + left_update(edge i+1/2))
//! ```
//!
//! Fluctuation-form solvers (F-Wave, Rusanov) return A⁻ΔQ and A⁺ΔQ.
//! Flux-form solvers (HLLC, Osher) return `left = F*`, `right = -F*`, which
//! gives the same cell update.
//!
//! # Example
//! ```
//! use swe1d::riemann::{EdgeState, FWave, RiemannSolver};
//!
//! let solver = FWave::<f64>::default();
//! let edge = EdgeState::flat(10.0, 8.0, 0.0, 0.0);
//! let updates = solver.compute_net_updates(&edge).unwrap();
//! assert!(updates.max_speed > 0.0);
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::error::Result;
use crate::precision::{Tolerances, Working};

use super::{FWave, Hllc, Osher, Rusanov};

// =============================================================================
// Edge data
// =============================================================================

/// States on both sides of an edge, in working precision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeState<W> {
    /// Water height left of the edge.
    pub h_l: W,
    /// Water height right of the edge.
    pub h_r: W,
    /// Momentum left of the edge.
    pub hu_l: W,
    /// Momentum right of the edge.
    pub hu_r: W,
    /// Bed elevation left of the edge.
    pub b_l: W,
    /// Bed elevation right of the edge.
    pub b_r: W,
}

impl<W: Working> EdgeState<W> {
    #[inline]
    pub fn new(h_l: W, h_r: W, hu_l: W, hu_r: W, b_l: W, b_r: W) -> Self {
        Self {
            h_l,
            h_r,
            hu_l,
            hu_r,
            b_l,
            b_r,
        }
    }

    /// Edge over a flat bed at elevation zero.
    #[inline]
    pub fn flat(h_l: W, h_r: W, hu_l: W, hu_r: W) -> Self {
        Self::new(h_l, h_r, hu_l, hu_r, W::ZERO, W::ZERO)
    }

    /// The same problem seen in a mirror: sides swapped, momentum negated.
    #[inline]
    pub fn mirrored(&self) -> Self {
        Self::new(self.h_r, self.h_l, -self.hu_r, -self.hu_l, self.b_r, self.b_l)
    }
}

/// Net updates produced at one edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NetUpdates<W> {
    /// Height update for the cell left of the edge.
    pub h_left: W,
    /// Height update for the cell right of the edge.
    pub h_right: W,
    /// Momentum update for the cell left of the edge.
    pub hu_left: W,
    /// Momentum update for the cell right of the edge.
    pub hu_right: W,
    /// Largest absolute signal speed at the edge.
    pub max_speed: W,
}

impl<W: Working> NetUpdates<W> {
    /// No exchange across the edge.
    #[inline]
    pub fn zero() -> Self {
        Self {
            h_left: W::ZERO,
            h_right: W::ZERO,
            hu_left: W::ZERO,
            hu_right: W::ZERO,
            max_speed: W::ZERO,
        }
    }

    /// Updates from a single interface flux `(f_h, f_hu)`.
    #[inline]
    pub fn from_flux(f_h: W, f_hu: W, max_speed: W) -> Self {
        Self {
            h_left: f_h,
            h_right: -f_h,
            hu_left: f_hu,
            hu_right: -f_hu,
            max_speed,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.h_left.is_finite()
            && self.h_right.is_finite()
            && self.hu_left.is_finite()
            && self.hu_right.is_finite()
            && self.max_speed.is_finite()
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Numerical degeneracy detected inside a Riemann solver.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RiemannError {
    /// The two characteristic speeds coincide; the wave decomposition is singular.
    #[error("coincident eigenvalues ({lambda_1:e}, {lambda_2:e})")]
    DegenerateEigenvalues { lambda_1: f64, lambda_2: f64 },

    /// The HLLC contact speed collapses onto an outer wave speed.
    #[error("degenerate wave speeds (s_left={s_left:e}, s_middle={s_middle:e}, s_right={s_right:e})")]
    DegenerateWaveSpeeds {
        s_left: f64,
        s_middle: f64,
        s_right: f64,
    },
}

// =============================================================================
// Solver trait
// =============================================================================

/// Trait for Riemann solvers of the 1D shallow water equations.
///
/// # Implementation Notes
///
/// - Solvers are stateless between calls apart from their [`Tolerances`]
/// - Equal states over a flat bed must produce zero net cell change
/// - Dry cells (`h <= dry_tol`) must never be divided by
/// - `compute_net_updates` must not allocate
pub trait RiemannSolver<W: Working>: Send + Sync {
    /// Net updates and max signal speed for one edge.
    fn compute_net_updates(&self, edge: &EdgeState<W>) -> std::result::Result<NetUpdates<W>, RiemannError>;

    /// Human-readable name for logging.
    fn name(&self) -> &'static str;

    /// Recommended CFL factor for this solver.
    fn recommended_cfl(&self) -> f64 {
        0.4
    }

    /// Whether the bed elevation enters the computation.
    fn uses_bathymetry(&self) -> bool {
        true
    }
}

impl<W: Working, R: RiemannSolver<W> + ?Sized> RiemannSolver<W> for Box<R> {
    #[inline]
    fn compute_net_updates(&self, edge: &EdgeState<W>) -> std::result::Result<NetUpdates<W>, RiemannError> {
        (**self).compute_net_updates(edge)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn recommended_cfl(&self) -> f64 {
        (**self).recommended_cfl()
    }

    fn uses_bathymetry(&self) -> bool {
        (**self).uses_bathymetry()
    }
}

// =============================================================================
// Runtime selection
// =============================================================================

/// Identifier of a built-in solver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SolverKind {
    /// Roe-linearised f-wave solver with bathymetry source.
    #[default]
    FWave,
    /// HLLC with half-split bathymetry source.
    Hllc,
    /// Rusanov flux with hydrostatic reconstruction.
    Rusanov,
    /// Osher path-integral solver (flat bed).
    Osher,
}

impl SolverKind {
    /// All built-in solvers.
    pub const ALL: [SolverKind; 4] = [
        SolverKind::FWave,
        SolverKind::Hllc,
        SolverKind::Rusanov,
        SolverKind::Osher,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SolverKind::FWave => "fwave",
            SolverKind::Hllc => "hllc",
            SolverKind::Rusanov => "rusanov",
            SolverKind::Osher => "osher",
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SolverKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "fwave" => Ok(SolverKind::FWave),
            "hllc" => Ok(SolverKind::Hllc),
            "rusanov" | "llf" => Ok(SolverKind::Rusanov),
            "osher" => Ok(SolverKind::Osher),
            other => Err(format!(
                "unknown solver '{other}' (expected fwave, hllc, rusanov or osher)"
            )),
        }
    }
}

/// Enum wrapper over the built-in solvers.
///
/// Static dispatch when the solver set is closed; use [`BoxedSolver`] for
/// user-provided implementations.
#[derive(Clone, Debug)]
pub enum StandardSolver<W> {
    FWave(FWave<W>),
    Hllc(Hllc<W>),
    Rusanov(Rusanov<W>),
    Osher(Osher<W>),
}

impl<W: Working> StandardSolver<W> {
    pub fn kind(&self) -> SolverKind {
        match self {
            StandardSolver::FWave(_) => SolverKind::FWave,
            StandardSolver::Hllc(_) => SolverKind::Hllc,
            StandardSolver::Rusanov(_) => SolverKind::Rusanov,
            StandardSolver::Osher(_) => SolverKind::Osher,
        }
    }
}

impl<W: Working> RiemannSolver<W> for StandardSolver<W> {
    #[inline]
    fn compute_net_updates(&self, edge: &EdgeState<W>) -> std::result::Result<NetUpdates<W>, RiemannError> {
        match self {
            StandardSolver::FWave(s) => s.compute_net_updates(edge),
            StandardSolver::Hllc(s) => s.compute_net_updates(edge),
            StandardSolver::Rusanov(s) => s.compute_net_updates(edge),
            StandardSolver::Osher(s) => s.compute_net_updates(edge),
        }
    }

    fn name(&self) -> &'static str {
        self.kind().name()
    }

    fn recommended_cfl(&self) -> f64 {
        match self {
            StandardSolver::FWave(s) => s.recommended_cfl(),
            StandardSolver::Hllc(s) => s.recommended_cfl(),
            StandardSolver::Rusanov(s) => s.recommended_cfl(),
            StandardSolver::Osher(s) => s.recommended_cfl(),
        }
    }

    fn uses_bathymetry(&self) -> bool {
        match self {
            StandardSolver::FWave(s) => s.uses_bathymetry(),
            StandardSolver::Hllc(s) => s.uses_bathymetry(),
            StandardSolver::Rusanov(s) => s.uses_bathymetry(),
            StandardSolver::Osher(s) => s.uses_bathymetry(),
        }
    }
}

/// Boxed solver for runtime polymorphism.
pub type BoxedSolver<W> = Box<dyn RiemannSolver<W>>;

/// Build a built-in solver with the given thresholds.
pub fn create_solver<W: Working>(kind: SolverKind, tolerances: Tolerances<W>) -> Result<StandardSolver<W>> {
    Ok(match kind {
        SolverKind::FWave => StandardSolver::FWave(FWave::new(tolerances)?),
        SolverKind::Hllc => StandardSolver::Hllc(Hllc::new(tolerances)?),
        SolverKind::Rusanov => StandardSolver::Rusanov(Rusanov::new(tolerances)?),
        SolverKind::Osher => StandardSolver::Osher(Osher::new(tolerances)?),
    })
}

/// Build a boxed built-in solver with the given thresholds.
pub fn create_boxed_solver<W: Working>(kind: SolverKind, tolerances: Tolerances<W>) -> Result<BoxedSolver<W>> {
    let solver: BoxedSolver<W> = match kind {
        SolverKind::FWave => Box::new(FWave::new(tolerances)?),
        SolverKind::Hllc => Box::new(Hllc::new(tolerances)?),
        SolverKind::Rusanov => Box::new(Rusanov::new(tolerances)?),
        SolverKind::Osher => Box::new(Osher::new(tolerances)?),
    };
    Ok(solver)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirrored_edge() {
        let edge = EdgeState::new(2.0, 1.0, 0.5, -0.25, -3.0, -2.0);
        let m = edge.mirrored();
        assert_eq!(m, EdgeState::new(1.0, 2.0, 0.25, -0.5, -2.0, -3.0));
        assert_eq!(m.mirrored(), edge);
    }

    #[test]
    fn test_from_flux_is_conservative() {
        let u = NetUpdates::from_flux(1.5, -2.0, 3.0);
        assert_eq!(u.h_left + u.h_right, 0.0);
        assert_eq!(u.hu_left + u.hu_right, 0.0);
        assert!(u.is_finite());
    }

    #[test]
    fn test_solver_kind_parsing() {
        for kind in SolverKind::ALL {
            assert_eq!(kind.name().parse::<SolverKind>(), Ok(kind));
        }
        assert_eq!("F-Wave".parse::<SolverKind>(), Ok(SolverKind::FWave));
        assert!("roe".parse::<SolverKind>().is_err());
    }

    #[test]
    fn test_standard_and_boxed_agree() {
        let edge = EdgeState::new(3.0, 1.0, 0.4, -0.2, -3.0, -2.5);
        for kind in SolverKind::ALL {
            let standard = create_solver(kind, Tolerances::<f64>::default()).unwrap();
            let boxed = create_boxed_solver(kind, Tolerances::<f64>::default()).unwrap();
            assert_eq!(standard.kind(), kind);
            assert_eq!(standard.name(), boxed.name());
            assert_eq!(standard.recommended_cfl(), boxed.recommended_cfl());
            assert_eq!(
                standard.compute_net_updates(&edge).unwrap(),
                boxed.compute_net_updates(&edge).unwrap()
            );
        }
    }

    #[test]
    fn test_only_osher_ignores_bathymetry() {
        for kind in SolverKind::ALL {
            let solver = create_solver(kind, Tolerances::<f64>::default()).unwrap();
            assert_eq!(solver.uses_bathymetry(), kind != SolverKind::Osher);
        }
    }

    #[test]
    fn test_invalid_tolerances_rejected() {
        let bad = Tolerances::<f64>::default().with_gravity(-1.0);
        assert!(create_solver(SolverKind::Hllc, bad).is_err());
    }
}
