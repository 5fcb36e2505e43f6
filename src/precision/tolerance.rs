//! Precision-dependent thresholds.
//!
//! Narrow formats cannot resolve very thin water columns or nearly equal
//! eigenvalues, so the thresholds grow as the storage format shrinks.
//!
//! | class    | `h_min`  | `dry_tol` | `eps_lambda` |
//! |----------|----------|-----------|--------------|
//! | double   | 1.5e-8   | 1.5e-7    | 7.7e-4       |
//! | single   | 3.5e-4   | 3.5e-3    | 1.2e-1       |
//! | bfloat16 | 8.8e-2   | 8.8e-1    | 1.9          |

use crate::error::{Result, SweError};

use super::{PrecisionClass, Storage, Working};

/// Standard gravitational acceleration (m/s²).
pub const GRAVITY: f64 = 9.81;

/// Physical constant and thresholds shared by all Riemann solvers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances<W> {
    /// Gravitational acceleration (m/s²).
    pub gravity: W,
    /// Floor used when a depth appears in a denominator.
    pub h_min: W,
    /// A cell with `h <= dry_tol` is dry.
    pub dry_tol: W,
    /// Eigenvalue separation below which a decomposition is degenerate.
    pub eps_lambda: W,
}

impl<W: Working> Tolerances<W> {
    /// Thresholds for a storage accuracy class.
    pub fn for_class(class: PrecisionClass) -> Self {
        let (h_min, dry_tol, eps_lambda) = match class {
            PrecisionClass::Double => (1.5e-8, 1.5e-7, 7.7e-4),
            PrecisionClass::Single => (3.5e-4, 3.5e-3, 1.2e-1),
            PrecisionClass::BFloat16 => (8.8e-2, 8.8e-1, 1.9),
        };
        Self {
            gravity: W::from_f64_lossy(GRAVITY),
            h_min: W::from_f64_lossy(h_min),
            dry_tol: W::from_f64_lossy(dry_tol),
            eps_lambda: W::from_f64_lossy(eps_lambda),
        }
    }

    /// Thresholds matching a storage type.
    pub fn for_storage<S: Storage>() -> Self {
        Self::for_class(S::CLASS)
    }

    /// Override gravity.
    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = W::from_f64_lossy(gravity);
        self
    }

    /// Override the dry tolerance.
    pub fn with_dry_tol(mut self, dry_tol: f64) -> Self {
        self.dry_tol = W::from_f64_lossy(dry_tol);
        self
    }

    /// Override the minimum depth.
    pub fn with_h_min(mut self, h_min: f64) -> Self {
        self.h_min = W::from_f64_lossy(h_min);
        self
    }

    /// Check that the thresholds are usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.gravity > W::ZERO && self.gravity.is_finite()) {
            return Err(SweError::InvalidConfig(format!(
                "gravity must be positive and finite, got {}",
                self.gravity
            )));
        }
        if !(self.h_min >= W::ZERO) {
            return Err(SweError::InvalidConfig(format!(
                "h_min must be non-negative, got {}",
                self.h_min
            )));
        }
        if !(self.dry_tol >= self.h_min) {
            return Err(SweError::InvalidConfig(format!(
                "dry_tol ({}) must not be below h_min ({})",
                self.dry_tol, self.h_min
            )));
        }
        if !(self.eps_lambda > W::ZERO) {
            return Err(SweError::InvalidConfig(format!(
                "eps_lambda must be positive, got {}",
                self.eps_lambda
            )));
        }
        Ok(())
    }
}

impl<W: Working> Default for Tolerances<W> {
    fn default() -> Self {
        Self::for_class(PrecisionClass::Double)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::precision::Bf16;

    #[test]
    fn test_thresholds_grow_with_narrower_storage() {
        let d = Tolerances::<f64>::for_storage::<f64>();
        let s = Tolerances::<f64>::for_storage::<f32>();
        let b = Tolerances::<f64>::for_storage::<Bf16>();
        assert!(d.dry_tol < s.dry_tol && s.dry_tol < b.dry_tol);
        assert!(d.eps_lambda < s.eps_lambda && s.eps_lambda < b.eps_lambda);
        assert_eq!(d.gravity, GRAVITY);
    }

    #[test]
    fn test_defaults_validate() {
        assert!(Tolerances::<f64>::default().validate().is_ok());
        assert!(Tolerances::<f32>::for_class(PrecisionClass::BFloat16).validate().is_ok());
    }

    #[test]
    fn test_invalid_overrides_rejected() {
        let t = Tolerances::<f64>::default().with_gravity(0.0);
        assert!(t.validate().is_err());

        let t = Tolerances::<f64>::default().with_dry_tol(1e-12);
        assert!(t.validate().is_err());

        let t = Tolerances::<f64>::default().with_h_min(f64::NAN);
        assert!(t.validate().is_err());
    }
}
