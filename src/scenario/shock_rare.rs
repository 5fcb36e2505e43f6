//! Shock-shock and rare-rare problems.

use crate::error::{Result, SweError};

use super::Scenario;

/// Constant height with momentum `hu_left` up to `position` and `-hu_left`
/// beyond it.
///
/// A positive `hu_left` drives two shocks apart from a collision; a negative
/// one opens two rarefactions.
#[derive(Clone, Debug, PartialEq)]
pub struct ShockRare {
    width: f64,
    size: usize,
    position: usize,
    h: f64,
    hu_left: f64,
}

impl ShockRare {
    /// Requires `width > 0`, `h > 0`, `hu_left != 0` and `position < size`.
    pub fn new(width: f64, size: usize, position: usize, h: f64, hu_left: f64) -> Result<Self> {
        if !(width > 0.0) {
            return Err(SweError::InvalidScenario(format!(
                "domain width must be positive, got {width}"
            )));
        }
        if !(h > 0.0) {
            return Err(SweError::InvalidScenario(format!("water height must be positive, got {h}")));
        }
        if hu_left == 0.0 || !hu_left.is_finite() {
            return Err(SweError::InvalidScenario(format!(
                "momentum must be finite and non-zero, got {hu_left}"
            )));
        }
        if position >= size {
            return Err(SweError::InvalidScenario(format!(
                "discontinuity at {position} lies outside [0, {size})"
            )));
        }
        Ok(Self {
            width,
            size,
            position,
            h,
            hu_left,
        })
    }

    /// Discontinuity in the middle of the domain.
    pub fn centered(width: f64, size: usize, h: f64, hu_left: f64) -> Result<Self> {
        Self::new(width, size, size / 2, h, hu_left)
    }
}

impl Scenario for ShockRare {
    fn cell_size(&self) -> f64 {
        self.width / self.size as f64
    }

    fn height(&self, _pos: usize) -> f64 {
        self.h
    }

    fn momentum(&self, pos: usize) -> f64 {
        if pos <= self.position { self.hu_left } else { -self.hu_left }
    }

    fn name(&self) -> &'static str {
        if self.hu_left > 0.0 { "shock-shock" } else { "rare-rare" }
    }
}
