//! Dam break on a flat bed.

use crate::error::{Result, SweError};

use super::Scenario;

/// Deep still water left of the dam, shallower water moving right of it.
///
/// Cells `pos <= size / 2` (array index, ghost included) hold `h_left` at
/// rest; the others hold `h_right` with velocity `u_right`.
#[derive(Clone, Debug, PartialEq)]
pub struct DamBreak {
    width: f64,
    size: usize,
    h_left: f64,
    h_right: f64,
    u_right: f64,
}

impl DamBreak {
    /// Create a dam break, rejecting non-physical parameters.
    ///
    /// Requires `width > 0`, `h_left > h_right > 0` and `u_right >= 0`.
    pub fn new(width: f64, size: usize, h_left: f64, h_right: f64, u_right: f64) -> Result<Self> {
        if !(width > 0.0) {
            return Err(SweError::InvalidScenario(format!(
                "domain width must be positive, got {width}"
            )));
        }
        if size == 0 {
            return Err(SweError::InvalidScenario("dam break needs at least one cell".into()));
        }
        if !(h_left > h_right) {
            return Err(SweError::InvalidScenario(format!(
                "water behind the dam ({h_left}) must be higher than in front of it ({h_right})"
            )));
        }
        if !(h_right > 0.0) {
            return Err(SweError::InvalidScenario(format!(
                "water height right of the dam must be positive, got {h_right}"
            )));
        }
        if !(u_right >= 0.0) {
            return Err(SweError::InvalidScenario(format!(
                "velocity right of the dam must be non-negative, got {u_right}"
            )));
        }
        Ok(Self {
            width,
            size,
            h_left,
            h_right,
            u_right,
        })
    }

    fn is_left(&self, pos: usize) -> bool {
        pos <= self.size / 2
    }
}

impl Scenario for DamBreak {
    fn cell_size(&self) -> f64 {
        self.width / self.size as f64
    }

    fn height(&self, pos: usize) -> f64 {
        if self.is_left(pos) { self.h_left } else { self.h_right }
    }

    fn momentum(&self, pos: usize) -> f64 {
        if self.is_left(pos) {
            0.0
        } else {
            self.h_right * self.u_right
        }
    }

    fn name(&self) -> &'static str {
        "dam-break"
    }
}
