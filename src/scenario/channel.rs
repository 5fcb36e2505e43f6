//! Steady channel flow over a parabolic bump.
//!
//! Both scenarios share a 25 m channel with a bump on `8 < x < 12`,
//! where `x = (pos - 1/2) Δx` is the centre of cell `pos`:
//!
//! ```text
//! b(x) = b_top - 0.05 (x - 10)²     inside the bump
//! b(x) = b_floor                    elsewhere
//! h(x) = -b(x),   hu = const
//! ```
//!
//! The subcritical case (`hu = 4.42`, `b_floor = -2`) keeps a smooth dip over
//! the bump; the supercritical case (`hu = 0.18`, `b_floor = -0.33`) forms a
//! hydraulic jump behind it.

use crate::error::{Result, SweError};

use super::Scenario;

/// Length of the channel (m).
pub const CHANNEL_LENGTH: f64 = 25.0;

const BUMP_START: f64 = 8.0;
const BUMP_END: f64 = 12.0;
const BUMP_CENTER: f64 = 10.0;
const BUMP_CURVATURE: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Channel {
    size: usize,
    floor: f64,
    top: f64,
    momentum: f64,
}

impl Channel {
    fn new(size: usize, floor: f64, top: f64, momentum: f64) -> Result<Self> {
        if size == 0 {
            return Err(SweError::InvalidScenario("channel needs at least one cell".into()));
        }
        Ok(Self {
            size,
            floor,
            top,
            momentum,
        })
    }

    fn cell_size(&self) -> f64 {
        CHANNEL_LENGTH / self.size as f64
    }

    fn center(&self, pos: usize) -> f64 {
        (pos as f64 - 0.5) * self.cell_size()
    }

    fn bathymetry(&self, pos: usize) -> f64 {
        let x = self.center(pos);
        if x > BUMP_START && x < BUMP_END {
            self.top - BUMP_CURVATURE * (x - BUMP_CENTER).powi(2)
        } else {
            self.floor
        }
    }
}

/// Subcritical flow (`Fr < 1` everywhere).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Subcritical(Channel);

impl Subcritical {
    pub fn new(size: usize) -> Result<Self> {
        Channel::new(size, -2.0, -1.8, 4.42).map(Self)
    }
}

impl Scenario for Subcritical {
    fn cell_size(&self) -> f64 {
        self.0.cell_size()
    }

    fn height(&self, pos: usize) -> f64 {
        -self.0.bathymetry(pos)
    }

    fn momentum(&self, _pos: usize) -> f64 {
        self.0.momentum
    }

    fn bathymetry(&self, pos: usize) -> f64 {
        self.0.bathymetry(pos)
    }

    fn name(&self) -> &'static str {
        "subcritical"
    }
}

/// Transcritical flow with a hydraulic jump.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Supercritical(Channel);

impl Supercritical {
    pub fn new(size: usize) -> Result<Self> {
        Channel::new(size, -0.33, -0.13, 0.18).map(Self)
    }
}

impl Scenario for Supercritical {
    fn cell_size(&self) -> f64 {
        self.0.cell_size()
    }

    fn height(&self, pos: usize) -> f64 {
        -self.0.bathymetry(pos)
    }

    fn momentum(&self, _pos: usize) -> f64 {
        self.0.momentum
    }

    fn bathymetry(&self, pos: usize) -> f64 {
        self.0.bathymetry(pos)
    }

    fn name(&self) -> &'static str {
        "supercritical"
    }
}
