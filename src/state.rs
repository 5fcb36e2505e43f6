//! Cell state arrays.
//!
//! A domain of `size` cells is stored with one ghost cell on each side:
//! index `0` and `size + 1` are ghosts, `1..=size` are physical cells.
//! Heights, momenta and bed elevations are stored in the policy's
//! [`Storage`] type.

use crate::error::{Result, SweError};
use crate::precision::{KahanSum, Storage};
use crate::scenario::Scenario;

/// Height, momentum and bed elevation of every cell, ghosts included.
#[derive(Clone, Debug, PartialEq)]
pub struct CellState<S> {
    h: Vec<S>,
    hu: Vec<S>,
    b: Vec<S>,
}

impl<S: Storage> CellState<S> {
    /// Still water of zero depth on a flat bed.
    pub fn new(size: usize) -> Result<Self> {
        check_size(size)?;
        Ok(Self {
            h: vec![S::default(); size + 2],
            hu: vec![S::default(); size + 2],
            b: vec![S::default(); size + 2],
        })
    }

    /// Take ownership of existing arrays, each of length `size + 2`.
    pub fn from_vectors(h: Vec<S>, hu: Vec<S>, b: Vec<S>) -> Result<Self> {
        let len = h.len();
        if len < 3 {
            return Err(SweError::InvalidConfig(format!(
                "cell arrays need at least one physical and two ghost cells, got length {len}"
            )));
        }
        for other in [hu.len(), b.len()] {
            if other != len {
                return Err(SweError::StateLength {
                    expected: len,
                    actual: other,
                });
            }
        }
        Ok(Self { h, hu, b })
    }

    /// Round `f64` arrays into storage.
    pub fn from_f64(h: &[f64], hu: &[f64], b: &[f64]) -> Result<Self> {
        let quantize = |v: &[f64]| -> Vec<S> { v.iter().map(|&x| S::quantize(x)).collect() };
        Self::from_vectors(quantize(h), quantize(hu), quantize(b))
    }

    /// Sample a scenario at every cell, ghosts included.
    pub fn from_scenario<C: Scenario + ?Sized>(scenario: &C, size: usize) -> Result<Self> {
        check_size(size)?;
        let cells = 0..size + 2;
        Ok(Self {
            h: cells.clone().map(|i| S::quantize(scenario.height(i))).collect(),
            hu: cells.clone().map(|i| S::quantize(scenario.momentum(i))).collect(),
            b: cells.map(|i| S::quantize(scenario.bathymetry(i))).collect(),
        })
    }

    /// Number of physical cells.
    #[inline]
    pub fn size(&self) -> usize {
        self.h.len() - 2
    }

    #[inline]
    pub fn h(&self) -> &[S] {
        &self.h
    }

    #[inline]
    pub fn hu(&self) -> &[S] {
        &self.hu
    }

    #[inline]
    pub fn b(&self) -> &[S] {
        &self.b
    }

    /// Mutable access to all three arrays at once.
    #[inline]
    pub fn arrays_mut(&mut self) -> (&mut [S], &mut [S], &mut [S]) {
        (&mut self.h, &mut self.hu, &mut self.b)
    }

    /// Water surface elevation `h + b` of cell `i`.
    pub fn surface(&self, i: usize) -> f64 {
        self.h[i].widen() + self.b[i].widen()
    }

    /// Total water volume per unit cell width, physical cells only.
    pub fn total_volume(&self, compensated: bool) -> f64 {
        let interior = self.h[1..=self.size()].iter().map(|h| h.widen());
        if compensated {
            interior.collect::<KahanSum>().total()
        } else {
            interior.sum()
        }
    }

    /// Smallest height over the physical cells.
    pub fn min_height(&self) -> f64 {
        self.h[1..=self.size()]
            .iter()
            .map(|h| h.widen())
            .fold(f64::INFINITY, f64::min)
    }

    /// First physical cell holding a NaN or infinity, with the offending quantity.
    pub fn first_non_finite(&self) -> Option<(usize, &'static str)> {
        (1..=self.size()).find_map(|i| {
            if !self.h[i].is_finite_value() {
                Some((i, "height"))
            } else if !self.hu[i].is_finite_value() {
                Some((i, "momentum"))
            } else if !self.b[i].is_finite_value() {
                Some((i, "bathymetry"))
            } else {
                None
            }
        })
    }

    /// Physical-cell values widened to `f64`, for output.
    pub fn interior_f64(&self) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let widen = |v: &[S]| -> Vec<f64> { v[1..=self.size()].iter().map(|x| x.widen()).collect() };
        (widen(&self.h), widen(&self.hu), widen(&self.b))
    }
}

fn check_size(size: usize) -> Result<()> {
    if size == 0 {
        return Err(SweError::InvalidConfig(
            "domain must contain at least one cell".into(),
        ));
    }
    Ok(())
}
