//! Boundary conditions for the 1D domain.
//!
//! Boundaries are imposed through the ghost cells at index `0` and
//! `size + 1`, which are refilled from their physical neighbour before
//! every flux sweep:
//!
//! - [`BoundaryCondition::Outflow`]: zero gradient, `(h, hu, b)` copied
//! - [`BoundaryCondition::Reflecting`]: solid wall, `h` and `b` copied and
//!   `hu` negated, so the edge sees a mirrored Riemann problem with zero
//!   mass flux

use std::fmt;
use std::str::FromStr;

use crate::precision::Storage;
use crate::state::CellState;

/// Boundary treatment at one end of the domain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoundaryCondition {
    /// Zero-gradient (transmissive) boundary.
    #[default]
    Outflow,
    /// Solid wall.
    Reflecting,
}

/// End of the domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoundarySide {
    Left,
    Right,
}

impl BoundaryCondition {
    /// Ghost `(h, hu, b)` for the given interior cell values.
    #[inline]
    pub fn ghost_state<S: Storage>(self, h: S, hu: S, b: S) -> (S, S, S) {
        match self {
            BoundaryCondition::Outflow => (h, hu, b),
            BoundaryCondition::Reflecting => (h, -hu, b),
        }
    }

    /// Refill the ghost cell on `side` from its physical neighbour.
    pub fn apply<S: Storage>(self, side: BoundarySide, state: &mut CellState<S>) {
        let size = state.size();
        let (ghost, interior) = match side {
            BoundarySide::Left => (0, 1),
            BoundarySide::Right => (size + 1, size),
        };
        let (h, hu, b) = state.arrays_mut();
        let (gh, ghu, gb) = self.ghost_state(h[interior], hu[interior], b[interior]);
        h[ghost] = gh;
        hu[ghost] = ghu;
        b[ghost] = gb;
    }

    pub fn name(self) -> &'static str {
        match self {
            BoundaryCondition::Outflow => "outflow",
            BoundaryCondition::Reflecting => "reflecting",
        }
    }
}

impl fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BoundaryCondition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "outflow" | "o" | "transmissive" => Ok(BoundaryCondition::Outflow),
            "reflecting" | "r" | "wall" | "reflective" => Ok(BoundaryCondition::Reflecting),
            other => Err(format!(
                "unknown boundary condition '{other}' (expected outflow or reflecting)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> CellState<f64> {
        CellState::from_f64(
            &[0.0, 2.0, 3.0, 4.0, 0.0],
            &[0.0, 1.5, 0.0, -0.5, 0.0],
            &[0.0, -2.0, -3.0, -4.0, 0.0],
        )
        .unwrap()
    }

    #[test]
    fn test_outflow_copies_neighbour() {
        let mut s = state();
        BoundaryCondition::Outflow.apply(BoundarySide::Left, &mut s);
        BoundaryCondition::Outflow.apply(BoundarySide::Right, &mut s);
        assert_eq!((s.h()[0], s.hu()[0], s.b()[0]), (2.0, 1.5, -2.0));
        assert_eq!((s.h()[4], s.hu()[4], s.b()[4]), (4.0, -0.5, -4.0));
    }

    #[test]
    fn test_reflecting_negates_momentum() {
        let mut s = state();
        BoundaryCondition::Reflecting.apply(BoundarySide::Left, &mut s);
        BoundaryCondition::Reflecting.apply(BoundarySide::Right, &mut s);
        assert_eq!((s.h()[0], s.hu()[0], s.b()[0]), (2.0, -1.5, -2.0));
        assert_eq!((s.h()[4], s.hu()[4], s.b()[4]), (4.0, 0.5, -4.0));
    }

    #[test]
    fn test_interior_untouched() {
        let mut s = state();
        let before = s.clone();
        BoundaryCondition::Reflecting.apply(BoundarySide::Right, &mut s);
        assert_eq!(&s.h()[1..4], &before.h()[1..4]);
        assert_eq!(&s.hu()[1..4], &before.hu()[1..4]);
    }

    #[test]
    fn test_parse() {
        assert_eq!("wall".parse(), Ok(BoundaryCondition::Reflecting));
        assert_eq!("Outflow".parse(), Ok(BoundaryCondition::Outflow));
        assert!("periodic".parse::<BoundaryCondition>().is_err());
    }
}
