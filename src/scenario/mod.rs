//! Initial conditions.
//!
//! A [`Scenario`] is sampled once per cell index `0..size + 2` (ghost cells
//! included) by [`CellState::from_scenario`](crate::state::CellState::from_scenario).
//!
//! - [`DamBreak`]: two still or right-moving water levels meeting mid-domain
//! - [`ShockRare`]: constant height with colliding or separating momentum
//! - [`Subcritical`] / [`Supercritical`]: steady flow over a parabolic bump

mod channel;
mod dam_break;
mod shock_rare;

pub use channel::{CHANNEL_LENGTH, Subcritical, Supercritical};
pub use dam_break::DamBreak;
pub use shock_rare::ShockRare;

/// Initial water height, momentum and bed elevation per cell index.
pub trait Scenario: Send + Sync {
    /// Width of one cell (domain length / number of cells).
    fn cell_size(&self) -> f64;

    /// Initial water height at cell index `pos`.
    fn height(&self, pos: usize) -> f64;

    /// Initial momentum `hu` at cell index `pos`.
    fn momentum(&self, pos: usize) -> f64;

    /// Bed elevation at cell index `pos`.
    fn bathymetry(&self, _pos: usize) -> f64 {
        0.0
    }

    /// Name for logging.
    fn name(&self) -> &'static str;
}

impl<T: Scenario + ?Sized> Scenario for Box<T> {
    fn cell_size(&self) -> f64 {
        (**self).cell_size()
    }

    fn height(&self, pos: usize) -> f64 {
        (**self).height(pos)
    }

    fn momentum(&self, pos: usize) -> f64 {
        (**self).momentum(pos)
    }

    fn bathymetry(&self, pos: usize) -> f64 {
        (**self).bathymetry(pos)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Still;

    impl Scenario for Still {
        fn cell_size(&self) -> f64 {
            1.0
        }

        fn height(&self, _: usize) -> f64 {
            2.0
        }

        fn momentum(&self, _: usize) -> f64 {
            0.0
        }

        fn name(&self) -> &'static str {
            "still"
        }
    }

    #[test]
    fn test_default_bathymetry_is_flat() {
        let boxed: Box<dyn Scenario> = Box::new(Still);
        assert_eq!(boxed.bathymetry(7), 0.0);
        assert_eq!(boxed.height(3), 2.0);
        assert_eq!(boxed.name(), "still");
    }
}
