//! Working-precision scalar abstraction.
//!
//! All arithmetic in the solvers is written against [`Working`], so the same
//! code runs in `f32` or `f64`. The trait is sealed: only the two IEEE types
//! implement it. Narrow storage formats live behind
//! [`Storage`](super::Storage) and are promoted before any arithmetic.

use std::fmt::{Debug, Display};

use num_traits::{Float, FromPrimitive, NumAssign};

mod private {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Scalar type used for all solver arithmetic.
///
/// Use as a generic bound (`W: Working`), never as a trait object.
pub trait Working:
    private::Sealed
    + Float
    + FromPrimitive
    + NumAssign
    + Debug
    + Display
    + Default
    + Send
    + Sync
    + 'static
{
    /// `0.0`
    const ZERO: Self;
    /// `1.0`
    const ONE: Self;
    /// `2.0`
    const TWO: Self;
    /// `0.5`
    const HALF: Self;

    /// Convert a configuration-level `f64` into the working type.
    ///
    /// May round when the working type is `f32`.
    fn from_f64_lossy(v: f64) -> Self;

    /// Widen back to `f64` for diagnostics and output.
    fn as_f64(self) -> f64;

    /// Largest of three values.
    #[inline]
    fn max3(a: Self, b: Self, c: Self) -> Self {
        a.max(b).max(c)
    }
}

impl Working for f32 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const TWO: Self = 2.0;
    const HALF: Self = 0.5;

    #[inline]
    fn from_f64_lossy(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl Working for f64 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const TWO: Self = 2.0;
    const HALF: Self = 0.5;

    #[inline]
    fn from_f64_lossy(v: f64) -> Self {
        v
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self
    }
}
