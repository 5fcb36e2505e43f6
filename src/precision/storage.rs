//! Storage representations for cell state.
//!
//! Cell arrays are kept in a [`Storage`] type, which may be narrower than the
//! working type. Every load goes through [`Storage::promote`] and every store
//! through [`Storage::demote`]; no arithmetic is ever done on the storage
//! type directly.

use std::fmt::{Debug, Display};
use std::ops::Neg;

use super::{Bf16, Working};

/// Accuracy class of a storage format.
///
/// Selects the precision-dependent thresholds in
/// [`Tolerances`](super::Tolerances).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrecisionClass {
    /// IEEE binary64.
    Double,
    /// IEEE binary32.
    Single,
    /// bfloat16.
    BFloat16,
}

/// Scalar representation used for stored cell values.
pub trait Storage:
    Copy + Default + Debug + Display + PartialEq + PartialOrd + Neg<Output = Self> + Send + Sync + 'static
{
    /// Accuracy class of this format.
    const CLASS: PrecisionClass;

    /// Short name for logs.
    const NAME: &'static str;

    /// Widen a stored value into the working type.
    fn promote<W: Working>(self) -> W;

    /// Round a working value into storage.
    fn demote<W: Working>(value: W) -> Self;

    /// Round an `f64` into storage (scenario seeding, test setup).
    fn quantize(value: f64) -> Self;

    /// Widen to `f64` for output and diagnostics.
    fn widen(self) -> f64;

    /// Whether the stored value is neither NaN nor infinite.
    fn is_finite_value(self) -> bool;
}

impl Storage for f64 {
    const CLASS: PrecisionClass = PrecisionClass::Double;
    const NAME: &'static str = "f64";

    #[inline]
    fn promote<W: Working>(self) -> W {
        W::from_f64_lossy(self)
    }

    #[inline]
    fn demote<W: Working>(value: W) -> Self {
        value.as_f64()
    }

    #[inline]
    fn quantize(value: f64) -> Self {
        value
    }

    #[inline]
    fn widen(self) -> f64 {
        self
    }

    #[inline]
    fn is_finite_value(self) -> bool {
        self.is_finite()
    }
}

impl Storage for f32 {
    const CLASS: PrecisionClass = PrecisionClass::Single;
    const NAME: &'static str = "f32";

    #[inline]
    fn promote<W: Working>(self) -> W {
        W::from_f64_lossy(self as f64)
    }

    #[inline]
    fn demote<W: Working>(value: W) -> Self {
        value.as_f64() as f32
    }

    #[inline]
    fn quantize(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn widen(self) -> f64 {
        self as f64
    }

    #[inline]
    fn is_finite_value(self) -> bool {
        self.is_finite()
    }
}

impl Storage for Bf16 {
    const CLASS: PrecisionClass = PrecisionClass::BFloat16;
    const NAME: &'static str = "bf16";

    #[inline]
    fn promote<W: Working>(self) -> W {
        W::from_f64_lossy(self.to_f64())
    }

    #[inline]
    fn demote<W: Working>(value: W) -> Self {
        Bf16::from_f64(value.as_f64())
    }

    #[inline]
    fn quantize(value: f64) -> Self {
        Bf16::from_f64(value)
    }

    #[inline]
    fn widen(self) -> f64 {
        self.to_f64()
    }

    #[inline]
    fn is_finite_value(self) -> bool {
        self.is_finite()
    }
}
