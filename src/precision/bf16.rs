//! Brain floating point (bfloat16) value type.
//!
//! A `Bf16` is the upper half of an IEEE-754 binary32: 1 sign bit,
//! 8 exponent bits, 7 mantissa bits. It has the dynamic range of `f32` with
//! roughly two to three significant decimal digits. It is used purely as a
//! storage format; arithmetic always happens after widening to `f32` or
//! `f64`.
//!
//! Narrowing from `f32` rounds to nearest, ties to even. NaN payloads keep
//! their upper bits and are forced quiet.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;

/// 16-bit brain floating point number.
#[derive(Clone, Copy, Default)]
#[repr(transparent)]
pub struct Bf16(u16);

impl Bf16 {
    /// Positive zero.
    pub const ZERO: Bf16 = Bf16(0x0000);
    /// One.
    pub const ONE: Bf16 = Bf16(0x3F80);
    /// Smallest positive normal value.
    pub const MIN_POSITIVE: Bf16 = Bf16(0x0080);
    /// Largest finite value.
    pub const MAX: Bf16 = Bf16(0x7F7F);
    /// Most negative finite value.
    pub const MIN: Bf16 = Bf16(0xFF7F);
    /// Difference between 1 and the next representable value.
    pub const EPSILON: Bf16 = Bf16(0x3C00);
    /// Positive infinity.
    pub const INFINITY: Bf16 = Bf16(0x7F80);
    /// Negative infinity.
    pub const NEG_INFINITY: Bf16 = Bf16(0xFF80);
    /// Quiet NaN.
    pub const NAN: Bf16 = Bf16(0x7FC0);

    const SIGN_MASK: u16 = 0x8000;
    const EXP_MASK: u16 = 0x7F80;
    const MANTISSA_MASK: u16 = 0x007F;
    const QUIET_BIT: u16 = 0x0040;

    /// Reinterpret raw bits.
    #[inline]
    pub const fn from_bits(bits: u16) -> Self {
        Bf16(bits)
    }

    /// Raw bit pattern.
    #[inline]
    pub const fn to_bits(self) -> u16 {
        self.0
    }

    /// Narrow an `f32`, rounding to nearest even.
    pub fn from_f32(value: f32) -> Self {
        let bits = value.to_bits();
        if value.is_nan() {
            return Bf16((bits >> 16) as u16 | Self::QUIET_BIT);
        }
        // Non-NaN patterns top out at 0xFF80_0000, so the add cannot wrap.
        let rounding_bias = 0x7FFF + ((bits >> 16) & 1);
        Bf16(((bits + rounding_bias) >> 16) as u16)
    }

    /// Narrow an `f64` through `f32`.
    #[inline]
    pub fn from_f64(value: f64) -> Self {
        Self::from_f32(value as f32)
    }

    /// Widen to `f32`. Exact.
    #[inline]
    pub fn to_f32(self) -> f32 {
        f32::from_bits((self.0 as u32) << 16)
    }

    /// Widen to `f64`. Exact.
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.to_f32() as f64
    }

    #[inline]
    pub fn is_nan(self) -> bool {
        self.0 & Self::EXP_MASK == Self::EXP_MASK && self.0 & Self::MANTISSA_MASK != 0
    }

    #[inline]
    pub fn is_infinite(self) -> bool {
        self.0 & !Self::SIGN_MASK == Self::INFINITY.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0 & Self::EXP_MASK != Self::EXP_MASK
    }

    #[inline]
    pub fn is_sign_negative(self) -> bool {
        self.0 & Self::SIGN_MASK != 0
    }

    /// Absolute value (clears the sign bit).
    #[inline]
    pub fn abs(self) -> Self {
        Bf16(self.0 & !Self::SIGN_MASK)
    }
}

impl Neg for Bf16 {
    type Output = Bf16;

    #[inline]
    fn neg(self) -> Bf16 {
        Bf16(self.0 ^ Self::SIGN_MASK)
    }
}

impl PartialEq for Bf16 {
    fn eq(&self, other: &Self) -> bool {
        self.to_f32() == other.to_f32()
    }
}

impl PartialOrd for Bf16 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.to_f32().partial_cmp(&other.to_f32())
    }
}

impl From<Bf16> for f32 {
    #[inline]
    fn from(value: Bf16) -> f32 {
        value.to_f32()
    }
}

impl From<Bf16> for f64 {
    #[inline]
    fn from(value: Bf16) -> f64 {
        value.to_f64()
    }
}

impl fmt::Debug for Bf16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bf16({:?})", self.to_f32())
    }
}

impl fmt::Display for Bf16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_f32(), f)
    }
}
