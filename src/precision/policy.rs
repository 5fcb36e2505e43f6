//! Storage/working precision policies.
//!
//! A policy pairs the type cell arrays are stored in with the type the
//! solvers compute in. The working type is never narrower than storage.

use std::fmt;
use std::str::FromStr;

use super::{Bf16, Storage, Working};

/// Compile-time choice of storage and working precision.
pub trait PrecisionPolicy: Send + Sync + 'static {
    /// Type of stored cell values.
    type Store: Storage;
    /// Type all arithmetic is performed in.
    type Work: Working;

    /// Human-readable name for logging.
    const NAME: &'static str;

    /// Upper bound on the CFL factor for this policy.
    ///
    /// The effective factor is the solver's recommendation capped by this.
    const MAX_CFL: f64;

    /// Use compensated summation for volume diagnostics.
    const USE_KAHAN: bool;
}

/// Double storage, double arithmetic.
#[derive(Clone, Copy, Debug, Default)]
pub struct Double;

impl PrecisionPolicy for Double {
    type Store = f64;
    type Work = f64;
    const NAME: &'static str = "double";
    const MAX_CFL: f64 = 1.0;
    const USE_KAHAN: bool = false;
}

/// Single storage, double arithmetic.
#[derive(Clone, Copy, Debug, Default)]
pub struct MixedSingle;

impl PrecisionPolicy for MixedSingle {
    type Store = f32;
    type Work = f64;
    const NAME: &'static str = "mixed f32/f64";
    const MAX_CFL: f64 = 0.8;
    const USE_KAHAN: bool = true;
}

/// bfloat16 storage, double arithmetic.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bf16Safe;

impl PrecisionPolicy for Bf16Safe {
    type Store = Bf16;
    type Work = f64;
    const NAME: &'static str = "mixed bf16/f64 (safe)";
    const MAX_CFL: f64 = 0.9;
    const USE_KAHAN: bool = false;
}

/// bfloat16 storage, single arithmetic.
#[derive(Clone, Copy, Debug, Default)]
pub struct MixedBf16;

impl PrecisionPolicy for MixedBf16 {
    type Store = Bf16;
    type Work = f32;
    const NAME: &'static str = "mixed bf16/f32 (aggressive)";
    const MAX_CFL: f64 = 0.8;
    const USE_KAHAN: bool = true;
}

/// Runtime selector for a [`PrecisionPolicy`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Precision {
    #[default]
    Double,
    MixedSingle,
    Bf16Safe,
    MixedBf16,
}

impl Precision {
    pub fn name(self) -> &'static str {
        match self {
            Precision::Double => Double::NAME,
            Precision::MixedSingle => MixedSingle::NAME,
            Precision::Bf16Safe => Bf16Safe::NAME,
            Precision::MixedBf16 => MixedBf16::NAME,
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Precision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "double" | "f64" => Ok(Precision::Double),
            "single" | "mixed-single" | "f32" => Ok(Precision::MixedSingle),
            "bf16" | "bf16-safe" => Ok(Precision::Bf16Safe),
            "mixed-bf16" | "bf16-f32" => Ok(Precision::MixedBf16),
            other => Err(format!(
                "unknown precision '{other}' (expected double, single, bf16 or mixed-bf16)"
            )),
        }
    }
}
