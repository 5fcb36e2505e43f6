//! Numeric precision policy.
//!
//! - [`Working`]: the scalar type all solver arithmetic uses (`f32` or `f64`)
//! - [`Storage`]: the type cell arrays are stored in (`f64`, `f32` or [`Bf16`])
//! - [`PrecisionPolicy`]: a pairing of the two, selected at compile time
//! - [`Tolerances`]: gravity and the precision-dependent thresholds

mod bf16;
mod kahan;
mod policy;
mod scalar;
mod storage;
mod tolerance;

pub use bf16::Bf16;
pub use kahan::KahanSum;
pub use policy::{Bf16Safe, Double, MixedBf16, MixedSingle, Precision, PrecisionPolicy};
pub use scalar::Working;
pub use storage::{PrecisionClass, Storage};
pub use tolerance::{GRAVITY, Tolerances};
