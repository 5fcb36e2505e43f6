//! Crate-level error type.
//!
//! Three kinds of failure are kept apart so callers can tell them apart:
//! configuration problems (raised while constructing a state, block or
//! scenario), numerical degeneracy (raised by a Riemann solver during the
//! flux sweep), and corrupted state (raised by the simulation driver when a
//! NaN or infinity shows up). Negative heights are not errors; they are
//! clamped during the update.

use thiserror::Error;

use crate::riemann::RiemannError;

/// Error type for solver setup and time stepping.
#[derive(Debug, Error)]
pub enum SweError {
    /// Invalid block or solver configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Physically inconsistent scenario parameters.
    #[error("invalid scenario: {0}")]
    InvalidScenario(String),

    /// Cell arrays with the wrong length.
    #[error("cell array length mismatch: expected {expected}, got {actual}")]
    StateLength { expected: usize, actual: usize },

    /// A Riemann solver hit a degenerate configuration at an edge.
    #[error("Riemann solver failed at edge {edge}: {source}")]
    Degenerate {
        edge: usize,
        #[source]
        source: RiemannError,
    },

    /// NaN or infinity in the cell state after a step.
    #[error("non-finite {quantity} in cell {cell} after step {step}")]
    NonFinite {
        step: usize,
        cell: usize,
        quantity: &'static str,
    },
}

impl SweError {
    /// Whether this error was raised during setup rather than while stepping.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            SweError::InvalidConfig(_) | SweError::InvalidScenario(_) | SweError::StateLength { .. }
        )
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SweError>;
