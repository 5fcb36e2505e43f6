//! Input and output.
//!
//! - [`Writer`]: snapshot sink called once per output time
//! - [`ConsoleWriter`]: plain-text table on any `io::Write`
//! - [`VtkWriter`]: XML RectilinearGrid (`.vtr`) per snapshot plus a `.pvd`
//!   collection for ParaView
//! - [`MiddleStateReader`]: reference middle states from CSV

mod console;
mod middle_states;
mod vtk;

use thiserror::Error;

use crate::precision::Storage;
use crate::state::CellState;

pub use console::ConsoleWriter;
pub use middle_states::{MiddleStateReader, MiddleStateRecord};
pub use vtk::VtkWriter;

/// Error type for reading and writing simulation data.
#[derive(Debug, Error)]
pub enum OutputError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV input.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Well-formed row with unusable values.
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

/// Sink for simulation snapshots.
pub trait Writer {
    /// Record the physical cells of `state` at simulation time `time`.
    fn write<S: Storage>(&mut self, time: f64, state: &CellState<S>) -> Result<(), OutputError>;

    /// Flush anything buffered across snapshots.
    fn finish(&mut self) -> Result<(), OutputError> {
        Ok(())
    }
}
