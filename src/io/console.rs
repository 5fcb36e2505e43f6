//! Plain-text snapshot output.

use std::io::{self, Write};

use crate::precision::Storage;
use crate::state::CellState;

use super::{OutputError, Writer};

/// Writes one table per snapshot: cell index, height, momentum, bed.
pub struct ConsoleWriter<W: Write> {
    out: W,
    precision: usize,
}

impl ConsoleWriter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, precision: 6 }
    }

    /// Number of decimals printed per value.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Writer for ConsoleWriter<W> {
    fn write<S: Storage>(&mut self, time: f64, state: &CellState<S>) -> Result<(), OutputError> {
        let p = self.precision;
        let (h, hu, b) = state.interior_f64();
        writeln!(self.out, "# t = {time:.p$}")?;
        writeln!(self.out, "{:>6} {:>16} {:>16} {:>16}", "cell", "h", "hu", "b")?;
        for (i, ((h, hu), b)) in h.iter().zip(&hu).zip(&b).enumerate() {
            writeln!(self.out, "{:>6} {h:>16.p$} {hu:>16.p$} {b:>16.p$}", i + 1)?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), OutputError> {
        self.out.flush()?;
        Ok(())
    }
}
