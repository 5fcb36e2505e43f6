//! VTK output for ParaView.
//!
//! Each snapshot becomes one XML RectilinearGrid file `<name>_<frame>.vtr`
//! with cell data `h`, `hu` and `b`. [`Writer::finish`] adds `<name>.pvd`,
//! a time collection referencing every snapshot.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::precision::Storage;
use crate::state::CellState;

use super::{OutputError, Writer};

/// Indented XML emitter.
struct XmlWriter<W: Write> {
    writer: BufWriter<W>,
    indent: usize,
}

impl<W: Write> XmlWriter<W> {
    fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            indent: 0,
        }
    }

    fn write_indent(&mut self) -> std::io::Result<()> {
        for _ in 0..self.indent {
            write!(self.writer, "  ")?;
        }
        Ok(())
    }

    fn open(&mut self, name: &str, attrs: &[(&str, &str)]) -> std::io::Result<()> {
        self.write_indent()?;
        write!(self.writer, "<{name}")?;
        for (key, value) in attrs {
            write!(self.writer, " {key}=\"{value}\"")?;
        }
        writeln!(self.writer, ">")?;
        self.indent += 1;
        Ok(())
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> std::io::Result<()> {
        self.write_indent()?;
        write!(self.writer, "<{name}")?;
        for (key, value) in attrs {
            write!(self.writer, " {key}=\"{value}\"")?;
        }
        writeln!(self.writer, "/>")
    }

    fn close(&mut self, name: &str) -> std::io::Result<()> {
        self.indent = self.indent.saturating_sub(1);
        self.write_indent()?;
        writeln!(self.writer, "</{name}>")
    }

    fn data_array(&mut self, name: &str, data: &[f64]) -> std::io::Result<()> {
        self.open("DataArray", &[("type", "Float64"), ("Name", name), ("format", "ascii")])?;
        for chunk in data.chunks(6) {
            self.write_indent()?;
            let line: Vec<String> = chunk.iter().map(|v| format!("{v:.10e}")).collect();
            writeln!(self.writer, "{}", line.join(" "))?;
        }
        self.close("DataArray")
    }

    fn finish(mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

/// Writes a `.vtr` file per snapshot and a `.pvd` index on finish.
pub struct VtkWriter {
    directory: PathBuf,
    basename: String,
    cell_size: f64,
    snapshots: Vec<(f64, String)>,
}

impl VtkWriter {
    /// Create the output directory if needed.
    pub fn new(directory: impl AsRef<Path>, basename: &str, cell_size: f64) -> Result<Self, OutputError> {
        let directory = directory.as_ref().to_path_buf();
        fs::create_dir_all(&directory)?;
        Ok(Self {
            directory,
            basename: basename.to_string(),
            cell_size,
            snapshots: Vec::new(),
        })
    }

    /// Number of snapshots written so far.
    pub fn frames(&self) -> usize {
        self.snapshots.len()
    }

    /// Path of the `.pvd` collection written by [`Writer::finish`].
    pub fn collection_path(&self) -> PathBuf {
        self.directory.join(format!("{}.pvd", self.basename))
    }

    fn write_snapshot(&self, path: &Path, time: f64, h: &[f64], hu: &[f64], b: &[f64]) -> std::io::Result<()> {
        let size = h.len();
        let extent = format!("0 {size} 0 0 0 0");
        let x: Vec<f64> = (0..=size).map(|i| i as f64 * self.cell_size).collect();

        let mut xml = XmlWriter::new(File::create(path)?);
        writeln!(xml.writer, "<?xml version=\"1.0\"?>")?;
        xml.open(
            "VTKFile",
            &[("type", "RectilinearGrid"), ("version", "0.1"), ("byte_order", "LittleEndian")],
        )?;
        xml.open("RectilinearGrid", &[("WholeExtent", extent.as_str())])?;

        xml.open("FieldData", &[])?;
        xml.open(
            "DataArray",
            &[("type", "Float64"), ("Name", "TIME"), ("NumberOfTuples", "1"), ("format", "ascii")],
        )?;
        xml.write_indent()?;
        writeln!(xml.writer, "{time:.10e}")?;
        xml.close("DataArray")?;
        xml.close("FieldData")?;

        xml.open("Piece", &[("Extent", extent.as_str())])?;
        xml.open("Coordinates", &[])?;
        xml.data_array("x", &x)?;
        xml.data_array("y", &[0.0])?;
        xml.data_array("z", &[0.0])?;
        xml.close("Coordinates")?;
        xml.open("CellData", &[])?;
        xml.data_array("h", h)?;
        xml.data_array("hu", hu)?;
        xml.data_array("b", b)?;
        xml.close("CellData")?;
        xml.close("Piece")?;

        xml.close("RectilinearGrid")?;
        xml.close("VTKFile")?;
        xml.finish()
    }
}

impl Writer for VtkWriter {
    fn write<S: Storage>(&mut self, time: f64, state: &CellState<S>) -> Result<(), OutputError> {
        let filename = format!("{}_{:05}.vtr", self.basename, self.snapshots.len());
        let (h, hu, b) = state.interior_f64();
        self.write_snapshot(&self.directory.join(&filename), time, &h, &hu, &b)?;
        self.snapshots.push((time, filename));
        Ok(())
    }

    fn finish(&mut self) -> Result<(), OutputError> {
        let mut xml = XmlWriter::new(File::create(self.collection_path())?);
        writeln!(xml.writer, "<?xml version=\"1.0\"?>")?;
        xml.open("VTKFile", &[("type", "Collection"), ("version", "0.1")])?;
        xml.open("Collection", &[])?;
        for (time, file) in &self.snapshots {
            let timestep = format!("{time}");
            xml.empty(
                "DataSet",
                &[("timestep", timestep.as_str()), ("group", ""), ("part", "0"), ("file", file.as_str())],
            )?;
        }
        xml.close("Collection")?;
        xml.close("VTKFile")?;
        xml.finish()?;
        Ok(())
    }
}
