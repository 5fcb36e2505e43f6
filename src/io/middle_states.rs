//! Reference middle states for Riemann problems.
//!
//! Each CSV row is `h_left, h_right, hu_left, hu_right, h_star` with no
//! header: two constant states and the exact height of the middle state
//! that forms between them.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::OutputError;

/// One Riemann problem and its exact middle height.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct MiddleStateRecord {
    pub h_left: f64,
    pub h_right: f64,
    pub hu_left: f64,
    pub hu_right: f64,
    pub h_star: f64,
}

impl MiddleStateRecord {
    fn validate(&self) -> Result<(), OutputError> {
        let values = [self.h_left, self.h_right, self.hu_left, self.hu_right, self.h_star];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(OutputError::InvalidRecord(format!("non-finite value in {self:?}")));
        }
        if self.h_left <= 0.0 || self.h_right <= 0.0 || self.h_star <= 0.0 {
            return Err(OutputError::InvalidRecord(format!(
                "heights must be positive in {self:?}"
            )));
        }
        Ok(())
    }
}

/// Sequential reader over a middle-state table.
///
/// Reads are stateful: each call continues where the previous one stopped.
pub struct MiddleStateReader<R: Read> {
    reader: csv::Reader<R>,
}

impl MiddleStateReader<File> {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, OutputError> {
        Ok(Self::from_reader(File::open(path)?))
    }
}

impl<R: Read> MiddleStateReader<R> {
    pub fn from_reader(input: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(input);
        Self { reader }
    }

    /// Skip `skip` rows, then return up to `take` records.
    ///
    /// Fewer than `take` records are returned when the input runs out.
    pub fn read(&mut self, skip: usize, take: usize) -> Result<Vec<MiddleStateRecord>, OutputError> {
        let mut rows = self.reader.deserialize::<MiddleStateRecord>();
        for row in rows.by_ref().take(skip) {
            row?;
        }
        let mut records = Vec::new();
        for row in rows.take(take) {
            let record = row?;
            record.validate()?;
            records.push(record);
        }
        Ok(records)
    }

    /// Every remaining record.
    pub fn read_all(&mut self) -> Result<Vec<MiddleStateRecord>, OutputError> {
        self.read(0, usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
8027.37052989784,8027.37052989784,-673.421223876821,673.421223876821,8024.97096123124
6946.8507755619, 6946.8507755619, 636.353083309348, -636.353083309348, 6949.28862991558
1644.43072715937,1957.22266657384,152.35181956124,697.728467320789,1795.58340856224
";

    #[test]
    fn test_skip_and_take() {
        let mut reader = MiddleStateReader::from_reader(TABLE.as_bytes());
        let records = reader.read(1, 1).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].hu_left, 636.353083309348);
        assert_eq!(records[0].h_star, 6949.28862991558);

        let rest = reader.read_all().unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].h_left, 1644.43072715937);
        assert!(reader.read(0, 5).unwrap().is_empty());
    }

    #[test]
    fn test_short_row_rejected() {
        let mut reader = MiddleStateReader::from_reader("1.0,2.0,3.0\n".as_bytes());
        assert!(matches!(reader.read_all(), Err(OutputError::Csv(_))));
    }

    #[test]
    fn test_negative_height_rejected() {
        let mut reader = MiddleStateReader::from_reader("-1.0,2.0,0.0,0.0,1.5\n".as_bytes());
        assert!(matches!(reader.read_all(), Err(OutputError::InvalidRecord(_))));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, TABLE.as_bytes()).unwrap();
        let mut reader = MiddleStateReader::from_path(file.path()).unwrap();
        assert_eq!(reader.read_all().unwrap().len(), 3);
        assert!(MiddleStateReader::from_path(file.path().with_extension("missing")).is_err());
    }
}
