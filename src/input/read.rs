use std::io;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;

use super::{ParseError, VectorList, parse_rational};
use crate::math::RationalVector;

/// Failure to load vectors from a file or reader.
#[derive(Debug, Error)]
pub enum InputError {
    /// The file could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The CSV layer rejected the input.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// A field is not a rational literal.
    #[error("row {row}, column {column}: {source}")]
    Parse {
        /// Zero-based record number.
        row: usize,
        /// Zero-based field number.
        column: usize,
        /// Why the field was rejected.
        #[source]
        source: ParseError,
    },

    /// No records were found.
    #[error("CSV input contains no vectors")]
    EmptyFile,
}

impl VectorList {
    /// Read vectors from a header-less CSV file, one vector per row.
    ///
    /// Rows may differ in length; that is reported by the engine as a
    /// dimension mismatch, not here.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, InputError> {
        let rdr = reader_builder().from_path(path)?;
        Self::collect_records(rdr)
    }

    /// Same as [`VectorList::read`] for any byte source.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, InputError> {
        Self::collect_records(reader_builder().from_reader(reader))
    }

    fn collect_records<R: io::Read>(mut rdr: csv::Reader<R>) -> Result<Self, InputError> {
        let mut vectors = Vec::new();
        for (row, result) in rdr.records().enumerate() {
            vectors.push(parse_record(row, &result?)?);
        }

        if vectors.is_empty() {
            return Err(InputError::EmptyFile);
        }

        Ok(Self { vectors })
    }
}

fn reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .comment(Some(b'#'));
    builder
}

fn parse_record(row: usize, record: &StringRecord) -> Result<RationalVector, InputError> {
    record
        .iter()
        .enumerate()
        .map(|(column, field)| {
            parse_rational(field).map_err(|source| InputError::Parse { row, column, source })
        })
        .collect()
}
