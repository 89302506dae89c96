//! CSV-backed [`RowCursor`].
//!
//! The header row supplies the column names. Every cell is delivered as raw
//! bytes (empty cells as null) so the row flattener decides how text is
//! normalized. A read error ends iteration and is reported by
//! [`RowCursor::err`].

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use csv::ByteRecord;

use crate::{
    error::BoxError,
    rows::{CursorError, RowCursor},
    value::Value,
};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn resolve_input_delimiter(path: &Path, provided: Option<u8>) -> u8 {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

pub struct CsvRows<R> {
    reader: Option<csv::Reader<R>>,
    record: ByteRecord,
    has_row: bool,
    error: Option<csv::Error>,
}

impl CsvRows<Box<dyn Read>> {
    /// Opens `path` (or stdin for `-`), picking the delimiter from the
    /// extension unless one is given.
    pub fn from_path(path: &Path, delimiter: Option<u8>) -> Result<Self, CursorError> {
        let delimiter = resolve_input_delimiter(path, delimiter);
        let reader: Box<dyn Read> = if is_dash(path) {
            Box::new(std::io::stdin().lock())
        } else {
            Box::new(BufReader::new(File::open(path)?))
        };
        Ok(Self::from_reader(reader, delimiter))
    }
}

impl<R: Read> CsvRows<R> {
    pub fn from_reader(reader: R, delimiter: u8) -> Self {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .has_headers(true)
            .delimiter(delimiter)
            .double_quote(true)
            .flexible(false);
        Self {
            reader: Some(builder.from_reader(reader)),
            record: ByteRecord::new(),
            has_row: false,
            error: None,
        }
    }

    fn reader(&mut self) -> Result<&mut csv::Reader<R>, CursorError> {
        self.reader.as_mut().ok_or(CursorError::Closed)
    }
}

impl<R: Read> RowCursor for CsvRows<R> {
    fn next_row(&mut self) -> bool {
        self.has_row = false;
        if self.error.is_some() {
            return false;
        }
        let Some(reader) = self.reader.as_mut() else {
            return false;
        };
        match reader.read_byte_record(&mut self.record) {
            Ok(more) => self.has_row = more,
            Err(err) => self.error = Some(err),
        }
        self.has_row
    }

    fn columns(&mut self) -> Result<Vec<String>, BoxError> {
        let headers = self.reader()?.byte_headers().map_err(CursorError::from)?;
        Ok(headers
            .iter()
            .map(|name| String::from_utf8_lossy(name).into_owned())
            .collect())
    }

    fn scan(&mut self, slots: &mut [Value]) -> Result<(), BoxError> {
        self.reader()?;
        if !self.has_row {
            return Err(CursorError::NoRow.into());
        }
        if slots.len() != self.record.len() {
            return Err(CursorError::SlotCount {
                expected: self.record.len(),
                actual: slots.len(),
            }
            .into());
        }
        for (slot, cell) in slots.iter_mut().zip(self.record.iter()) {
            *slot = if cell.is_empty() {
                Value::Null
            } else {
                Value::Bytes(cell.to_vec())
            };
        }
        Ok(())
    }

    fn err(&mut self) -> Result<(), BoxError> {
        match self.error.take() {
            Some(err) => Err(CursorError::from(err).into()),
            None => Ok(()),
        }
    }

    fn close(&mut self) -> Result<(), BoxError> {
        self.reader = None;
        self.has_row = false;
        Ok(())
    }
}
