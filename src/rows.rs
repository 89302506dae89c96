//! Row sources and row flattening.
//!
//! [`RowCursor`] is the boundary to whatever produces rows: it advances,
//! reports column names, and scans the current row into positional slots.
//! [`flatten_row()`] turns the current row into record [`Fields`], turning raw
//! byte cells into text on the way.

use thiserror::Error;

use crate::{
    error::{BoxError, MapError, Result},
    record::Fields,
    value::Value,
};

/// Sequential source of rows.
pub trait RowCursor {
    /// Advances to the next row. Returns `false` once the source is exhausted
    /// or has failed; [`RowCursor::err`] tells the two apart.
    fn next_row(&mut self) -> bool;

    /// Column names of the current result set.
    fn columns(&mut self) -> Result<Vec<String>, BoxError>;

    /// Writes the current row into `slots`, one value per column.
    fn scan(&mut self, slots: &mut [Value]) -> Result<(), BoxError>;

    /// Error that stopped iteration, if any.
    fn err(&mut self) -> Result<(), BoxError> {
        Ok(())
    }

    /// Releases the underlying source.
    fn close(&mut self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<C: RowCursor + ?Sized> RowCursor for &mut C {
    fn next_row(&mut self) -> bool {
        (**self).next_row()
    }

    fn columns(&mut self) -> Result<Vec<String>, BoxError> {
        (**self).columns()
    }

    fn scan(&mut self, slots: &mut [Value]) -> Result<(), BoxError> {
        (**self).scan(slots)
    }

    fn err(&mut self) -> Result<(), BoxError> {
        (**self).err()
    }

    fn close(&mut self) -> Result<(), BoxError> {
        (**self).close()
    }
}

/// Failures raised by the bundled cursors.
#[derive(Error, Debug)]
pub enum CursorError {
    #[error("cursor is closed")]
    Closed,
    #[error("no current row; call next_row first")]
    NoRow,
    #[error("expected {expected} destination slot(s), got {actual}")]
    SlotCount { expected: usize, actual: usize },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Source(String),
}

/// Flattens the cursor's current row into record fields.
pub fn flatten_row<C: RowCursor + ?Sized>(cursor: &mut C) -> Result<Fields> {
    let columns = cursor.columns().map_err(MapError::Columns)?;
    let mut slots = vec![Value::Null; columns.len()];
    cursor.scan(&mut slots).map_err(MapError::Scan)?;
    Ok(columns
        .into_iter()
        .zip(slots)
        .map(|(column, value)| (column, normalize_bytes(value)))
        .collect())
}

fn normalize_bytes(value: Value) -> Value {
    match value {
        Value::Bytes(bytes) => Value::Text(
            String::from_utf8(bytes)
                .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned()),
        ),
        other => other,
    }
}

/// Cursor over rows held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryRows {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    position: Option<usize>,
    closed: bool,
    failure: Option<String>,
}

impl MemoryRows {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_row<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.rows.push(values.into_iter().map(Into::into).collect());
        self
    }

    /// Makes iteration stop after the buffered rows with `message` as the
    /// terminal error.
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    fn current(&self) -> Result<&[Value], CursorError> {
        if self.closed {
            return Err(CursorError::Closed);
        }
        self.position
            .and_then(|idx| self.rows.get(idx))
            .map(Vec::as_slice)
            .ok_or(CursorError::NoRow)
    }
}

impl RowCursor for MemoryRows {
    fn next_row(&mut self) -> bool {
        if self.closed {
            return false;
        }
        let next = self.position.map_or(0, |idx| idx + 1);
        self.position = Some(next.min(self.rows.len()));
        next < self.rows.len()
    }

    fn columns(&mut self) -> Result<Vec<String>, BoxError> {
        if self.closed {
            return Err(CursorError::Closed.into());
        }
        Ok(self.columns.clone())
    }

    fn scan(&mut self, slots: &mut [Value]) -> Result<(), BoxError> {
        let row = self.current()?;
        if slots.len() != row.len() {
            return Err(CursorError::SlotCount {
                expected: row.len(),
                actual: slots.len(),
            }
            .into());
        }
        slots.clone_from_slice(row);
        Ok(())
    }

    fn err(&mut self) -> Result<(), BoxError> {
        match &self.failure {
            Some(message) => Err(CursorError::Source(message.clone()).into()),
            None => Ok(()),
        }
    }

    fn close(&mut self) -> Result<(), BoxError> {
        self.closed = true;
        Ok(())
    }
}
