//! Error types for the mapping engine.

use thiserror::Error;

/// Boxed error from a row source, kept so the source chain survives.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for container loading and binding.
#[derive(Error, Debug)]
pub enum MapError {
    /// Destination is not a struct-shaped type
    #[error("Destination must be a struct-shaped type, got {0}")]
    InvalidDestination(&'static str),

    /// Binding attempted against a record with no attached fields
    #[error("Record contains no data")]
    NoData,

    /// A matched value could not be coerced into its destination field
    #[error("Cannot convert {source_type} to {target_type} for field '{field}'")]
    FieldConversion {
        field: String,
        source_type: &'static str,
        target_type: &'static str,
    },

    /// The row cursor could not report its columns
    #[error("Failed to get columns: {0}")]
    Columns(#[source] BoxError),

    /// The row cursor could not scan the current row
    #[error("Failed to scan row: {0}")]
    Scan(#[source] BoxError),

    /// The row cursor reported a failure after iteration stopped
    #[error("Row cursor failed: {0}")]
    Cursor(#[source] BoxError),
}

impl MapError {
    pub(crate) fn field_conversion(field: &str, err: ConversionError) -> Self {
        MapError::FieldConversion {
            field: field.to_string(),
            source_type: err.source_type,
            target_type: err.target_type,
        }
    }
}

/// A single value could not be coerced into a target type.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cannot convert {source_type} to {target_type}")]
pub struct ConversionError {
    pub source_type: &'static str,
    pub target_type: &'static str,
}

impl ConversionError {
    pub fn new(source_type: &'static str, target_type: &'static str) -> Self {
        Self {
            source_type,
            target_type,
        }
    }
}

pub type Result<T, E = MapError> = std::result::Result<T, E>;
