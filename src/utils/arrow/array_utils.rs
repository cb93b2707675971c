//! Utilities for working with Arrow arrays.
//!
//! This module provides helpers for looking up and downcasting columns of a
//! record batch with consistent error reporting.

use arrow::array::{Array, ArrayRef};
use arrow::record_batch::RecordBatch;
use log::warn;

use crate::error::{HarmonizerError, Result};

/// Get a column from a record batch by name
///
/// # Arguments
///
/// * `batch` - The record batch containing the column
/// * `column_name` - The name of the column to extract
/// * `required` - Whether the column is required (error if missing) or optional (None if missing)
///
/// # Returns
///
/// * `Ok(Some(ArrayRef))` - The column array if found
/// * `Ok(None)` - If the column is not found and `required` is false
/// * `Err` - If the column is not found and `required` is true
pub fn get_column(
    batch: &RecordBatch,
    column_name: &str,
    required: bool,
) -> Result<Option<ArrayRef>> {
    match batch.schema().index_of(column_name) {
        Ok(idx) => Ok(Some(batch.column(idx).clone())),
        Err(_) if required => Err(HarmonizerError::ColumnNotFound {
            column: column_name.to_string(),
        }),
        Err(_) => {
            warn!("Column '{column_name}' not found in record batch");
            Ok(None)
        }
    }
}

/// Downcast an array to a concrete Arrow array type
///
/// # Errors
///
/// Returns a schema error naming the column if the array has another type.
pub fn downcast_array<'a, T: Array + 'static>(
    array: &'a ArrayRef,
    column_name: &str,
) -> Result<&'a T> {
    array.as_any().downcast_ref::<T>().ok_or_else(|| {
        HarmonizerError::SchemaError(format!(
            "Column '{column_name}' has type {:?} and could not be read as {}",
            array.data_type(),
            std::any::type_name::<T>()
        ))
    })
}
