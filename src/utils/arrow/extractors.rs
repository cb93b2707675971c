//! Subject extraction from Arrow record batches
//!
//! Frequency codes may be stored as any integer type, or as floats holding
//! whole numbers (a common artefact of spreadsheet exports). Nulls and NaN
//! are missing responses.

use arrow::array::{Array, Float64Array, Int64Array, StringArray, UInt64Array};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use itertools::izip;
use log::debug;

use crate::config::ColumnConfig;
use crate::error::{HarmonizerError, Result};
use crate::models::{FoodType, RawCode, SubjectRecord};
use crate::utils::arrow::array_utils::{downcast_array, get_column};

/// Extract one frequency-code column as raw codes
///
/// Values are not range checked here; that is the validation pass's job.
///
/// # Errors
///
/// Returns an error if the column is missing or has a non-numeric type.
pub fn extract_code_column(
    batch: &RecordBatch,
    column_name: &str,
) -> Result<Vec<Option<RawCode>>> {
    let array = get_column(batch, column_name, true)?.ok_or_else(|| {
        HarmonizerError::ColumnNotFound {
            column: column_name.to_string(),
        }
    })?;

    match array.data_type() {
        DataType::Null => Ok(vec![None; array.len()]),
        DataType::UInt64 => {
            // Values beyond i64 are out of range anyway; saturate so validation rejects them
            let values = downcast_array::<UInt64Array>(&array, column_name)?;
            Ok(values
                .iter()
                .map(|v| v.map(|v| RawCode::Integer(i64::try_from(v).unwrap_or(i64::MAX))))
                .collect())
        }
        dt if dt.is_integer() => {
            let widened = cast(&array, &DataType::Int64)?;
            let values = downcast_array::<Int64Array>(&widened, column_name)?;
            Ok(values.iter().map(|v| v.map(RawCode::Integer)).collect())
        }
        dt if dt.is_floating() => {
            let widened = cast(&array, &DataType::Float64)?;
            let values = downcast_array::<Float64Array>(&widened, column_name)?;
            Ok(values
                .iter()
                .map(|v| v.filter(|v| !v.is_nan()).map(RawCode::from_f64))
                .collect())
        }
        other => Err(HarmonizerError::SchemaError(format!(
            "Column '{column_name}' has type {other:?}, expected integer frequency codes"
        ))),
    }
}

/// Extract the optional subject identifier column as strings
pub fn extract_subject_ids(
    batch: &RecordBatch,
    column_name: &str,
) -> Result<Option<Vec<Option<String>>>> {
    let Some(array) = get_column(batch, column_name, false)? else {
        return Ok(None);
    };

    let as_strings = cast(&array, &DataType::Utf8)?;
    let ids = downcast_array::<StringArray>(&as_strings, column_name)?;
    Ok(Some(ids.iter().map(|id| id.map(str::to_string)).collect()))
}

/// Build one `SubjectRecord` per row of a batch
pub fn extract_subject_records(
    batch: &RecordBatch,
    columns: &ColumnConfig,
) -> Result<Vec<SubjectRecord>> {
    let sea = extract_code_column(batch, columns.code_column(FoodType::Sea))?;
    let river = extract_code_column(batch, columns.code_column(FoodType::River))?;
    let frozen = extract_code_column(batch, columns.code_column(FoodType::Frozen))?;
    let canned = extract_code_column(batch, columns.code_column(FoodType::Canned))?;

    let ids = match &columns.subject_id {
        Some(name) => extract_subject_ids(batch, name)?,
        None => None,
    };

    let records: Vec<SubjectRecord> = izip!(sea, river, frozen, canned)
        .enumerate()
        .map(|(row, (sea, river, frozen, canned))| SubjectRecord {
            subject_id: ids.as_ref().and_then(|ids| ids[row].clone()),
            sea,
            river,
            frozen,
            canned,
        })
        .collect();

    debug!("Extracted {} subject records from batch", records.len());
    Ok(records)
}
