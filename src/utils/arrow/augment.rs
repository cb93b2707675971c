//! Appending harmonization results to a record batch.

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, FieldRef, Schema};
use arrow::record_batch::RecordBatch;

use crate::config::ColumnConfig;
use crate::error::{HarmonizerError, Result};
use crate::models::{ExposureCategory, HarmonizationResult};

/// Return a copy of `batch` with category, `p_a`, `p_b` and `p_c` columns added
///
/// Undefined results become nulls in all four columns. Existing columns and
/// schema metadata are kept as they are.
///
/// # Errors
///
/// Returns a schema error if the number of results differs from the number
/// of rows, or if an output column name is already taken.
pub fn append_result_columns(
    batch: &RecordBatch,
    results: &[HarmonizationResult],
    columns: &ColumnConfig,
) -> Result<RecordBatch> {
    if results.len() != batch.num_rows() {
        return Err(HarmonizerError::SchemaError(format!(
            "Got {} results for a batch of {} rows",
            results.len(),
            batch.num_rows()
        )));
    }

    let schema = batch.schema();
    for name in columns.output_columns() {
        if schema.index_of(name).is_ok() {
            return Err(HarmonizerError::SchemaError(format!(
                "Output column '{name}' already exists in the input table"
            )));
        }
    }

    let category: ArrayRef = Arc::new(
        results
            .iter()
            .map(|r| r.category().map(ExposureCategory::label))
            .collect::<StringArray>(),
    );
    let probability = |p: fn(&HarmonizationResult) -> Option<f64>| -> ArrayRef {
        Arc::new(results.iter().map(p).collect::<Float64Array>())
    };
    let p_a = probability(HarmonizationResult::p_a);
    let p_b = probability(HarmonizationResult::p_b);
    let p_c = probability(HarmonizationResult::p_c);

    let mut fields: Vec<FieldRef> = schema.fields().iter().cloned().collect();
    fields.push(Arc::new(Field::new(&columns.category, DataType::Utf8, true)));
    for name in [&columns.p_a, &columns.p_b, &columns.p_c] {
        fields.push(Arc::new(Field::new(name, DataType::Float64, true)));
    }

    let mut arrays = batch.columns().to_vec();
    arrays.extend([category, p_a, p_b, p_c]);

    let schema = Arc::new(Schema::new_with_metadata(fields, schema.metadata().clone()));
    Ok(RecordBatch::try_new(schema, arrays)?)
}
