//! Parquet file operations
//!
//! This module reads exposure tables from Parquet files into Arrow record
//! batches and writes harmonized tables back out.

use std::fs::File;
use std::path::Path;
use std::time::Instant;

use arrow::compute::concat_batches;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::error::{HarmonizerError, Result};
use crate::utils::logging::{
    TableOperation, log_empty_table, log_table_complete, log_table_start,
};

/// Default batch size for Parquet reading
pub const DEFAULT_BATCH_SIZE: usize = 16384;

/// Helper function to get batch size from environment
#[must_use]
pub fn get_batch_size() -> Option<usize> {
    std::env::var("PARQUET_BATCH_SIZE")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
}

/// Creates a standardized error for Parquet operations
///
/// # Arguments
/// * `message` - Base error message
/// * `error` - The original error that occurred
pub fn create_parquet_error<E: std::fmt::Display>(message: &str, error: E) -> HarmonizerError {
    HarmonizerError::ParquetError(parquet::errors::ParquetError::General(format!(
        "{message}: {error}"
    )))
}

/// Read every record batch of a parquet file together with its Arrow schema
fn read_batches(path: &Path) -> Result<(SchemaRef, Vec<RecordBatch>)> {
    let file = File::open(path).map_err(|e| {
        HarmonizerError::IoError(std::io::Error::new(
            e.kind(),
            format!("Failed to open file {}: {}", path.display(), e),
        ))
    })?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(|e| {
        create_parquet_error(
            &format!("Failed to read parquet file {}", path.display()),
            e,
        )
    })?;
    let schema = builder.schema().clone();

    let reader = builder
        .with_batch_size(get_batch_size().unwrap_or(DEFAULT_BATCH_SIZE))
        .build()
        .map_err(|e| create_parquet_error("Failed to build parquet reader", e))?;

    let batches = reader
        .map(|batch_result| {
            batch_result.map_err(|e| create_parquet_error("Failed to read record batch", e))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok((schema, batches))
}

/// Read a whole parquet file as a single record batch
///
/// Harmonization validates and seeds by subject position across the whole
/// table, so all row groups are concatenated first.
pub fn read_parquet_table(path: &Path) -> Result<RecordBatch> {
    let start = Instant::now();
    log_table_start(TableOperation::Read, path);

    let (schema, batches) = read_batches(path)?;
    let table = concat_batches(&schema, &batches)?;
    if table.num_rows() == 0 {
        log_empty_table(path);
    }

    log_table_complete(
        TableOperation::Read,
        path,
        table.num_rows(),
        table.num_columns(),
        start.elapsed(),
    );
    Ok(table)
}

/// Write a record batch to a parquet file, replacing any existing file
pub fn write_parquet(path: &Path, batch: &RecordBatch) -> Result<()> {
    let start = Instant::now();
    log_table_start(TableOperation::Write, path);

    let file = File::create(path)?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(batch)?;
    writer.close()?;

    log_table_complete(
        TableOperation::Write,
        path,
        batch.num_rows(),
        batch.num_columns(),
        start.elapsed(),
    );
    Ok(())
}
