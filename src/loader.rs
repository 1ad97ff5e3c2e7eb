use std::fs::{self, File};
use std::path::Path;

use polars::prelude::*;
use tracing::debug;

use crate::error::Result;

/// Read a village CSV with all columns as String dtype.
/// Trims whitespace from column names; numeric coercion is left to the pipeline.
pub fn read_villages_csv(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0)) // all columns as String
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    let trimmed: Vec<String> = df
        .get_column_names_str()
        .iter()
        .map(|c| c.trim().to_string())
        .collect();
    df.set_column_names(trimmed.as_slice())?;

    debug!(path = %path.display(), rows = df.height(), columns = df.width(), "loaded villages");
    Ok(df)
}

/// Write a result table as CSV with a header row, creating parent directories.
pub fn write_csv(df: &DataFrame, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    let mut out = df.clone();
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut out)?;
    Ok(())
}
