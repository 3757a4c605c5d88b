use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use polars::{
    frame::DataFrame,
    io::{SerReader, SerWriter},
    prelude::{CsvReader, CsvWriter},
};

/// Reads a CSV file from `path` into a Polars DataFrame.
pub fn read_from_csv(path: &Path) -> Result<DataFrame> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open CSV: {}", path.display()))?;
    let df = CsvReader::new(file)
        .finish()?;
    Ok(df)
}

/// Writes an aggregated result table to a CSV file at `path`.
pub fn write_to_csv(mut df: DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create CSV: {}", path.display()))?;
    let writer: BufWriter<File> = BufWriter::new(file);
    CsvWriter::new(writer)
        .finish(&mut df)?;
    Ok(())
}
