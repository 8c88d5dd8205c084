//! CSV reading operations for region value tables.

use std::{fs, io::Cursor, path::Path, sync::Arc};

use anyhow::{anyhow, ensure, Context, Result};
use polars::{frame::DataFrame, io::SerReader, prelude::{CsvReadOptions, DataType, Field, Schema, SchemaRef}};

use crate::values::RegionValues;

/// Parse every cell as a string; the value columns are sanitized by hand.
///
/// Without a schema the table width comes from the first line.
fn read_table(text: &str, has_header: bool, schema: Option<SchemaRef>) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(has_header)
        .with_schema(schema)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|po| po.with_truncate_ragged_lines(true))
        .into_reader_with_file_handle(Cursor::new(text.as_bytes()))
        .finish()
        .context("[io::csv::read] Failed to parse CSV table")
}

/// Fixed `country,value` schema for headerless tables, so short rows pad to
/// null instead of narrowing the whole table.
fn headerless_schema() -> SchemaRef {
    Arc::new(Schema::from_iter([
        Field::new("country".into(), DataType::String),
        Field::new("value".into(), DataType::String),
    ]))
}

/// Get column `idx` as optional strings (null for missing cells).
fn column_strings(df: &DataFrame, idx: usize) -> Result<Vec<Option<String>>> {
    let column = df.get_columns()[idx].cast(&DataType::String)?;
    Ok(column.str()?.into_iter().map(|cell| cell.map(str::to_string)).collect())
}

/// Parse a numeric cell, optionally dropping `,` digit grouping first.
/// Non-numeric and non-finite cells yield `None`.
fn parse_number(cell: &str, strip_commas: bool) -> Option<f64> {
    let cell = if strip_commas { cell.replace(',', "") } else { cell.to_string() };
    cell.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Read a headerless `Country,Value` table.
///
/// Rows with fewer than two fields or a non-numeric value are skipped; an
/// empty document gives an empty map.
pub fn parse_values(text: &str) -> Result<RegionValues> {
    let mut values = RegionValues::new();
    if text.trim().is_empty() { return Ok(values) }

    let df = read_table(text, false, Some(headerless_schema()))?;

    for (name, cell) in column_strings(&df, 0)?.into_iter().zip(column_strings(&df, 1)?) {
        let (Some(name), Some(cell)) = (name, cell) else { continue };
        if let Some(value) = parse_number(&cell, false) {
            values.insert(name, value);
        }
    }
    Ok(values)
}

/// Read a headed table, taking region names from the first column and values
/// from the column whose header equals `keyword`.
///
/// Values may use `,` digit grouping. Fails if the keyword is empty, the table
/// has no rows, or no row yields a numeric value for the keyword.
pub fn parse_values_by_keyword(text: &str, keyword: &str) -> Result<RegionValues> {
    let keyword = keyword.trim();
    ensure!(!keyword.is_empty(), "Please enter a column keyword (e.g., 2025).");
    ensure!(!text.trim().is_empty(), "[io::csv::read] CSV table is empty");

    let df = read_table(text, true, None)?;
    ensure!(df.height() > 0, "[io::csv::read] CSV table has no rows");

    let no_data = || anyhow!("No data found for keyword: \"{keyword}\". Check your spelling of CSV headers.");
    let value_idx = df.get_column_index(keyword).ok_or_else(no_data)?;

    let mut values = RegionValues::new();
    for (name, cell) in column_strings(&df, 0)?.into_iter().zip(column_strings(&df, value_idx)?) {
        let (Some(name), Some(cell)) = (name, cell) else { continue };
        if let Some(value) = parse_number(&cell, true) {
            values.insert(name, value);
        }
    }

    if values.samples().is_empty() { return Err(no_data()) }
    tracing::debug!("[io::csv::read] {} values for keyword {keyword:?}", values.samples().len());
    Ok(values)
}

/// Read a headerless `Country,Value` CSV file.
pub fn read_values(path: &Path) -> Result<RegionValues> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("[io::csv::read] Failed to open CSV file: {}", path.display()))?;
    parse_values(&text)
        .with_context(|| format!("[io::csv::read] Failed to read values from {}", path.display()))
}

/// Read a headed CSV file, selecting the value column by `keyword`.
pub fn read_values_by_keyword(path: &Path, keyword: &str) -> Result<RegionValues> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("[io::csv::read] Failed to open CSV file: {}", path.display()))?;
    parse_values_by_keyword(&text, keyword)
}
