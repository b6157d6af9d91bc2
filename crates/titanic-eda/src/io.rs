//! Polars I/O shell.
//!
//! The core consumes loosely typed records and never parses delimited text
//! itself. This module is the thin layer that turns a CSV file (via polars)
//! into those records, and turns a cleaned dataset back into a `DataFrame`
//! for export.

use crate::error::{Result, ResultExt};
use crate::schema::{CleanDataset, Field, RawRecord, RawValue, Row};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Rows used for schema inference when reading CSV.
const INFER_SCHEMA_ROWS: usize = 100;

/// Load a CSV file with a header row.
pub fn load_csv(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    info!("Loading dataset from {}", path.display());

    let df = CsvReadOptions::default()
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))
        .context(format!("Failed to open {}", path.display()))?
        .finish()
        .context(format!("Failed to parse {}", path.display()))?;

    info!("Loaded {} rows x {} columns", df.height(), df.width());
    Ok(df)
}

/// Convert every row of `df` into a [`RawRecord`].
///
/// Column names are matched against the schema case-insensitively and
/// stored under their canonical spelling. Columns outside the schema are
/// ignored.
pub fn records_from_dataframe(df: &DataFrame) -> Result<Vec<RawRecord>> {
    let mut known: Vec<(Field, &Series)> = Vec::new();
    for column in df.get_columns() {
        match column.name().parse::<Field>() {
            Ok(field) if !field.is_derived() => {
                known.push((field, column.as_materialized_series()))
            }
            _ => debug!("Ignoring column '{}'", column.name()),
        }
    }

    let mut records = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let mut record = RawRecord::with_capacity(known.len());
        for (field, series) in &known {
            record.insert(field.as_str().to_string(), raw_value(series.get(i)?));
        }
        records.push(record);
    }

    debug!("Converted {} rows into records", records.len());
    Ok(records)
}

fn raw_value(value: AnyValue<'_>) -> RawValue {
    match value {
        AnyValue::Null => RawValue::Missing,
        AnyValue::String(s) => RawValue::Text(s.to_string()),
        AnyValue::StringOwned(s) => RawValue::Text(s.to_string()),
        AnyValue::Boolean(b) => RawValue::Number(if b { 1.0 } else { 0.0 }),
        other => other
            .try_extract::<f64>()
            .map_or(RawValue::Missing, RawValue::Number),
    }
}

/// Build a `DataFrame` with one column per schema field, source columns first.
pub fn dataset_to_dataframe(dataset: &CleanDataset) -> Result<DataFrame> {
    let rows = dataset.rows();
    let columns: Vec<Column> = Field::ALL
        .iter()
        .map(|&field| field_series(rows, field).into())
        .collect();

    Ok(DataFrame::new(columns)?)
}

fn field_series(rows: &[Row], field: Field) -> Series {
    let name: PlSmallStr = field.as_str().into();
    match field {
        Field::Age | Field::Fare => {
            let values: Vec<Option<f64>> = rows.iter().map(|r| r.number(field)).collect();
            Series::new(name, values)
        }
        f if f.is_numeric() => {
            let values: Vec<Option<i64>> = rows
                .iter()
                .map(|r| r.number(field).map(|v| v as i64))
                .collect();
            Series::new(name, values)
        }
        _ => {
            let values: Vec<Option<String>> = rows.iter().map(|r| r.label(field)).collect();
            Series::new(name, values)
        }
    }
}
