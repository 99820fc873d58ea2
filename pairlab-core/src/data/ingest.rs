//! CSV price ingest.
//!
//! Expects a wide layout: first column is the date (`YYYY-MM-DD`), each
//! remaining column is one symbol's price series. Blank cells and `NaN`
//! markers become gaps, which `PriceTable::build` then fills.

use super::price_table::PriceTable;
use super::DataError;
use chrono::NaiveDate;
use std::path::Path;

pub fn read_wide_csv(path: &Path) -> Result<PriceTable, DataError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| DataError::IngestFailed {
        path: path.display().to_string(),
        detail: e.to_string(),
    })?;

    let headers = reader
        .headers()
        .map_err(|e| DataError::IngestFailed {
            path: path.display().to_string(),
            detail: e.to_string(),
        })?
        .clone();
    if headers.len() < 2 {
        return Err(DataError::TooFewSymbols(headers.len().saturating_sub(1)));
    }
    let symbols: Vec<String> = headers.iter().skip(1).map(|s| s.trim().to_string()).collect();

    let mut index: Vec<NaiveDate> = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); symbols.len()];

    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| DataError::IngestFailed {
            path: path.display().to_string(),
            detail: e.to_string(),
        })?;
        let date_cell = record.get(0).unwrap_or("").trim();
        let date = NaiveDate::parse_from_str(date_cell, "%Y-%m-%d").map_err(|e| {
            DataError::BadDate {
                value: date_cell.to_string(),
                row: row + 1,
                detail: e.to_string(),
            }
        })?;
        index.push(date);

        for (col, values) in columns.iter_mut().enumerate() {
            let cell = record.get(col + 1).unwrap_or("").trim();
            values.push(parse_price(cell));
        }
    }

    PriceTable::build(index, symbols.into_iter().zip(columns).collect())
}

fn parse_price(cell: &str) -> f64 {
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
        return f64::NAN;
    }
    cell.parse::<f64>().unwrap_or(f64::NAN)
}
