// Licensed under the Apache-2.0 license

//! CSV input for the two table families.
//!
//! Tables are read header-first: the structural column check runs on the
//! header record before any row is materialized, so a malformed table fails
//! before row-by-row validation starts. Cells are handed to the compiler as
//! raw text.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use regmap_generator::table::{
    bit_column_names, check_bit_matrix_columns, check_register_columns, BitMatrixRow, RegisterRow,
    BIT_COLUMN_COUNT,
};

fn column_index(headers: &csv::StringRecord, name: &str) -> usize {
    // The structural check has already verified presence.
    headers.iter().position(|h| h == name).unwrap()
}

/// Reads register-table rows from CSV text.
pub fn read_register_rows<R: Read>(reader: R) -> Result<Vec<RegisterRow>> {
    let mut csv = csv::Reader::from_reader(reader);
    let headers = csv.headers().context("failed to read the table header")?.clone();
    check_register_columns(&headers.iter().collect::<Vec<_>>())?;

    let name = column_index(&headers, "Name");
    let address = column_index(&headers, "Address");
    let min = column_index(&headers, "Min");
    let max = column_index(&headers, "Max");
    let default = column_index(&headers, "Default");
    let mode = column_index(&headers, "Mode");
    let comment = column_index(&headers, "Comment");

    let cell = |record: &csv::StringRecord, index: usize| {
        record.get(index).unwrap_or("").to_string()
    };

    let mut rows = Vec::new();
    for record in csv.records() {
        let record = record.context("failed to read a table row")?;
        rows.push(RegisterRow {
            name: cell(&record, name),
            address: cell(&record, address),
            min: cell(&record, min),
            max: cell(&record, max),
            default: cell(&record, default),
            mode: cell(&record, mode),
            comment: cell(&record, comment),
        });
    }
    Ok(rows)
}

/// Reads bit-matrix rows from CSV text.
pub fn read_bit_matrix_rows<R: Read>(reader: R) -> Result<Vec<BitMatrixRow>> {
    let mut csv = csv::Reader::from_reader(reader);
    let headers = csv.headers().context("failed to read the table header")?.clone();
    check_bit_matrix_columns(&headers.iter().collect::<Vec<_>>())?;

    let name = column_index(&headers, "Name");
    let bit_columns: Vec<usize> = bit_column_names()
        .iter()
        .map(|n| column_index(&headers, n))
        .collect();

    let mut rows = Vec::new();
    for record in csv.records() {
        let record = record.context("failed to read a table row")?;
        let mut bits: [String; BIT_COLUMN_COUNT] = std::array::from_fn(|_| String::new());
        for (bit, &index) in bit_columns.iter().enumerate() {
            bits[bit] = record.get(index).unwrap_or("").to_string();
        }
        rows.push(BitMatrixRow {
            name: record.get(name).unwrap_or("").to_string(),
            bits,
        });
    }
    Ok(rows)
}

/// Reads register-table rows from a CSV file.
pub fn load_register_table(path: &Path) -> Result<Vec<RegisterRow>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    read_register_rows(file)
}

/// Reads bit-matrix rows from a CSV file.
pub fn load_bit_matrix(path: &Path) -> Result<Vec<BitMatrixRow>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    read_bit_matrix_rows(file)
}
