// Licensed under the Apache-2.0 license

//! Input table schema for the two table families.
//!
//! The compiler accepts two kinds of tables, which are not interchangeable:
//!
//! - the register table (`Name, Address, Min, Max, Default, Mode, Comment`),
//!   compiled into the register-map header and C source, and
//! - the bit matrix (`Name, Bit 0 .. Bit 15`), compiled into the bit
//!   manipulation macro header.
//!
//! Cell values arrive as raw strings; interpretation happens later in the
//! validator and segmenter. The structural check (are all required columns
//! present?) runs once, before any row is processed, and is fatal.

use anyhow::{bail, Result};

/// Number of bit columns in a bit-matrix table; registers are 16 bits wide.
pub const BIT_COLUMN_COUNT: usize = 16;

/// Required columns of the register-table family.
pub const REGISTER_COLUMNS: [&str; 7] =
    ["Name", "Address", "Min", "Max", "Default", "Mode", "Comment"];

/// Column names of the bit-matrix family: `Bit 0` through `Bit 15`.
pub fn bit_column_names() -> Vec<String> {
    (0..BIT_COLUMN_COUNT).map(|n| format!("Bit {n}")).collect()
}

/// One raw row of the register-table family. All cells are uninterpreted
/// text exactly as read from the table.
#[derive(Clone, Debug)]
pub struct RegisterRow {
    pub name: String,
    pub address: String,
    pub min: String,
    pub max: String,
    pub default: String,
    pub mode: String,
    pub comment: String,
}

/// One raw row of the bit-matrix family: a register name and its 16
/// bit-column labels, index 0 first.
#[derive(Clone, Debug)]
pub struct BitMatrixRow {
    pub name: String,
    pub bits: [String; BIT_COLUMN_COUNT],
}

/// Verifies that a register table carries every required column.
///
/// Fatal on the first missing column; nothing row-level runs after a
/// structural failure.
pub fn check_register_columns(headers: &[&str]) -> Result<()> {
    for required in REGISTER_COLUMNS {
        if !headers.contains(&required) {
            bail!("the table does not contain a column \"{required}\"");
        }
    }
    Ok(())
}

/// Verifies that a bit-matrix table carries `Name` and all 16 bit columns.
pub fn check_bit_matrix_columns(headers: &[&str]) -> Result<()> {
    if !headers.contains(&"Name") {
        bail!("the table does not contain a column \"Name\"");
    }
    for required in bit_column_names() {
        if !headers.contains(&required.as_str()) {
            bail!("the table does not contain a column \"{required}\"");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_columns_complete() {
        let headers = ["Name", "Address", "Min", "Max", "Default", "Mode", "Comment"];
        assert!(check_register_columns(&headers).is_ok());
    }

    #[test]
    fn test_register_columns_missing() {
        let headers = ["Name", "Address", "Min", "Max", "Mode", "Comment"];
        let err = check_register_columns(&headers).unwrap_err();
        assert!(err.to_string().contains("\"Default\""));
    }

    #[test]
    fn test_bit_matrix_columns() {
        let names = bit_column_names();
        let mut headers: Vec<&str> = vec!["Name"];
        headers.extend(names.iter().map(|s| s.as_str()));
        assert!(check_bit_matrix_columns(&headers).is_ok());

        // Drop "Bit 15" and the check must name it.
        headers.pop();
        let err = check_bit_matrix_columns(&headers).unwrap_err();
        assert!(err.to_string().contains("\"Bit 15\""));
    }
}
