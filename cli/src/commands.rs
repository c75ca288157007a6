// Licensed under the Apache-2.0 license

//! Command implementations: load the table, run the compiler, present the
//! diagnostics, write the artifacts.
//!
//! Diagnostics collected before a fatal failure are still presented, so a
//! run that aborts at row N shows the summaries of rows 0..N-1 followed by
//! the error. Artifacts are rendered fully in memory before the first file
//! is touched; a failed run writes nothing.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use regmap_generator::{
    render_bit_macro_header, render_register_artifacts, segment_bit_matrix, BitField, Diagnostics,
    RegisterMap, Severity,
};

use crate::input::{load_bit_matrix, load_register_table};

fn report(diags: &Diagnostics) {
    for diag in diags.iter() {
        match diag.severity {
            Severity::Info => log::info!("{}", diag.message),
            Severity::Warning => log::warn!("{}", diag.message),
        }
    }
}

fn today() -> String {
    chrono::Local::now().date_naive().to_string()
}

fn write_artifact(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
    log::info!("file {} is created", path.display());
    Ok(())
}

/// Plain-text echo of the segmented fields, aligned per column.
pub(crate) fn echo_table(fields: &[BitField]) -> String {
    let columns = ["Reg name", "Field name", "Start bit", "Bit len"];
    let rows: Vec<[String; 4]> = fields
        .iter()
        .map(|f| {
            [
                f.register.clone(),
                f.field.clone(),
                f.start.to_string(),
                f.width.to_string(),
            ]
        })
        .collect();

    let mut widths = columns.map(str::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.len());
        }
    }

    fn render_row(cells: [&str; 4], widths: &[usize; 4]) -> String {
        let mut line = String::new();
        for (i, (cell, width)) in cells.iter().zip(widths.iter()).enumerate() {
            if i > 0 {
                line.push_str("  ");
            }
            line.push_str(cell);
            line.extend(std::iter::repeat(' ').take(width - cell.len()));
        }
        line.trim_end().to_string() + "\n"
    }

    let mut out = String::new();
    out.push_str(&render_row(columns, &widths));
    let dashes = widths.map(|w| "-".repeat(w));
    out.push_str(&render_row(dashes.each_ref().map(|s| s.as_str()), &widths));
    for row in &rows {
        out.push_str(&render_row(row.each_ref().map(|s| s.as_str()), &widths));
    }
    out
}

/// `check`: validate a register table, print the summaries, write nothing.
pub fn check(file: &Path) -> Result<()> {
    log::info!("check input file");
    let rows = load_register_table(file)?;
    let mut diags = Diagnostics::new();
    let result = RegisterMap::compile(&rows, &mut diags);
    report(&diags);
    result?;
    Ok(())
}

/// `regmap`: compile a register table into the constants header and the
/// register-table C source.
pub fn regmap(file: &Path, header: &Path, source: &Path, date: bool) -> Result<()> {
    log::info!("check input file");
    let rows = load_register_table(file)?;
    let mut diags = Diagnostics::new();
    let result = RegisterMap::compile(&rows, &mut diags);
    report(&diags);
    let map = result?;

    let stamp = date.then(today);
    let artifacts = render_register_artifacts(&map, stamp.as_deref());
    write_artifact(header, &artifacts.header)?;
    write_artifact(source, &artifacts.source)?;
    Ok(())
}

/// `bitfields`: segment a bit-matrix table and generate the macro header.
pub fn bitfields(file: &Path, output: &Path, date: bool) -> Result<()> {
    log::info!("check input file");
    let rows = load_bit_matrix(file)?;
    let mut diags = Diagnostics::new();
    let fields = segment_bit_matrix(&rows, &mut diags);
    report(&diags);
    print!("{}", echo_table(&fields));

    let stamp = date.then(today);
    let text = render_bit_macro_header(&fields, stamp.as_deref());
    write_artifact(output, &text)?;
    Ok(())
}
