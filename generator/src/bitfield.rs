// Licensed under the Apache-2.0 license

//! Bit-field segmentation over the 16 bit columns of a register row.
//!
//! Contiguous, identically-labeled columns merge into one named field; the
//! skip tokens (empty, `-`, `RESERVED`) separate fields without producing
//! one. Two adjacent runs with the same label are indistinguishable from one
//! continuous field; that is an accepted modeling limitation of the table
//! format, not something the segmenter tries to repair.

use crate::diag::Diagnostics;
use crate::table::{BitMatrixRow, BIT_COLUMN_COUNT};

/// A named, contiguous run of bits within one register.
///
/// `start + width <= 16` always holds; fields produced from one row never
/// overlap and are ordered by ascending `start`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitField {
    /// Owning register name, as given in the table.
    pub register: String,
    /// Field name, upper-cased label of the merged columns.
    pub field: String,
    /// Lowest bit position of the field, 0..=15.
    pub start: usize,
    /// Number of bits, 1..=16.
    pub width: usize,
}

/// Labels that never form a field (compared after upper-casing).
const SKIP_LABELS: [&str; 3] = ["", "-", "RESERVED"];

fn is_skip(label: &str) -> bool {
    SKIP_LABELS.contains(&label)
}

/// Segments one register's bit columns into fields.
///
/// A single left-to-right pass: a label change closes the previous run, a
/// repeated non-skip label extends it, and the final column flushes whatever
/// run is still open (a field that ends at bit 15 has no following change to
/// close it).
pub fn segment_register(name: &str, bits: &[String; BIT_COLUMN_COUNT]) -> Vec<BitField> {
    let mut fields = Vec::new();
    let mut prev_label = String::new();
    let mut run_start = 0usize;
    let mut run_len = 0usize;

    for (b, raw) in bits.iter().enumerate() {
        let label = raw.trim().to_ascii_uppercase();

        if label != prev_label {
            if is_skip(&label) {
                if !is_skip(&prev_label) && run_len > 0 {
                    fields.push(BitField {
                        register: name.to_string(),
                        field: prev_label.clone(),
                        start: run_start,
                        width: run_len,
                    });
                }
                run_len = 0;
            } else {
                if run_len > 0 {
                    fields.push(BitField {
                        register: name.to_string(),
                        field: prev_label.clone(),
                        start: run_start,
                        width: run_len,
                    });
                }
                run_start = b;
                run_len = 1;
            }
        } else if !is_skip(&label) {
            run_len += 1;
        }

        // Boundary flush: a run still open at the last column is emitted
        // here, since no later column will close it.
        if b == BIT_COLUMN_COUNT - 1 && !is_skip(&label) {
            fields.push(BitField {
                register: name.to_string(),
                field: label.clone(),
                start: run_start,
                width: run_len,
            });
        }

        prev_label = label;
    }

    fields
}

/// Segments every row of a bit-matrix table.
///
/// Rows whose register name is `RESERVED` (case-insensitive) are skipped
/// entirely, with an informational notice.
pub fn segment_bit_matrix(rows: &[BitMatrixRow], diags: &mut Diagnostics) -> Vec<BitField> {
    let mut fields = Vec::new();
    for row in rows {
        if row.name.eq_ignore_ascii_case("RESERVED") {
            diags.info("skipping RESERVED register");
            continue;
        }
        fields.extend(segment_register(&row.name, &row.bits));
    }
    fields
}
