// Licensed under the Apache-2.0 license

//! Register map compiler: CSV-style register tables to C source artifacts.
//!
//! This crate compiles two kinds of spreadsheet-style tables into bit-exact,
//! deterministic C text for embedded firmware:
//!
//! - a register table (`Name, Address, Min, Max, Default, Mode, Comment`)
//!   becomes a constants header plus a C source with dense per-address
//!   default/limits tables and validation functions;
//! - a bit matrix (`Name, Bit 0 .. Bit 15`) becomes a header of
//!   `MASK`/`GET`/`SET` macros, one trio per contiguous named bit field.
//!
//! ## Usage
//!
//! ```
//! use regmap_generator::{Diagnostics, RegisterMap, RegisterRow};
//! use regmap_generator::output::render_register_artifacts;
//!
//! let rows = vec![RegisterRow {
//!     name: "status".into(),
//!     address: "0x0".into(),
//!     min: "0".into(),
//!     max: "100".into(),
//!     default: "0".into(),
//!     mode: "R".into(),
//!     comment: "System status".into(),
//! }];
//!
//! let mut diags = Diagnostics::new();
//! let map = RegisterMap::compile(&rows, &mut diags).unwrap();
//! let artifacts = render_register_artifacts(&map, None);
//! assert!(artifacts.header.contains("#define REG_STATUS_ADDR"));
//! ```
//!
//! Table file I/O and diagnostic presentation belong to the caller; the
//! compiler itself is a pure transform from rows to text plus a list of
//! [`Diagnostic`] records, and a fatal validation failure yields an error
//! before any artifact text is produced.
//!
//! ## Module Organization
//!
//! - [`table`]: input schema, raw row types, structural column checks
//! - [`bitfield`]: bit-column run segmentation into named fields
//! - [`regmap`]: row validation and register map compilation
//! - [`output`]: deterministic rendering of the C artifacts
//! - [`diag`]: structured diagnostics
//! - [`util`]: shared parsing and alignment primitives

pub mod bitfield;
pub mod diag;
pub mod output;
pub mod regmap;
pub mod table;
pub mod util;

pub use bitfield::{segment_bit_matrix, segment_register, BitField};
pub use diag::{Diagnostic, Diagnostics, Severity};
pub use output::{render_bit_macro_header, render_register_artifacts, RegisterArtifacts};
pub use regmap::{AccessMode, RegisterDescriptor, RegisterMap};
pub use table::{BitMatrixRow, RegisterRow};
