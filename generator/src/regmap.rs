// Licensed under the Apache-2.0 license

//! Register table validation and map compilation.
//!
//! Each raw row is validated into a [`RegisterDescriptor`]; the full set of
//! descriptors is then folded into a [`RegisterMap`] with its derived facts
//! (highest address, dense register count) and a stable ascending sort by
//! address.
//!
//! Validation is strict: an out-of-range or unreadable address, bound,
//! default, or an unrecognized access-mode token is fatal and aborts the run
//! before any artifact is written. The single tolerated inconsistency is
//! `min >= max`, which is reported as a warning and compiled as-is.

use anyhow::{bail, Result};

use crate::diag::Diagnostics;
use crate::table::RegisterRow;
use crate::util::parse_field;

/// Smallest legal value of any numeric register field.
pub const REG_MIN_VALUE: u32 = 0;
/// Largest legal value of any numeric register field.
pub const REG_MAX_VALUE: u32 = 0xFFFF;

/// Permitted operations on a register.
///
/// The discriminants are the `OPER` encoding emitted into the generated
/// artifacts: bit 0 = readable, bit 1 = writable. The generated
/// `RegCheckOp` tests `oper & op` with `REG_READ = 1` and `REG_WRITE = 2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessMode {
    ReadOnly = 1,
    WriteOnly = 2,
    ReadWrite = 3,
}

impl AccessMode {
    /// Parses a mode token. Accepted (case-insensitive): `R`, `W`, `RW`,
    /// `R/W`. `R/W` is an alias of `RW`.
    pub fn parse(token: &str) -> Option<AccessMode> {
        match token.trim().to_ascii_uppercase().as_str() {
            "R" => Some(AccessMode::ReadOnly),
            "W" => Some(AccessMode::WriteOnly),
            "RW" | "R/W" => Some(AccessMode::ReadWrite),
            _ => None,
        }
    }

    pub fn can_read(self) -> bool {
        self.encoding() & 1 != 0
    }

    pub fn can_write(self) -> bool {
        self.encoding() & 2 != 0
    }

    /// The numeric `OPER` value emitted into the artifacts.
    pub fn encoding(self) -> u16 {
        self as u16
    }

    /// Canonical token for reporting.
    pub fn token(self) -> &'static str {
        match self {
            AccessMode::ReadOnly => "R",
            AccessMode::WriteOnly => "W",
            AccessMode::ReadWrite => "RW",
        }
    }
}

/// One validated register row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterDescriptor {
    pub name: String,
    pub address: u16,
    pub min: u16,
    pub max: u16,
    pub default: u16,
    pub mode: AccessMode,
    pub comment: String,
}

impl RegisterDescriptor {
    /// Reserved rows occupy their address slot in the dense tables but get
    /// no named constants.
    pub fn is_reserved(&self) -> bool {
        self.name.eq_ignore_ascii_case("RESERVED")
    }
}

/// The compiled register map: descriptors sorted ascending by address plus
/// the derived map-level facts.
#[derive(Clone, Debug)]
pub struct RegisterMap {
    /// All retained descriptors, stably sorted ascending by address.
    /// Duplicate addresses are kept; both rows are emitted downstream.
    pub registers: Vec<RegisterDescriptor>,
    /// Highest address used by any row.
    pub last_address: u16,
    /// Size of the dense address space `0..=last_address`. This models the
    /// generated table length, not the number of rows; rows may leave gaps.
    pub register_count: u32,
}

fn parse_bounded(field: &str, what: &str, name: &str) -> Result<u16> {
    match parse_field(field) {
        Some(v) if (REG_MIN_VALUE..=REG_MAX_VALUE).contains(&v) => Ok(v as u16),
        _ => bail!("{what} of register \"{name}\" is not correct"),
    }
}

/// Validates one raw row into a [`RegisterDescriptor`].
///
/// Emits one informational summary line for the accepted register and a
/// warning when `min >= max`. Any other defect is fatal.
pub fn validate_row(row: &RegisterRow, diags: &mut Diagnostics) -> Result<RegisterDescriptor> {
    if row.name.trim().is_empty() {
        bail!("register row has an empty \"Name\" cell");
    }
    let name = row.name.trim().to_string();

    let address = parse_bounded(&row.address, "address", &name)?;
    let min = parse_bounded(&row.min, "minimum value", &name)?;
    let max = parse_bounded(&row.max, "maximum value", &name)?;
    if min >= max {
        diags.warning(format!(
            "minimum value of register \"{name}\" is equal or greater than maximum value"
        ));
    }
    let default = parse_bounded(&row.default, "default value", &name)?;

    let Some(mode) = AccessMode::parse(&row.mode) else {
        bail!("mode \"{}\" of register \"{name}\" is not correct", row.mode);
    };

    diags.info(format!(
        "register: \"{name}\"; addr: {:#x}; min: {min}; max: {max}; default: {default}; mode: {}",
        address,
        mode.token()
    ));

    Ok(RegisterDescriptor {
        name,
        address,
        min,
        max,
        default,
        mode,
        comment: row.comment.trim().to_string(),
    })
}

impl RegisterMap {
    /// Validates every row and folds the descriptors into a map.
    ///
    /// Row order is preserved up to the final stable sort by address, so
    /// rows sharing an address keep their table order. Duplicate addresses
    /// are reported as a warning but both rows are retained.
    pub fn compile(rows: &[RegisterRow], diags: &mut Diagnostics) -> Result<RegisterMap> {
        if rows.is_empty() {
            bail!("the table contains no register rows");
        }

        let mut registers = Vec::with_capacity(rows.len());
        for row in rows {
            registers.push(validate_row(row, diags)?);
        }

        registers.sort_by_key(|r| r.address);

        for pair in registers.windows(2) {
            if pair[0].address == pair[1].address {
                diags.warning(format!(
                    "registers \"{}\" and \"{}\" share address {:#x}",
                    pair[0].name, pair[1].name, pair[0].address
                ));
            }
        }

        // The sort makes this the max address over all rows.
        let last_address = registers.last().map(|r| r.address).unwrap_or(0);
        let register_count = last_address as u32 + 1;

        diags.info(format!("last address: {last_address:#x}"));
        diags.info(format!("registers number: {register_count}"));

        Ok(RegisterMap {
            registers,
            last_address,
            register_count,
        })
    }

    /// Descriptors that receive named constants (everything not RESERVED).
    pub fn named_registers(&self) -> impl Iterator<Item = &RegisterDescriptor> {
        self.registers.iter().filter(|r| !r.is_reserved())
    }

    /// The row occupying `address`, if any. With duplicate addresses the
    /// later table row wins, matching last-writer-wins table emission.
    pub fn register_at(&self, address: u16) -> Option<&RegisterDescriptor> {
        self.registers
            .iter()
            .rev()
            .find(|r| r.address == address)
    }
}
