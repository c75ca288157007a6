// Licensed under the Apache-2.0 license

//! Rendering of the generated C artifacts.
//!
//! Rendering is split from computation: segmentation and validation produce
//! structured records ([`BitField`], [`RegisterMap`]), and this module turns
//! them into text in a single deterministic pass. Identical input reproduces
//! identical output byte for byte; the only optional variation is the dated
//! banner line, which the caller opts into explicitly.
//!
//! Generated definitions share one alignment column per artifact, computed
//! from the longest identifier in the run, so headers stay visually aligned
//! regardless of name length.

use std::fmt::Write;

use crate::bitfield::BitField;
use crate::regmap::{RegisterMap, REG_MAX_VALUE};
use crate::util::{c_name, pad_to_column, tab_stop};

/// Margin accounted for in the bit-macro alignment column: the `#define `
/// keyword plus the widest macro suffix, `_SET(a, b)`.
const DEFINE_MARGIN: usize = "#define ".len() + "_SET(a, b)".len();

/// The two artifacts of one register-table run. Both are rendered fully in
/// memory; callers write either both files or neither.
#[derive(Clone, Debug)]
pub struct RegisterArtifacts {
    /// Contents of the register-map header (`reg_map.h`).
    pub header: String,
    /// Contents of the register-table C source (`mb_regs.c`).
    pub source: String,
}

/// The derived macro texts of one bit field.
#[derive(Clone, Debug)]
pub struct FieldMacros {
    /// Owning register name, upper-cased, for the comment line.
    pub register: String,
    /// Field name for the comment line.
    pub field: String,
    /// Macro identifier prefix: `REGISTER_FIELD`, spaces as underscores.
    pub prefix: String,
    /// Field mask, already shifted to the field position.
    pub mask: u16,
    pub start: usize,
    pub width: usize,
}

impl FieldMacros {
    pub fn new(field: &BitField) -> FieldMacros {
        let register = field.register.trim().to_ascii_uppercase();
        let mask = (((1u32 << field.width) - 1) << field.start) as u16;
        FieldMacros {
            prefix: c_name(&format!("{}_{}", register, field.field)),
            register,
            field: field.field.clone(),
            mask,
            start: field.start,
            width: field.width,
        }
    }
}

fn banner(out: &mut String, date: Option<&str>) {
    out.push_str("/**\n* This file is created automatically\n");
    if let Some(date) = date {
        writeln!(out, "* Created on: {date}").unwrap();
    }
    out.push_str("**/\n\n");
}

/// Renders the bit manipulation macro header (`bit_macro.h`).
///
/// One `MASK`/`GET`/`SET` trio per field, in field order, aligned to a
/// common column.
pub fn render_bit_macro_header(fields: &[BitField], date: Option<&str>) -> String {
    let macros: Vec<FieldMacros> = fields.iter().map(FieldMacros::new).collect();

    let max_len = macros
        .iter()
        .map(|m| m.prefix.len() + DEFINE_MARGIN)
        .max()
        .unwrap_or(DEFINE_MARGIN);
    let column = tab_stop(max_len);

    let mut out = String::new();
    banner(&mut out, date);
    out.push_str("#ifndef BIT_MACRO_H_\n#define BIT_MACRO_H_\n\n");

    for m in &macros {
        writeln!(out, "/* Register: {}; Field: {} */", m.register, m.field).unwrap();

        let lhs = format!("#define {}_MASK", m.prefix);
        let rhs = format!("(0x{:04X}U)", m.mask);
        writeln!(out, "{}", pad_to_column(&lhs, &rhs, column)).unwrap();

        let lhs = format!("#define {}_GET(a)", m.prefix);
        let mut rhs = format!("((a) & {}_MASK)", m.prefix);
        if m.start > 0 {
            rhs = format!("({rhs} >> {})", m.start);
        }
        writeln!(out, "{}", pad_to_column(&lhs, &rhs, column)).unwrap();

        let lhs = format!("#define {}_SET(a, b)", m.prefix);
        let mut rhs = format!("(a) = ((a) & ~{}_MASK)", m.prefix);
        if m.start > 0 {
            write!(rhs, " | ((b) << {})", m.start).unwrap();
        } else {
            rhs.push_str(" | (b)");
        }
        writeln!(out, "{}", pad_to_column(&lhs, &rhs, column)).unwrap();

        out.push('\n');
    }

    out.push_str("#endif /*BIT_MACRO_H_*/\n");
    out
}

/// Renders the register-map header (`reg_map.h`).
pub fn render_register_header(map: &RegisterMap, date: Option<&str>) -> String {
    // Alignment covers every define in the artifact, aggregates included.
    let max_len = map
        .named_registers()
        .map(|r| format!("#define REG_{}_ADDR", c_name(&r.name)).len())
        .chain(["#define REG_LAST_ADDR".len()])
        .max()
        .unwrap_or(0);
    let column = tab_stop(max_len);

    let mut out = String::new();
    banner(&mut out, date);
    out.push_str("#ifndef REG_MAP_H_\n#define REG_MAP_H_\n\n");

    for reg in map.named_registers() {
        let name = c_name(&reg.name);
        writeln!(out, "/* Register: {}", reg.comment).unwrap();
        writeln!(
            out,
            "* Addr: {:#x}; Min: {}; Max: {}; Default: {}",
            reg.address, reg.min, reg.max, reg.default
        )
        .unwrap();
        out.push_str("*/\n");

        let defines = [
            ("ADDR", format!("{:#x}", reg.address)),
            ("MIN", reg.min.to_string()),
            ("MAX", reg.max.to_string()),
            ("DEF", reg.default.to_string()),
            ("OPER", reg.mode.encoding().to_string()),
        ];
        for (suffix, value) in defines {
            let lhs = format!("#define REG_{name}_{suffix}");
            writeln!(out, "{}", pad_to_column(&lhs, &value, column)).unwrap();
        }
        out.push('\n');
    }

    let lhs = "#define REG_LAST_ADDR";
    let rhs = format!("{} /*Last register address*/", map.last_address);
    writeln!(out, "{}", pad_to_column(lhs, &rhs, column)).unwrap();
    let lhs = "#define REG_NUM";
    let rhs = format!("{} /*Total registers number*/", map.register_count);
    writeln!(out, "{}", pad_to_column(lhs, &rhs, column)).unwrap();

    out.push_str("\n#endif /*REG_MAP_H_*/\n");
    out
}

/// Renders the register-table C source (`mb_regs.c`): the dense default
/// value array, the parallel bounds/options table, and the two validation
/// functions.
///
/// The arrays are indexed by address. Addresses with no row and rows named
/// RESERVED get neutral slots: default 0, read-only, full value range.
pub fn render_register_source(map: &RegisterMap, date: Option<&str>) -> String {
    let mut out = String::new();
    banner(&mut out, date);

    out.push_str("#include \"reg_map.h\"\n#include <stdint.h>\n\n");
    out.push_str("typedef enum {REG_READ = 1, REG_WRITE} RegOpMode;\n\n");
    out.push_str("typedef struct {\n\tuint16_t min;\n\tuint16_t max;\n\tuint16_t oper;\n} RegLimits;\n\n");

    // Dense default-value table.
    out.push_str("static uint16_t MBRegs[REG_NUM] = {\n");
    for address in 0..=map.last_address {
        match map.register_at(address) {
            Some(reg) if !reg.is_reserved() => {
                writeln!(out, "\t{},\t/*{}*/", reg.default, c_name(&reg.name)).unwrap();
            }
            Some(_) => out.push_str("\t0,\t/*RESERVED*/\n"),
            None => out.push_str("\t0,\t/*UNUSED*/\n"),
        }
    }
    out.push_str("};\n\n");

    // Parallel bounds/options table.
    out.push_str("static const RegLimits MBRegLimits[REG_NUM] = {\n");
    for address in 0..=map.last_address {
        match map.register_at(address) {
            Some(reg) if !reg.is_reserved() => {
                writeln!(
                    out,
                    "\t{{{}, {}, {}}},\t/*{}*/",
                    reg.min,
                    reg.max,
                    reg.mode.encoding(),
                    c_name(&reg.name)
                )
                .unwrap();
            }
            Some(_) => writeln!(out, "\t{{0, {REG_MAX_VALUE}, 1}},\t/*RESERVED*/").unwrap(),
            None => writeln!(out, "\t{{0, {REG_MAX_VALUE}, 1}},\t/*UNUSED*/").unwrap(),
        }
    }
    out.push_str("};\n\n");

    out.push_str("uint32_t RegCheckOp(uint16_t addr, RegOpMode op);\n");
    out.push_str("uint32_t RegCheckVal(uint16_t addr, uint16_t val);\n\n");

    out.push_str("/*Check register operation permission*/\n");
    out.push_str("uint32_t RegCheckOp(uint16_t addr, RegOpMode op)\n{\n");
    out.push_str("\tif (addr > REG_LAST_ADDR) return 0;\n\n");
    out.push_str("\treturn (MBRegLimits[addr].oper & (uint16_t) op) != 0U;\n}\n\n");

    out.push_str("/*Checks register values restrictions*/\n");
    out.push_str("uint32_t RegCheckVal(uint16_t addr, uint16_t val)\n{\n");
    out.push_str("\tif (addr > REG_LAST_ADDR) return 0;\n\n");
    out.push_str(
        "\treturn (val >= MBRegLimits[addr].min) && (val <= MBRegLimits[addr].max);\n}\n",
    );
    out
}

/// Renders both register-table artifacts.
pub fn render_register_artifacts(map: &RegisterMap, date: Option<&str>) -> RegisterArtifacts {
    RegisterArtifacts {
        header: render_register_header(map, date),
        source: render_register_source(map, date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::Diagnostics;
    use crate::regmap::RegisterMap;
    use crate::table::RegisterRow;

    fn field(register: &str, name: &str, start: usize, width: usize) -> BitField {
        BitField {
            register: register.to_string(),
            field: name.to_string(),
            start,
            width,
        }
    }

    fn compile(rows: &[RegisterRow]) -> RegisterMap {
        let mut diags = Diagnostics::new();
        RegisterMap::compile(rows, &mut diags).unwrap()
    }

    fn row(name: &str, address: &str, min: &str, max: &str, default: &str, mode: &str) -> RegisterRow {
        RegisterRow {
            name: name.to_string(),
            address: address.to_string(),
            min: min.to_string(),
            max: max.to_string(),
            default: default.to_string(),
            mode: mode.to_string(),
            comment: format!("{name} register"),
        }
    }

    #[test]
    fn test_field_macros_mask() {
        let m = FieldMacros::new(&field("ctrl", "SPEED", 4, 3));
        assert_eq!(m.mask, 0x0070);
        assert_eq!(m.prefix, "CTRL_SPEED");
    }

    #[test]
    fn test_full_width_mask() {
        let m = FieldMacros::new(&field("data", "VALUE", 0, 16));
        assert_eq!(m.mask, 0xFFFF);
    }

    #[test]
    fn test_bit_macro_header_text() {
        let text = render_bit_macro_header(&[field("ctrl", "SPEED", 4, 3)], None);
        assert!(text.contains("/* Register: CTRL; Field: SPEED */"));
        assert!(text.contains("(0x0070U)"));
        assert!(text.contains("(((a) & CTRL_SPEED_MASK) >> 4)"));
        assert!(text.contains("(a) = ((a) & ~CTRL_SPEED_MASK) | ((b) << 4)"));
        assert!(text.starts_with("/**\n* This file is created automatically\n**/\n"));
        assert!(text.contains("#ifndef BIT_MACRO_H_"));
        assert!(text.ends_with("#endif /*BIT_MACRO_H_*/\n"));
    }

    #[test]
    fn test_bit_macro_start_zero_has_no_shift() {
        let text = render_bit_macro_header(&[field("ctrl", "EN", 0, 1)], None);
        assert!(text.contains("((a) & CTRL_EN_MASK)\n"));
        assert!(!text.contains(">>"));
        assert!(text.contains("(a) = ((a) & ~CTRL_EN_MASK) | (b)\n"));
    }

    #[test]
    fn test_bit_macro_alignment_shared_column() {
        let text = render_bit_macro_header(
            &[field("ctrl", "EN", 0, 1), field("ctrl", "LONG FIELD NAME", 1, 2)],
            None,
        );
        // Every define's replacement text starts at the same column. The
        // padding run is the only place two spaces appear in a row.
        let columns: Vec<usize> = text
            .lines()
            .filter(|l| l.starts_with("#define"))
            .map(|l| {
                let pad = l.find("  ").unwrap();
                pad + (l[pad..].len() - l[pad..].trim_start().len())
            })
            .collect();
        assert!(columns.windows(2).all(|w| w[0] == w[1]), "{columns:?}");
        assert!(text.contains("CTRL_LONG_FIELD_NAME_MASK"));
    }

    #[test]
    fn test_register_header_constants() {
        let map = compile(&[
            row("status", "0x0", "0", "10", "0", "R"),
            row("speed", "0x1", "0", "500", "100", "RW"),
        ]);
        let text = render_register_header(&map, None);
        assert!(text.contains("#ifndef REG_MAP_H_"));
        assert!(text.contains("/* Register: status register"));
        assert!(text.contains("#define REG_STATUS_ADDR"));
        assert!(text.contains("#define REG_SPEED_OPER"));
        assert!(text.contains("/*Last register address*/"));
        assert!(text.contains("/*Total registers number*/"));
        assert!(text.ends_with("#endif /*REG_MAP_H_*/\n"));
    }

    #[test]
    fn test_register_header_skips_reserved_names() {
        let map = compile(&[
            row("status", "0", "0", "10", "0", "R"),
            row("RESERVED", "1", "0", "0xFFFF", "0", "R"),
            row("speed", "2", "0", "500", "100", "RW"),
        ]);
        let text = render_register_header(&map, None);
        assert!(!text.contains("REG_RESERVED"));
        // The reserved address still counts toward the dense space.
        assert!(text.contains("3 /*Total registers number*/"));
    }

    #[test]
    fn test_register_source_dense_tables() {
        let map = compile(&[
            row("status", "0", "0", "10", "7", "R"),
            row("RESERVED", "1", "0", "0xFFFF", "0", "R"),
            row("speed", "3", "0", "500", "100", "RW"),
        ]);
        let text = render_register_source(&map, None);
        assert!(text.contains("static uint16_t MBRegs[REG_NUM] = {"));
        assert!(text.contains("\t7,\t/*STATUS*/"));
        assert!(text.contains("\t0,\t/*RESERVED*/"));
        // Address 2 has no row.
        assert!(text.contains("\t0,\t/*UNUSED*/"));
        assert!(text.contains("\t100,\t/*SPEED*/"));
        assert!(text.contains("{0, 500, 3},\t/*SPEED*/"));
        assert!(text.contains("RegCheckOp(uint16_t addr, RegOpMode op)"));
        assert!(text.contains("RegCheckVal(uint16_t addr, uint16_t val)"));
        // Exactly last_address + 1 slots per table.
        assert_eq!(text.matches("\t7,\t").count(), 1);
        assert_eq!(
            text.lines().filter(|l| l.starts_with('\t') && l.contains(",\t/*")).count(),
            8 // 4 value slots + 4 limit slots
        );
    }

    #[test]
    fn test_banner_date_is_opt_in() {
        let map = compile(&[row("status", "0", "0", "10", "0", "R")]);
        let undated = render_register_header(&map, None);
        assert!(!undated.contains("Created on"));
        let dated = render_register_header(&map, Some("2026-08-27"));
        assert!(dated.contains("* Created on: 2026-08-27"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let map = compile(&[
            row("b", "2", "0", "10", "0", "W"),
            row("a", "0", "0", "10", "0", "R"),
        ]);
        let first = render_register_artifacts(&map, None);
        let second = render_register_artifacts(&map, None);
        assert_eq!(first.header, second.header);
        assert_eq!(first.source, second.source);
    }
}
