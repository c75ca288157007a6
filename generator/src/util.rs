// Licensed under the Apache-2.0 license

//! Utility functions for numeric field parsing and column-aligned formatting.
//!
//! These are the shared primitives of both compiler pipelines: table cells
//! are parsed with [`parse_field`], generated identifiers are normalized with
//! [`c_name`], and generated `#define` lines are aligned to a common column
//! with [`tab_stop`] and [`pad_to_column`].

/// Parses a table cell as an unsigned integer.
///
/// A `0x`/`0X` prefix selects base-16, anything else is base-10. Leading and
/// trailing whitespace is ignored. Malformed, empty, or overflowing text
/// yields `None`; callers fold that sentinel into their own range validation
/// rather than handling a separate parse failure.
///
/// Values are parsed as `u32` on purpose: an out-of-range cell such as
/// `70000` must survive parsing so that range validation can name it in a
/// diagnostic instead of it being truncated or rejected as unreadable.
///
/// # Examples
/// ```
/// use regmap_generator::util::parse_field;
/// assert_eq!(parse_field("42"), Some(42));
/// assert_eq!(parse_field("0x2A"), Some(42));
/// assert_eq!(parse_field(" 0xffff "), Some(0xFFFF));
/// assert_eq!(parse_field("abc"), None);
/// assert_eq!(parse_field(""), None);
/// ```
pub fn parse_field(field: &str) -> Option<u32> {
    let text = field.trim();
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).ok()
    } else {
        text.parse::<u32>().ok()
    }
}

/// Normalizes a register or field name into a C macro identifier fragment:
/// upper-cased, with spaces replaced by underscores.
///
/// # Examples
/// ```
/// use regmap_generator::util::c_name;
/// assert_eq!(c_name("status"), "STATUS");
/// assert_eq!(c_name("Fan Speed"), "FAN_SPEED");
/// ```
pub fn c_name(name: &str) -> String {
    name.trim().to_ascii_uppercase().replace(' ', "_")
}

/// Computes the shared alignment column for a run of generated definitions.
///
/// `max_len` is the length of the longest left-hand text in the run
/// (including the `#define ` keyword and any macro argument list). The result
/// is the smallest multiple-of-4 column strictly beyond it, plus one extra
/// tab of margin, so replacement text starts at the same column regardless of
/// identifier length.
pub fn tab_stop(max_len: usize) -> usize {
    4 * ((max_len + 3) / 4) + 4
}

/// Pads `lhs` with spaces up to `column` and appends `rhs`.
///
/// If `lhs` already reaches the column no padding is inserted; the texts are
/// simply concatenated.
pub fn pad_to_column(lhs: &str, rhs: &str, column: usize) -> String {
    let mut out = String::with_capacity(column + rhs.len());
    out.push_str(lhs);
    while out.len() < column {
        out.push(' ');
    }
    out.push_str(rhs);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_decimal() {
        assert_eq!(parse_field("0"), Some(0));
        assert_eq!(parse_field("65535"), Some(65535));
        assert_eq!(parse_field("70000"), Some(70000));
        assert_eq!(parse_field("  7 "), Some(7));
    }

    #[test]
    fn test_parse_field_hex() {
        assert_eq!(parse_field("0x0"), Some(0));
        assert_eq!(parse_field("0xFFFF"), Some(0xFFFF));
        assert_eq!(parse_field("0Xab"), Some(0xAB));
    }

    #[test]
    fn test_parse_field_malformed() {
        assert_eq!(parse_field(""), None);
        assert_eq!(parse_field("-1"), None);
        assert_eq!(parse_field("abc"), None);
        assert_eq!(parse_field("0x"), None);
        assert_eq!(parse_field("0xZZ"), None);
        // Beyond u32 is unreadable, not merely out of range.
        assert_eq!(parse_field("99999999999"), None);
    }

    #[test]
    fn test_c_name() {
        assert_eq!(c_name("status"), "STATUS");
        assert_eq!(c_name("Fan Speed "), "FAN_SPEED");
        assert_eq!(c_name("RX_COUNT"), "RX_COUNT");
    }

    #[test]
    fn test_tab_stop() {
        // Already a multiple of 4 still gets a full extra tab.
        assert_eq!(tab_stop(8), 12);
        assert_eq!(tab_stop(9), 16);
        assert_eq!(tab_stop(11), 16);
        assert_eq!(tab_stop(12), 16);
    }

    #[test]
    fn test_pad_to_column() {
        assert_eq!(pad_to_column("abc", "x", 6), "abc   x");
        // lhs at or past the column gets no padding.
        assert_eq!(pad_to_column("abcdef", "x", 6), "abcdefx");
        assert_eq!(pad_to_column("abcdefgh", "x", 6), "abcdefghx");
    }
}
