//! Cell reference parsing and formatting.
//!
//! Three textual forms address a cell:
//!
//! - the textual reference typed into formulas, one-based rows: `B3`
//! - the cell identifier used as a table key, zero-based: `"2-1"`
//! - the column label shown above the grid: `B`
//!
//! Textual references use a single letter, so only columns `A`..`Z` (0..=25)
//! have a textual form.
//!
//! # Examples
//!
//! ```
//! use gridcalc_engine::engine::CellRef;
//!
//! let cell = CellRef::from_str("B3").unwrap();
//! assert_eq!(cell.col, 1); // 0-indexed
//! assert_eq!(cell.row, 2);
//! assert_eq!(cell.id(), "2-1");
//! assert_eq!(cell.to_a1().as_deref(), Some("B3"));
//! ```

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::error::{FormulaError, Result};

/// Number of columns addressable by a textual reference (`A`..`Z`).
pub const MAX_REFERENCE_COLUMNS: usize = 26;

/// A cell coordinate (0-indexed). Ordered row-major.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(col: usize, row: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Parse a textual reference (e.g. "A1", "Z40").
    /// Returns None if the input is invalid.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Option<CellRef> {
        Self::parse_a1(text)
    }

    fn parse_a1(text: &str) -> Option<CellRef> {
        let caps = reference_re().captures(text)?;
        let letter = caps["letter"].as_bytes()[0];
        let col = (letter - b'A') as usize;
        let row = caps["digits"].parse::<usize>().ok()?.checked_sub(1)?;
        Some(CellRef::new(col, row))
    }

    /// Parse a cell identifier of the form `"{row}-{col}"` (both zero-based).
    pub fn from_id(id: &str) -> Option<CellRef> {
        let (row, col) = id.split_once('-')?;
        if !is_digits(row) || !is_digits(col) {
            return None;
        }
        Some(CellRef::new(col.parse().ok()?, row.parse().ok()?))
    }

    /// The table key for this cell, `"{row}-{col}"`.
    pub fn id(&self) -> String {
        format!("{}-{}", self.row, self.col)
    }

    /// The textual reference for this cell, or None past column `Z`.
    pub fn to_a1(&self) -> Option<String> {
        let label = column_label(self.col)?;
        let row = self.row.checked_add(1)?;
        Some(format!("{}{}", label, row))
    }
}

impl std::str::FromStr for CellRef {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self> {
        parse_reference(s)
    }
}

/// Formats as the textual reference where one exists, else as the identifier.
impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_a1() {
            Some(a1) => f.write_str(&a1),
            None => f.write_str(&self.id()),
        }
    }
}

/// Parse a textual reference, failing with [`FormulaError::InvalidReference`].
///
/// Accepts exactly one uppercase letter followed by a positive row number.
pub fn parse_reference(text: &str) -> Result<CellRef> {
    CellRef::parse_a1(text).ok_or_else(|| FormulaError::InvalidReference(text.to_string()))
}

/// Column letter for a zero-based column (0 -> A, 25 -> Z).
pub fn column_label(col: usize) -> Option<char> {
    if col < MAX_REFERENCE_COLUMNS {
        Some((b'A' + col as u8) as char)
    } else {
        None
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn reference_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?<letter>[A-Z])(?<digits>[0-9]+)$")
            .expect("cell reference regex must compile")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reference_basic() {
        assert_eq!(parse_reference("A1"), Ok(CellRef::new(0, 0)));
        assert_eq!(parse_reference("B3"), Ok(CellRef::new(1, 2)));
        assert_eq!(parse_reference("Z100"), Ok(CellRef::new(25, 99)));
        assert_eq!(parse_reference("C007"), Ok(CellRef::new(2, 6)));
    }

    #[test]
    fn test_parse_reference_rejects_invalid() {
        for bad in ["", "A", "1", "A0", "a1", "AA1", "A1B", " A1", "A-1", "A1.5"] {
            assert_eq!(
                parse_reference(bad),
                Err(FormulaError::InvalidReference(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_reference_overflow_is_invalid() {
        let huge = format!("A{}", "9".repeat(40));
        assert!(parse_reference(&huge).is_err());
    }

    #[test]
    fn test_cell_id_round_trip() {
        let cell = CellRef::new(7, 5);
        assert_eq!(cell.id(), "5-7");
        assert_eq!(CellRef::from_id("5-7"), Some(cell));
        assert_eq!(CellRef::from_id("0-0"), Some(CellRef::new(0, 0)));
    }

    #[test]
    fn test_cell_id_rejects_invalid() {
        for bad in ["", "5", "5-", "-7", "a-b", "5-7-1", "+5-7", "5 -7"] {
            assert_eq!(CellRef::from_id(bad), None, "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_column_label_ceiling() {
        assert_eq!(column_label(0), Some('A'));
        assert_eq!(column_label(25), Some('Z'));
        assert_eq!(column_label(26), None);
        assert_eq!(CellRef::new(26, 0).to_a1(), None);
        assert_eq!(CellRef::new(26, 0).to_string(), "0-26");
    }

    #[test]
    fn test_ordering_is_row_major() {
        let mut cells = vec![CellRef::new(0, 1), CellRef::new(3, 0), CellRef::new(1, 1)];
        cells.sort();
        assert_eq!(
            cells,
            vec![CellRef::new(3, 0), CellRef::new(0, 1), CellRef::new(1, 1)]
        );
    }
}
