//! Rectangular cell ranges (`A1:B5`) used as aggregate arguments.

use super::cell_ref::{CellRef, parse_reference};
use crate::error::{FormulaError, Result};

/// An inclusive rectangle, always stored as (min row, min col)..=(max row, max col).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Range {
    pub start: CellRef,
    pub end: CellRef,
}

impl Range {
    /// Build a normalized range from two corners given in any order.
    pub fn new(a: CellRef, b: CellRef) -> Range {
        Range {
            start: CellRef::new(a.col.min(b.col), a.row.min(b.row)),
            end: CellRef::new(a.col.max(b.col), a.row.max(b.row)),
        }
    }

    pub fn rows(&self) -> usize {
        self.end.row - self.start.row + 1
    }

    pub fn cols(&self) -> usize {
        self.end.col - self.start.col + 1
    }

    /// Number of cells covered, as a float so that huge ranges cannot overflow.
    pub fn area(&self) -> f64 {
        self.rows() as f64 * self.cols() as f64
    }

    pub fn contains(&self, cell: &CellRef) -> bool {
        (self.start.row..=self.end.row).contains(&cell.row)
            && (self.start.col..=self.end.col).contains(&cell.col)
    }
}

/// Parse `REF1:REF2` into a normalized [`Range`].
///
/// Fails with [`FormulaError::InvalidRange`] if there is not exactly one `:`
/// or either half is not a valid textual reference.
pub fn parse_range(text: &str) -> Result<Range> {
    let invalid = || FormulaError::InvalidRange(text.to_string());
    let (first, second) = text.split_once(':').ok_or_else(invalid)?;
    let start = parse_reference(first.trim()).map_err(|_| invalid())?;
    let end = parse_reference(second.trim()).map_err(|_| invalid())?;
    Ok(Range::new(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range_forward() {
        let range = parse_range("A1:B5").unwrap();
        assert_eq!(range.start, CellRef::new(0, 0));
        assert_eq!(range.end, CellRef::new(1, 4));
        assert_eq!(range.area(), 10.0);
    }

    #[test]
    fn test_parse_range_normalizes_reversed_corners() {
        assert_eq!(parse_range("A5:A1").unwrap(), parse_range("A1:A5").unwrap());
        let range = parse_range("C1:A3").unwrap();
        assert_eq!(range.start, CellRef::new(0, 0));
        assert_eq!(range.end, CellRef::new(2, 2));
    }

    #[test]
    fn test_parse_range_rejects_invalid() {
        for bad in ["A1", "A1:", ":B2", "A1:B2:C3", "A0:B2", "a1:b2", "A1-B2"] {
            assert_eq!(
                parse_range(bad),
                Err(FormulaError::InvalidRange(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = parse_range("B2:C4").unwrap();
        assert!(range.contains(&CellRef::new(1, 1)));
        assert!(range.contains(&CellRef::new(2, 3)));
        assert!(!range.contains(&CellRef::new(0, 2)));
        assert!(!range.contains(&CellRef::new(3, 2)));
        assert!(!range.contains(&CellRef::new(1, 4)));
    }

    #[test]
    fn test_area_of_tall_range() {
        assert_eq!(parse_range("A1:Z1000000").unwrap().area(), 26_000_000.0);
    }
}
