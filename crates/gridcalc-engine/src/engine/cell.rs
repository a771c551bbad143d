//! Cell data structures for the spreadsheet table.
//!
//! - [`CellValue`] - A computed value (number, text, or the error marker)
//! - [`CellRecord`] - Raw input, optional formula, and cached computed value
//! - [`CellTable`] - Sparse storage keyed by [`CellRef`], iterated row-major
//! - [`lookup_numeric`] - Numeric view of a cell for formula evaluation

use std::collections::BTreeMap;
use std::fmt;

use super::cell_ref::CellRef;
use super::format::format_number;

/// Display text of the error marker.
pub const ERROR_MARKER: &str = "#ERROR";

/// A computed cell value.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    /// Formula evaluation failed; displayed as `#ERROR`.
    Error,
}

impl CellValue {
    pub fn is_error(&self) -> bool {
        matches!(self, CellValue::Error)
    }

    /// Numeric view used by references. Text is coerced, errors read as 0.
    pub fn as_number(&self) -> f64 {
        match self {
            CellValue::Number(n) => *n,
            CellValue::Text(s) => coerce_number(s),
            CellValue::Error => 0.0,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => f.write_str(&format_number(*n)),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Error => f.write_str(ERROR_MARKER),
        }
    }
}

/// A cell in the table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CellRecord {
    /// Text as entered, with the leading `=` stripped for formulas.
    pub raw_value: String,
    /// The expression after `=`, when the cell holds a formula.
    pub formula: Option<String>,
    pub computed_value: Option<CellValue>,
}

impl CellRecord {
    /// A plain value whose computed value is the value itself.
    pub fn literal(value: &str) -> CellRecord {
        CellRecord {
            raw_value: value.to_string(),
            formula: None,
            computed_value: Some(CellValue::Text(value.to_string())),
        }
    }

    /// Parse user input into a record with no computed value yet.
    /// - Starts with '=' -> formula (without the '='), raw value is the formula text
    /// - Otherwise -> plain raw value
    pub fn from_input(input: &str) -> CellRecord {
        match input.strip_prefix('=') {
            Some(formula) => CellRecord {
                raw_value: formula.to_string(),
                formula: Some(formula.to_string()),
                computed_value: None,
            },
            None => CellRecord {
                raw_value: input.to_string(),
                formula: None,
                computed_value: None,
            },
        }
    }

    pub fn has_formula(&self) -> bool {
        self.formula.is_some()
    }

    /// Text for an input box: `=formula` for formula cells, else the raw value.
    pub fn to_input_string(&self) -> String {
        match &self.formula {
            Some(formula) => format!("={}", formula),
            None => self.raw_value.clone(),
        }
    }

    /// Text shown in the grid: the computed value if any, else the raw value.
    pub fn display(&self) -> String {
        match &self.computed_value {
            Some(value) => value.to_string(),
            None => self.raw_value.clone(),
        }
    }

    /// Numeric view: computed value if present, else the raw value, coerced.
    pub fn numeric_value(&self) -> f64 {
        match &self.computed_value {
            Some(value) => value.as_number(),
            None => coerce_number(&self.raw_value),
        }
    }
}

/// Sparse cell storage. Absent keys behave as empty cells.
pub type CellTable = BTreeMap<CellRef, CellRecord>;

/// Current numeric value of a cell. Missing or non-numeric cells read as 0.
pub fn lookup_numeric(cell: &CellRef, table: &CellTable) -> f64 {
    match table.get(cell) {
        Some(record) => record.numeric_value(),
        None => 0.0,
    }
}

/// Parse text as a plain decimal number. Anything else (including `inf`/`NaN`) is 0.
pub fn coerce_number(text: &str) -> f64 {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => {
            if !trimmed.is_empty() {
                tracing::trace!(value = trimmed, "non-numeric value read as 0");
            }
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_input_formula_strips_equals() {
        let record = CellRecord::from_input("=SUM(A1:A2)");
        assert_eq!(
            record,
            CellRecord {
                raw_value: "SUM(A1:A2)".to_string(),
                formula: Some("SUM(A1:A2)".to_string()),
                computed_value: None,
            }
        );
        assert_eq!(record.to_input_string(), "=SUM(A1:A2)");
    }

    #[test]
    fn test_from_input_plain_value() {
        let record = CellRecord::from_input("  42 ");
        assert_eq!(record.raw_value, "  42 ");
        assert!(!record.has_formula());
        assert_eq!(record.numeric_value(), 42.0);
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number("3.25"), 3.25);
        assert_eq!(coerce_number(" -7 "), -7.0);
        assert_eq!(coerce_number("1e3"), 1000.0);
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("Tom Wright"), 0.0);
        assert_eq!(coerce_number("6,200,000"), 0.0);
        assert_eq!(coerce_number("75%"), 0.0);
        assert_eq!(coerce_number("inf"), 0.0);
        assert_eq!(coerce_number("NaN"), 0.0);
    }

    #[test]
    fn test_lookup_prefers_computed_value() {
        let mut table = CellTable::new();
        let a1 = CellRef::new(0, 0);
        table.insert(
            a1,
            CellRecord {
                raw_value: "A2*2".to_string(),
                formula: Some("A2*2".to_string()),
                computed_value: Some(CellValue::Number(8.0)),
            },
        );
        assert_eq!(lookup_numeric(&a1, &table), 8.0);
    }

    #[test]
    fn test_lookup_falls_back_to_raw_value() {
        let mut table = CellTable::new();
        let a1 = CellRef::new(0, 0);
        table.insert(a1, CellRecord::from_input("12.5"));
        assert_eq!(lookup_numeric(&a1, &table), 12.5);
        assert_eq!(lookup_numeric(&CellRef::new(3, 3), &table), 0.0);
    }

    #[test]
    fn test_error_marker_reads_as_zero() {
        let mut table = CellTable::new();
        let a1 = CellRef::new(0, 0);
        table.insert(
            a1,
            CellRecord {
                raw_value: "1/0".to_string(),
                formula: Some("1/0".to_string()),
                computed_value: Some(CellValue::Error),
            },
        );
        assert_eq!(lookup_numeric(&a1, &table), 0.0);
        assert_eq!(table[&a1].display(), "#ERROR");
    }
}
