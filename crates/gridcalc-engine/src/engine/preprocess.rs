//! Formula preprocessing: turning references into numbers.
//!
//! Before a formula reaches the arithmetic evaluator, every reference is
//! replaced by the number it currently resolves to. This happens in two
//! ordered passes over the formula text:
//!
//! 1. **Aggregates**: `SUM(A1:A3, B1)` / `AVERAGE(...)` calls are replaced by
//!    the decimal text of their result.
//! 2. **Bare references**: any remaining `A1`-style token is replaced by the
//!    cell's numeric value.
//!
//! Pass 2 only ever sees references that pass 1 did not consume, so
//! arguments of aggregate calls are never substituted twice.

use regex::Regex;
use std::sync::OnceLock;

use super::cell::{CellTable, lookup_numeric};
use super::cell_ref::parse_reference;
use super::format::format_number;
use super::range::parse_range;
use crate::builtins::{aggregate_builtin, aggregate_fn_re};
use crate::error::{FormulaError, Result};

/// Run both passes, producing text made only of numbers and operators
/// (for well-formed input).
pub fn preprocess_formula(formula: &str, table: &CellTable) -> Result<String> {
    let expanded = expand_aggregates(formula, table)?;
    let substituted = substitute_references(&expanded, table)?;
    tracing::trace!(formula, expanded = %substituted, "preprocessed formula");
    Ok(substituted)
}

/// Replace every aggregate call with the decimal text of its result.
///
/// An empty argument list or an argument that is neither a reference nor a
/// range fails the whole formula.
pub fn expand_aggregates(formula: &str, table: &CellTable) -> Result<String> {
    let mut out = String::with_capacity(formula.len());
    let mut last = 0;

    for caps in aggregate_fn_re().captures_iter(formula) {
        let (Some(call), Some(builtin)) = (caps.get(0), aggregate_builtin(&caps[1])) else {
            continue;
        };
        let totals = collect_argument_totals(&caps[2], builtin.sheet_name, table)?;
        let result = (builtin.reduce)(totals.sum, totals.count);
        if !result.is_finite() {
            return Err(FormulaError::NonFinite);
        }

        out.push_str(&formula[last..call.start()]);
        out.push_str(&format_number(result));
        last = call.end();
    }

    out.push_str(&formula[last..]);
    Ok(out)
}

/// Sum and count of the flattened aggregate arguments.
#[derive(Debug, Default, PartialEq)]
struct ArgumentTotals {
    sum: f64,
    count: f64,
}

/// Flatten aggregate arguments into running totals.
///
/// A range counts every cell it covers, but only cells present in the table
/// are read: missing cells are 0, so the work is bounded by the table size
/// rather than by the area of the rectangle.
fn collect_argument_totals(
    args: &str,
    function: &'static str,
    table: &CellTable,
) -> Result<ArgumentTotals> {
    if args.trim().is_empty() {
        return Err(FormulaError::MissingArguments { function });
    }

    let mut totals = ArgumentTotals::default();
    for arg in args.split(',').map(str::trim) {
        if arg.contains(':') {
            let range = parse_range(arg)?;
            // Table order is row-major, so this visits rows start..=end only.
            for (_, record) in table
                .range(range.start..=range.end)
                .filter(|(cell, _)| range.contains(cell))
            {
                totals.sum += record.numeric_value();
            }
            totals.count += range.area();
        } else {
            let cell = parse_reference(arg)?;
            totals.sum += lookup_numeric(&cell, table);
            totals.count += 1.0;
        }
    }
    Ok(totals)
}

/// Replace every remaining `A1`-style token with the cell's numeric value.
pub fn substitute_references(formula: &str, table: &CellTable) -> Result<String> {
    let mut out = String::with_capacity(formula.len());
    let mut last = 0;

    for found in bare_ref_re().find_iter(formula) {
        let cell = parse_reference(found.as_str())?;
        out.push_str(&formula[last..found.start()]);
        out.push_str(&format_number(lookup_numeric(&cell, table)));
        last = found.end();
    }

    out.push_str(&formula[last..]);
    Ok(out)
}

fn bare_ref_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Z][0-9]+").expect("bare reference regex must compile"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{CellRecord, CellRef};

    fn table_with(cells: &[(&str, &str)]) -> CellTable {
        let mut table = CellTable::new();
        for (reference, value) in cells {
            let cell = CellRef::from_str(reference).unwrap();
            table.insert(cell, CellRecord::literal(value));
        }
        table
    }

    #[test]
    fn test_expand_sum_range_and_single_refs() {
        let table = table_with(&[("A1", "1"), ("A2", "2"), ("B1", "10")]);
        assert_eq!(expand_aggregates("SUM(A1:A2, B1)", &table).unwrap(), "13");
        assert_eq!(expand_aggregates("SUM(A1:A2) + B1", &table).unwrap(), "3 + B1");
    }

    #[test]
    fn test_expand_average_flattens_arguments() {
        // 1 and 2 from the range, 9 from B1: mean of three values.
        let table = table_with(&[("A1", "1"), ("A2", "2"), ("B1", "9")]);
        assert_eq!(expand_aggregates("AVERAGE(A1:A2, B1)", &table).unwrap(), "4");
    }

    #[test]
    fn test_expand_counts_overlapping_arguments_each_time() {
        let table = table_with(&[("A1", "1"), ("A2", "2")]);
        assert_eq!(expand_aggregates("SUM(A1:A2, A1:A2, A2)", &table).unwrap(), "8");
    }

    #[test]
    fn test_expand_reversed_range() {
        let table = table_with(&[("A1", "1"), ("A2", "2"), ("A3", "4")]);
        assert_eq!(expand_aggregates("SUM(A3:A1)", &table).unwrap(), "7");
    }

    #[test]
    fn test_expand_non_numeric_arguments_count_as_zero() {
        let table = table_with(&[("A1", "Launch"), ("A2", "4"), ("A3", "")]);
        assert_eq!(expand_aggregates("SUM(A1:A3)", &table).unwrap(), "4");
        assert_eq!(expand_aggregates("AVERAGE(A1:A3, A9)", &table).unwrap(), "1");
    }

    #[test]
    fn test_expand_empty_arguments_fail() {
        let table = CellTable::new();
        assert_eq!(
            expand_aggregates("SUM()", &table),
            Err(FormulaError::MissingArguments { function: "SUM" })
        );
        assert_eq!(
            expand_aggregates("1 + AVERAGE(  )", &table),
            Err(FormulaError::MissingArguments { function: "AVERAGE" })
        );
    }

    #[test]
    fn test_expand_invalid_arguments_fail() {
        let table = CellTable::new();
        assert_eq!(
            expand_aggregates("SUM(A1, 5)", &table),
            Err(FormulaError::InvalidReference("5".to_string()))
        );
        assert_eq!(
            expand_aggregates("SUM(A1:5)", &table),
            Err(FormulaError::InvalidRange("A1:5".to_string()))
        );
        assert_eq!(
            expand_aggregates("SUM(A1,)", &table),
            Err(FormulaError::InvalidReference(String::new()))
        );
    }

    #[test]
    fn test_expand_huge_ranges_read_only_stored_cells() {
        let table = table_with(&[("A1", "1"), ("C3", "5")]);
        assert_eq!(expand_aggregates("SUM(A1:A1000001)", &table).unwrap(), "1");
        assert_eq!(expand_aggregates("SUM(A1:B500001)", &table).unwrap(), "1");
        assert_eq!(expand_aggregates("SUM(A1:Z99999999)", &table).unwrap(), "6");
        assert_eq!(expand_aggregates("AVERAGE(A1:A1000000)", &table).unwrap(), "0.000001");
    }

    #[test]
    fn test_expand_range_skips_cells_outside_columns() {
        // A2 and D2 lie in the scanned rows but outside columns B..C.
        let table = table_with(&[("A2", "100"), ("B2", "1"), ("C3", "2"), ("D2", "100")]);
        assert_eq!(expand_aggregates("SUM(B1:C3)", &table).unwrap(), "3");
        assert_eq!(expand_aggregates("AVERAGE(B1:C3)", &table).unwrap(), "0.5");
    }

    #[test]
    fn test_lowercase_functions_are_not_expanded() {
        let table = table_with(&[("A1", "1")]);
        assert_eq!(expand_aggregates("sum(A1)", &table).unwrap(), "sum(A1)");
    }

    #[test]
    fn test_substitute_references() {
        let table = table_with(&[("A1", "2"), ("B2", "-3.5")]);
        assert_eq!(
            substitute_references("A1 * B2 + C7", &table).unwrap(),
            "2 * -3.5 + 0"
        );
        assert_eq!(
            substitute_references("A0 + 1", &table),
            Err(FormulaError::InvalidReference("A0".to_string()))
        );
    }

    #[test]
    fn test_preprocess_order_expands_before_substituting() {
        let table = table_with(&[("A1", "2"), ("A2", "3")]);
        assert_eq!(
            preprocess_formula("SUM(A1:A2) * A2", &table).unwrap(),
            "5 * 3"
        );
    }
}
