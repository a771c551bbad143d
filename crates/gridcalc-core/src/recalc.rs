//! Whole-sheet recalculation after an edit.
//!
//! Every edit recomputes every formula cell in one forward sweep, in table
//! order (row-major). There is no dependency graph: a formula that reads a
//! formula cell later in the sweep sees that cell's value from before the
//! sweep. Self and cyclic references are not detected; they evaluate
//! against whatever values are visible at that point in the sweep.

use gridcalc_engine::engine::{CellRecord, CellRef, CellTable, CellValue, evaluate};

/// Apply one edit and recompute the sheet, returning the new table.
///
/// The edited cell is written first (input starting with `=` is a formula,
/// stored without the `=`) and evaluated against a table that already holds
/// its new raw value and formula. Then [`recalculate`] sweeps the whole table.
///
/// To address the cell by its `"{row}-{col}"` identifier string, use
/// [`Document::set_cell_by_id`](crate::Document::set_cell_by_id).
pub fn apply_edit(mut table: CellTable, cell: CellRef, raw_value: &str) -> CellTable {
    let mut record = CellRecord::from_input(raw_value);
    let formula = record.formula.clone();
    table.insert(cell, record.clone());

    record.computed_value = Some(match &formula {
        Some(formula) => evaluate(formula, &table),
        None => CellValue::Text(record.raw_value.clone()),
    });
    tracing::debug!(
        cell = %cell,
        formula = formula.is_some(),
        value = ?record.computed_value,
        "applied edit"
    );
    table.insert(cell, record);

    recalculate(table)
}

/// Recompute every formula cell once, in row-major order.
///
/// Each cell is evaluated against the table including updates made earlier
/// in the same sweep. This is a single pass, not a fixed point.
pub fn recalculate(mut table: CellTable) -> CellTable {
    let formulas: Vec<(CellRef, String)> = table
        .iter()
        .filter_map(|(cell, record)| record.formula.clone().map(|f| (*cell, f)))
        .collect();

    let mut errors = 0usize;
    for (cell, formula) in &formulas {
        let value = evaluate(formula, &table);
        if value.is_error() {
            errors += 1;
        }
        tracing::trace!(cell = %cell, value = ?value, "recomputed");
        if let Some(record) = table.get_mut(cell) {
            record.computed_value = Some(value);
        }
    }

    tracing::debug!(formulas = formulas.len(), errors, "recalculated sheet");
    table
}
