use super::Document;
use crate::error::{GridcalcError, Result};
use crate::recalc::apply_edit;
use gridcalc_engine::engine::{CellRecord, CellRef, CellValue, evaluate};

impl Document {
    /// Resolve a cell given as a textual reference (`H6`) or identifier (`5-7`).
    pub fn resolve_cell(&self, text: &str) -> Result<CellRef> {
        let text = text.trim();
        if let Some(cell) = CellRef::from_str(text) {
            return Ok(cell);
        }
        if text.contains('-') {
            return CellRef::from_id(text)
                .ok_or_else(|| GridcalcError::InvalidCellId(text.to_string()));
        }
        Err(GridcalcError::InvalidReference(text.to_string()))
    }

    fn check_bounds(&self, cell: &CellRef) -> Result<()> {
        if cell.row < self.rows && cell.col < self.cols {
            Ok(())
        } else {
            Err(GridcalcError::OutOfBounds {
                cell: cell.to_string(),
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Set cell contents from input string and recompute the sheet.
    pub fn set_cell_from_input(&mut self, cell: CellRef, input: &str) -> Result<()> {
        self.check_bounds(&cell)?;
        let table = std::mem::take(&mut self.table);
        self.table = apply_edit(table, cell, input);
        self.modified = true;
        Ok(())
    }

    /// Set a cell addressed by its identifier (`"{row}-{col}"`).
    pub fn set_cell_by_id(&mut self, id: &str, input: &str) -> Result<()> {
        let cell =
            CellRef::from_id(id).ok_or_else(|| GridcalcError::InvalidCellId(id.to_string()))?;
        self.set_cell_from_input(cell, input)
    }

    /// Set a cell addressed by its textual reference (`B3`).
    pub fn set_cell_by_reference(&mut self, reference: &str, input: &str) -> Result<()> {
        let cell = CellRef::from_str(reference)
            .ok_or_else(|| GridcalcError::InvalidReference(reference.to_string()))?;
        self.set_cell_from_input(cell, input)
    }

    pub fn cell(&self, cell: &CellRef) -> Option<&CellRecord> {
        self.table.get(cell)
    }

    /// Text shown in the grid for a cell; empty for absent cells.
    pub fn cell_display(&self, cell: &CellRef) -> String {
        self.table
            .get(cell)
            .map(CellRecord::display)
            .unwrap_or_default()
    }

    /// Text shown in the formula bar: `=formula` or the raw value.
    pub fn cell_input(&self, cell: &CellRef) -> String {
        self.table
            .get(cell)
            .map(CellRecord::to_input_string)
            .unwrap_or_default()
    }

    /// Evaluate a formula against the current table without storing it.
    /// A leading `=` is optional.
    pub fn evaluate_formula(&self, formula: &str) -> CellValue {
        let formula = formula.trim();
        let formula = formula.strip_prefix('=').unwrap_or(formula);
        evaluate(formula, &self.table)
    }

    /// Cells with a value or formula, row-major.
    pub fn non_empty_cells(&self) -> impl Iterator<Item = (&CellRef, &CellRecord)> {
        self.table
            .iter()
            .filter(|(_, record)| record.has_formula() || !record.raw_value.is_empty())
    }
}
