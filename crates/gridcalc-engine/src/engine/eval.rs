//! Formula evaluation against a cell table.
//!
//! A formula (the text after `=`) is preprocessed into plain arithmetic and
//! then evaluated. Failures at any stage become the `#ERROR` marker; they
//! never propagate to the caller of [`evaluate`].

use super::cell::{CellTable, CellValue};
use super::expr::eval_arithmetic;
use super::preprocess::preprocess_formula;
use crate::error::Result;

/// Evaluate a formula, keeping the reason for failure.
pub fn try_evaluate(formula: &str, table: &CellTable) -> Result<f64> {
    let arithmetic = preprocess_formula(formula, table)?;
    eval_arithmetic(&arithmetic)
}

/// Evaluate a formula to a number, or to [`CellValue::Error`] if it fails.
pub fn evaluate(formula: &str, table: &CellTable) -> CellValue {
    match try_evaluate(formula, table) {
        Ok(n) => CellValue::Number(n),
        Err(err) => {
            tracing::debug!(formula, error = %err, "formula evaluated to error marker");
            CellValue::Error
        }
    }
}
