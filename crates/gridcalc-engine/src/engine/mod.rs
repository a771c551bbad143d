//! Spreadsheet engine API.
//!
//! - [`CellRef`], [`parse_reference`] - Textual references and cell identifiers
//! - [`Range`], [`parse_range`] - Rectangular ranges for aggregate arguments
//! - [`CellRecord`], [`CellValue`], [`CellTable`] - Cell storage
//! - [`lookup_numeric`] - Numeric value of a referenced cell
//! - [`preprocess_formula`] - Aggregate expansion and reference substitution
//! - [`eval_arithmetic`] - Safe arithmetic evaluation
//! - [`evaluate`] - The whole pipeline, failing to `#ERROR`

mod cell;
mod cell_ref;
mod eval;
mod expr;
mod format;
mod preprocess;
mod range;

pub use cell::{CellRecord, CellTable, CellValue, ERROR_MARKER, coerce_number, lookup_numeric};
pub use cell_ref::{CellRef, MAX_REFERENCE_COLUMNS, column_label, parse_reference};
pub use eval::{evaluate, try_evaluate};
pub use expr::{MAX_NESTING, eval_arithmetic};
pub use format::format_number;
pub use preprocess::{expand_aggregates, preprocess_formula, substitute_references};
pub use range::{Range, parse_range};

pub use crate::builtins::describe_builtins;
