//! gridcalc_engine - Reference resolution and formula evaluation.

pub(crate) mod builtins;
pub mod engine;
pub mod error;

pub use error::{FormulaError, Result};
