//! gridcalc-core - UI-agnostic document model and recalculation.

pub mod config;
pub mod document;
pub mod error;
pub mod recalc;
pub mod sample;

pub use config::{Config, load_config};
pub use document::Document;
pub use error::{GridcalcError, Result};
pub use recalc::{apply_edit, recalculate};

pub use gridcalc_engine::engine::{CellRecord, CellRef, CellTable, CellValue};
