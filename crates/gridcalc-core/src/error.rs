//! Error types for Gridcalc core.

use thiserror::Error;

/// Errors that can occur in the Gridcalc document layer
#[derive(Error, Debug)]
pub enum GridcalcError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error in {path}: {message}")]
    Config { path: String, message: String },

    #[error("Invalid cell identifier: {0}")]
    InvalidCellId(String),

    #[error("Invalid cell reference: {0}")]
    InvalidReference(String),

    #[error("Cell {cell} is outside the {rows}x{cols} sheet")]
    OutOfBounds {
        cell: String,
        rows: usize,
        cols: usize,
    },
}

pub type Result<T> = std::result::Result<T, GridcalcError>;
