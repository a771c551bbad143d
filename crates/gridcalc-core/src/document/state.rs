use crate::config::{Config, DEFAULT_COLS, DEFAULT_ROWS};
use crate::recalc::recalculate;
use crate::sample::{SAMPLE_SHEET_COLS, SAMPLE_SHEET_ROWS, sample_table};
use gridcalc_engine::engine::CellTable;

/// UI-agnostic document state for the spreadsheet.
///
/// Owns the current table. Edits go through `&mut self`, so each edit's
/// resulting table is published before the next edit starts.
#[derive(Debug, Clone)]
pub struct Document {
    /// The current cell table
    pub(crate) table: CellTable,
    /// Number of rows in the sheet
    pub rows: usize,
    /// Number of columns in the sheet
    pub cols: usize,
    /// Whether the table has been edited since creation
    pub modified: bool,
}

impl Document {
    /// Create an empty document with the default dimensions.
    pub fn new() -> Self {
        Self::with_dimensions(DEFAULT_ROWS, DEFAULT_COLS)
    }

    pub fn with_dimensions(rows: usize, cols: usize) -> Self {
        Document {
            table: CellTable::new(),
            rows,
            cols,
            modified: false,
        }
    }

    /// Create a document seeded with the sample dataset.
    pub fn with_sample_data() -> Self {
        let mut doc = Self::new();
        doc.load_sample_data();
        doc
    }

    /// Create a document sized (and optionally seeded) from config.
    pub fn from_config(config: &Config) -> Self {
        let mut doc = Self::with_dimensions(config.rows, config.cols);
        if config.sample_data {
            doc.load_sample_data();
        }
        doc
    }

    /// Wrap an existing table, bringing its computed values up to date.
    pub fn from_table(table: CellTable, rows: usize, cols: usize) -> Self {
        Document {
            table: recalculate(table),
            rows,
            cols,
            modified: false,
        }
    }

    /// Replace the table with the sample dataset, growing the sheet to fit it.
    pub fn load_sample_data(&mut self) {
        tracing::debug!("seeding sample dataset");
        self.rows = self.rows.max(SAMPLE_SHEET_ROWS);
        self.cols = self.cols.max(SAMPLE_SHEET_COLS);
        self.table = sample_table();
    }

    /// The current table snapshot.
    pub fn table(&self) -> &CellTable {
        &self.table
    }

    /// Take the table out of the document.
    pub fn into_table(self) -> CellTable {
        self.table
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
