//! Sample business dataset: a header row followed by five task rows.

use gridcalc_engine::engine::{CellRecord, CellRef, CellTable};

pub const SAMPLE_HEADERS: [&str; 10] = [
    "Task Description",
    "Status",
    "Assigned To",
    "Priority",
    "Due Date",
    "Estimated Value",
    "Progress",
    "Category",
    "Department",
    "Notes",
];

pub const SAMPLE_ROWS: [[&str; 10]; 5] = [
    [
        "Launch social media campaign",
        "In-progress",
        "Sophie Choudhury",
        "Medium",
        "20-11-2024",
        "6,200,000",
        "75%",
        "Marketing",
        "Digital",
        "Campaign materials ready",
    ],
    [
        "Update press kit for redesign",
        "Ready to start",
        "Tejas Pandey",
        "High",
        "30-10-2024",
        "3,500,000",
        "0%",
        "PR",
        "Communications",
        "Waiting for approval",
    ],
    [
        "Finalize user testing feedback",
        "In-progress",
        "Rachel Lee",
        "Medium",
        "10-12-2024",
        "4,750,000",
        "60%",
        "UX Research",
        "Product",
        "Testing in progress",
    ],
    [
        "Design new website features",
        "Complete",
        "Tom Wright",
        "Low",
        "15-01-2025",
        "5,900,000",
        "100%",
        "Design",
        "Product",
        "Ready for development",
    ],
    [
        "Prepare Q4 financial report",
        "Blocked",
        "Kevin Smith",
        "High",
        "30-01-2025",
        "2,800,000",
        "25%",
        "Finance",
        "Operations",
        "Waiting for data",
    ],
];

/// Rows needed to hold the sample: the header plus every task row.
pub const SAMPLE_SHEET_ROWS: usize = SAMPLE_ROWS.len() + 1;
pub const SAMPLE_SHEET_COLS: usize = SAMPLE_HEADERS.len();

/// Build the sample table. Every cell is a literal; no formulas.
pub fn sample_table() -> CellTable {
    let mut table = CellTable::new();
    for (col, header) in SAMPLE_HEADERS.iter().enumerate() {
        table.insert(CellRef::new(col, 0), CellRecord::literal(header));
    }
    for (row_idx, row) in SAMPLE_ROWS.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            table.insert(CellRef::new(col, row_idx + 1), CellRecord::literal(value));
        }
    }
    table
}
