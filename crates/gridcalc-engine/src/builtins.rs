//! Built-in aggregate functions and their metadata.
//!
//! Conventions:
//! - Spreadsheet-facing names are ALL CAPS and matched case-sensitively.
//! - Every aggregate takes comma-separated references or ranges and is
//!   expanded to a number before arithmetic evaluation.
//! - To add an aggregate, append it to `AGGREGATE_BUILTINS`; the call regex
//!   is built from that list.

use regex::Regex;
use std::sync::OnceLock;

pub struct AggregateBuiltin {
    pub sheet_name: &'static str,
    /// Reduces the sum and count of the flattened argument values.
    /// `count` is never zero.
    pub reduce: fn(sum: f64, count: f64) -> f64,
    pub description: &'static str,
}

pub const AGGREGATE_BUILTINS: &[AggregateBuiltin] = &[
    AggregateBuiltin {
        sheet_name: "SUM",
        reduce: sum,
        description: "Sum of the referenced values",
    },
    AggregateBuiltin {
        sheet_name: "AVERAGE",
        reduce: average,
        description: "Arithmetic mean of the referenced values",
    },
];

fn sum(total: f64, _count: f64) -> f64 {
    total
}

fn average(total: f64, count: f64) -> f64 {
    total / count
}

/// Matches `NAME(args)` for every aggregate; group 1 is the name, group 2 the
/// raw argument text (which may be empty).
pub fn aggregate_fn_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let names = AGGREGATE_BUILTINS
            .iter()
            .map(|b| b.sheet_name)
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"\b({})\(([^)]*)\)", names))
            .expect("built-in aggregate regex must compile")
    })
}

pub fn aggregate_builtin(sheet_name: &str) -> Option<&'static AggregateBuiltin> {
    AGGREGATE_BUILTINS.iter().find(|b| b.sheet_name == sheet_name)
}

/// Name and one-line description of every aggregate, in registry order.
pub fn describe_builtins() -> Vec<(&'static str, &'static str)> {
    AGGREGATE_BUILTINS
        .iter()
        .map(|b| (b.sheet_name, b.description))
        .collect()
}
