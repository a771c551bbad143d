//! Gridcalc - evaluate spreadsheet formulas from the command line

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use gridcalc_core::{Document, load_config};
use gridcalc_engine::engine::describe_builtins;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gridcalc")]
#[command(author, version, about = "Spreadsheet formula engine with whole-sheet recalculation")]
struct Cli {
    /// Evaluate a formula against the sheet and print the result (leading '=' optional)
    #[arg(short = 'c', long = "command", value_name = "FORMULA")]
    command: Option<String>,

    /// Edit a cell before evaluating, e.g. `A1=5` or `H6==SUM(A2:A6)` (repeatable)
    #[arg(short, long = "set", value_name = "REF=INPUT")]
    set: Vec<String>,

    /// Print a cell's displayed value, by reference (B3) or identifier (2-1) (repeatable)
    #[arg(short, long = "get", value_name = "REF")]
    get: Vec<String>,

    /// Seed the sheet with the sample dataset
    #[arg(long)]
    sample: bool,

    /// Print every non-empty cell as REF, input and displayed value
    #[arg(long)]
    dump: bool,

    /// List the built-in functions
    #[arg(long)]
    functions: bool,

    /// Config file (default: the user config dir's config.toml)
    #[arg(long, value_name = "FILE", conflicts_with = "no_config")]
    config: Option<PathBuf>,

    /// Ignore any config file
    #[arg(long)]
    no_config: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = if verbose == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    } else {
        EnvFilter::new(default_level)
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Split `REF=INPUT` at the first '=', so formulas keep their own '='.
fn parse_assignment(arg: &str) -> Result<(&str, &str)> {
    arg.split_once('=')
        .filter(|(reference, _)| !reference.trim().is_empty())
        .ok_or_else(|| anyhow!("expected REF=INPUT, got {:?}", arg))
}

fn build_document(cli: &Cli) -> Result<Document> {
    let mut doc = if cli.no_config {
        Document::new()
    } else {
        let (config, warnings) = load_config(cli.config.as_deref());
        for warning in warnings {
            eprintln!("Warning: {}", warning);
        }
        Document::from_config(&config)
    };

    if cli.sample && doc.table().is_empty() {
        doc.load_sample_data();
    }

    for assignment in &cli.set {
        let (reference, input) = parse_assignment(assignment)?;
        let cell = doc.resolve_cell(reference)?;
        doc.set_cell_from_input(cell, input)
            .with_context(|| format!("failed to set {}", reference.trim()))?;
    }

    tracing::debug!(edits = cli.set.len(), cells = doc.table().len(), "document ready");
    Ok(doc)
}

fn run(cli: &Cli) -> Result<ExitCode> {
    if cli.functions {
        for (name, description) in describe_builtins() {
            println!("{}\t{}", name, description);
        }
        return Ok(ExitCode::SUCCESS);
    }

    if cli.command.is_none() && cli.get.is_empty() && !cli.dump && cli.set.is_empty() {
        bail!("nothing to do; pass -c, -g, --set or --dump (see --help)");
    }

    let doc = build_document(cli)?;
    let mut failed = false;

    if let Some(formula) = &cli.command {
        let value = doc.evaluate_formula(formula);
        println!("{}", value);
        failed |= value.is_error();
    }

    for reference in &cli.get {
        let cell = doc.resolve_cell(reference)?;
        println!("{}", doc.cell_display(&cell));
    }

    if cli.dump {
        for (cell, record) in doc.non_empty_cells() {
            println!("{}\t{}\t{}", cell, record.to_input_string(), record.display());
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
