//! CLI tool to scan files with a pattern, awk-style.
//!
//! Prints every matching line (or one field of it) from the given
//! inputs. This is thin glue over the `linewise` engine: it registers a
//! single condition/action pair and runs the job.

use clap::Parser;
use linewise::{Awk, FieldSplitter, WriteMode, cond, csv};
use regex::Regex;
use std::process;

/// Scan input files line by line and print matching lines.
#[derive(Parser)]
#[command(name = "lwk")]
struct Cli {
    /// Regular expression evaluated against every line
    pattern: String,

    /// Input files to process
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Split fields on this literal separator instead of runs of spaces
    #[arg(short = 'F', long, conflicts_with = "csv")]
    separator: Option<String>,

    /// Parse each line as CSV (strict)
    #[arg(long)]
    csv: bool,

    /// Print only this field of each matching line (1-based)
    #[arg(short, long)]
    field: Option<usize>,

    /// Require the pattern to match at the start of the line
    #[arg(short, long)]
    anchored: bool,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    output: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let pattern = match Regex::new(&cli.pattern) {
        Ok(re) => re,
        Err(e) => {
            eprintln!("Invalid pattern '{}': {e}", cli.pattern);
            process::exit(1);
        }
    };

    let splitter = if cli.csv {
        csv::splitter(true)
    } else if let Some(sep) = &cli.separator {
        FieldSplitter::Literal(sep.clone())
    } else {
        FieldSplitter::whitespace()
    };

    let mut awk = Awk::new().field_separator(splitter);
    let condition: linewise::Condition = if cli.anchored {
        Box::new(cond::matches(pattern))
    } else {
        Box::new(cond::search(pattern))
    };

    match cli.field {
        Some(index) => awk.when(condition, move |ctx| {
            let field = ctx.field(index).unwrap_or("").to_string();
            ctx.print(&field)
        }),
        None => awk.when(condition, cond::print_line()),
    }

    let result = match &cli.output {
        Some(path) => awk.run_to_path(&cli.inputs, path, WriteMode::Truncate),
        None => awk.run(&cli.inputs),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
