//! Implementation of the `swse reduce` command.

use std::path::PathBuf;

use miette::IntoDiagnostic;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use swse::reduce::{reduce_with_warnings, PriorityOrder, ReduceOptions, ReduceSpec};
use swse::Value;

use crate::output::diagnostic::load_sheet;
use crate::output::print_warnings;

/// Arguments for the reduce command.
#[derive(Debug, clap::Args)]
pub struct ReduceArgs {
    /// Sheet file (.json)
    #[arg(long, required = true)]
    pub sheet: PathBuf,

    /// Attribute key to reduce (e.g., "damage")
    pub key: String,

    /// Reduce strategies, comma-separated (e.g., "VALUES,UNIQUE")
    #[arg(short, long, default_value = "SUM")]
    pub strategy: String,

    /// How priority buckets are ordered
    #[arg(long, env = "SWSE_PRIORITY_ORDER", default_value_t = PriorityOrder::Lexicographic)]
    pub priority_order: PriorityOrder,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for reduce results.
#[derive(Serialize)]
struct ReduceResult {
    key: String,
    strategy: ReduceSpec,
    contributions: usize,
    result: Value,
    warnings: Vec<String>,
}

/// Run the reduce command.
pub fn run_reduce(args: ReduceArgs) -> miette::Result<i32> {
    let sheet = load_sheet(&args.sheet)?;
    let Some(values) = sheet.attributes.get(&args.key) else {
        eprintln!(
            "{}: no attribute '{}' in {}",
            "error".if_supports_color(Stream::Stderr, |text| text.red()),
            args.key,
            args.sheet.display()
        );
        return Ok(exitcode::DATAERR);
    };

    let spec = ReduceSpec::parse(&args.strategy);
    let options = ReduceOptions::builder()
        .priority_order(args.priority_order)
        .build();
    let (result, warnings) = reduce_with_warnings(&spec, values, &sheet, &options);

    if args.json {
        let output = ReduceResult {
            key: args.key,
            strategy: spec,
            contributions: values.len(),
            result,
            warnings: warnings.iter().map(ToString::to_string).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        print_warnings(&warnings);
        println!("{}", result);
    }
    Ok(exitcode::OK)
}
