//! Implementation of the `swse inspect` command.

use std::collections::BTreeMap;
use std::path::PathBuf;

use miette::IntoDiagnostic;
use serde::Serialize;
use swse::reduce::{reduce_with_warnings, PriorityOrder, ReduceOptions, ReduceSpec};
use swse::Value;

use crate::output::diagnostic::load_sheet;
use crate::output::print_warnings;
use crate::output::table::{format_attribute_table, format_variable_table, AttributeRow};

/// Arguments for the inspect command.
#[derive(Debug, clap::Args)]
pub struct InspectArgs {
    /// Sheet file (.json)
    pub sheet: PathBuf,

    /// Reduce strategies applied to every attribute
    #[arg(short, long, default_value = "SUM")]
    pub strategy: String,

    /// How priority buckets are ordered
    #[arg(long, env = "SWSE_PRIORITY_ORDER", default_value_t = PriorityOrder::Lexicographic)]
    pub priority_order: PriorityOrder,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for an inspected sheet.
#[derive(Serialize)]
struct InspectJson {
    variables: BTreeMap<String, Value>,
    attributes: BTreeMap<String, Value>,
}

/// Run the inspect command.
pub fn run_inspect(args: InspectArgs) -> miette::Result<i32> {
    let sheet = load_sheet(&args.sheet)?;
    let spec = ReduceSpec::parse(&args.strategy);
    let options = ReduceOptions::builder()
        .priority_order(args.priority_order)
        .build();

    let mut rows = Vec::new();
    let mut warnings = Vec::new();
    for (key, values) in &sheet.attributes {
        let (result, found) = reduce_with_warnings(&spec, values, &sheet, &options);
        warnings.extend(found);
        rows.push(AttributeRow {
            key: key.clone(),
            contributions: values.len(),
            sources: values
                .iter()
                .map(|value| value.source.clone().unwrap_or_else(|| "unknown".to_string()))
                .collect(),
            result,
        });
    }

    if args.json {
        let output = InspectJson {
            variables: sheet.variables.clone(),
            attributes: rows
                .into_iter()
                .map(|row| (row.key, row.result))
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
        return Ok(exitcode::OK);
    }

    print_warnings(&warnings);
    if !sheet.variables.is_empty() {
        println!("{}", format_variable_table(&sheet.variables));
    }
    println!("{}", format_attribute_table(&rows));
    Ok(exitcode::OK)
}
