//! Implementation of the `swse eval` command.

use std::collections::BTreeMap;
use std::path::PathBuf;

use miette::IntoDiagnostic;
use serde::Serialize;
use swse::interpreter::{evaluate_with_warnings, EvalOptions};
use swse::Value;

use crate::output::diagnostic::load_sheet;
use crate::output::print_warnings;

/// Arguments for the eval command.
#[derive(Debug, clap::Args)]
pub struct EvalArgs {
    /// Expression to evaluate (e.g., "1d8+@STRMOD")
    pub expression: String,

    /// Sheet file whose variables are visible to the expression (.json)
    #[arg(long)]
    pub sheet: Option<PathBuf>,

    /// Variables in @NAME=value format (repeatable)
    #[arg(short = 's', long = "set", value_parser = parse_key_val)]
    pub variables: Vec<(String, String)>,

    /// Maximum nesting of variable re-evaluation
    #[arg(long, default_value_t = 64)]
    pub max_depth: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for eval results.
#[derive(Serialize)]
pub struct EvalResult {
    pub result: Value,
    pub warnings: Vec<String>,
}

/// Parse a name=value variable string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid variable format '{}': expected @NAME=value", s))?;
    Ok((name.trim().to_string(), value.to_string()))
}

/// Numbers and booleans are typed; anything else stays text and is
/// evaluated when referenced.
fn variable_value(text: &str) -> Value {
    if let Ok(number) = text.trim().parse::<f64>() {
        Value::Number(number)
    } else if let Ok(flag) = text.trim().parse::<bool>() {
        Value::Bool(flag)
    } else {
        Value::from(text)
    }
}

/// Run the eval command.
pub fn run_eval(args: EvalArgs) -> miette::Result<i32> {
    let mut variables: BTreeMap<String, Value> = match &args.sheet {
        Some(path) => load_sheet(path)?.variables,
        None => BTreeMap::new(),
    };
    for (name, value) in &args.variables {
        variables.insert(name.clone(), variable_value(value));
    }

    let options = EvalOptions::builder().max_depth(args.max_depth).build();
    let (result, warnings) =
        evaluate_with_warnings(&Value::from(args.expression.as_str()), &variables, &options);

    if args.json {
        let output = EvalResult {
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
