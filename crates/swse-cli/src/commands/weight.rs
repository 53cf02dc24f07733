//! Implementation of the `swse weight` command.

use miette::IntoDiagnostic;
use serde::Serialize;
use swse::interpreter::NoVariables;
use swse::rules::resolve_weight;
use swse::types::format_number;
use swse::Value;

/// Arguments for the weight command.
#[derive(Debug, clap::Args)]
pub struct WeightArgs {
    /// Weight text (e.g., "5 kg", "2 Tons", "(40 x Cost Factor) kg")
    pub weight: String,

    /// Number of items carried
    #[arg(short, long, default_value_t = 1.0)]
    pub quantity: f64,

    /// Cost factor substituted into the weight
    #[arg(long, default_value_t = 1.0)]
    pub cost_factor: f64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for weight results.
#[derive(Serialize)]
struct WeightResult {
    weight: String,
    kilograms: Option<f64>,
}

/// Run the weight command.
pub fn run_weight(args: WeightArgs) -> miette::Result<i32> {
    let kilograms = resolve_weight(
        &Value::from(args.weight.as_str()),
        args.quantity,
        args.cost_factor,
        &NoVariables,
    );

    if args.json {
        let output = WeightResult {
            weight: args.weight,
            kilograms,
        };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
        return Ok(if kilograms.is_some() {
            exitcode::OK
        } else {
            exitcode::DATAERR
        });
    }

    match kilograms {
        Some(kilograms) => {
            println!("{} kg", format_number(kilograms));
            Ok(exitcode::OK)
        }
        None => {
            eprintln!("Unreadable weight: {}", args.weight);
            Ok(exitcode::DATAERR)
        }
    }
}
