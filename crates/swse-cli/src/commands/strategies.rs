//! Implementation of the `swse strategies` command.

use miette::IntoDiagnostic;
use serde::Serialize;
use swse_semantics::{accepted_strategy_tags, mode_from_code, option_kind_keys, resolve_strategy};

use crate::output::table::format_name_table;

/// Arguments for the strategies command.
#[derive(Debug, clap::Args)]
pub struct StrategiesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output listing the accepted names.
#[derive(Serialize)]
struct NamesJson {
    strategies: Vec<TagJson>,
    modes: Vec<ModeJson>,
    option_keys: Vec<&'static str>,
}

#[derive(Serialize)]
struct TagJson {
    tag: &'static str,
    canonical: &'static str,
}

#[derive(Serialize)]
struct ModeJson {
    name: &'static str,
    code: u8,
}

/// Run the strategies command.
pub fn run_strategies(args: StrategiesArgs) -> miette::Result<i32> {
    let strategies: Vec<TagJson> = accepted_strategy_tags()
        .iter()
        .copied()
        .filter_map(|tag| {
            resolve_strategy(tag).map(|id| TagJson {
                tag,
                canonical: id.tag(),
            })
        })
        .collect();
    let modes: Vec<ModeJson> = (0..=6)
        .filter_map(mode_from_code)
        .map(|mode| ModeJson {
            name: mode.name(),
            code: mode.code(),
        })
        .collect();
    let option_keys: Vec<&'static str> = option_kind_keys().collect();

    if args.json {
        let output = NamesJson {
            strategies,
            modes,
            option_keys,
        };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
        return Ok(exitcode::OK);
    }

    let strategy_rows: Vec<(String, String)> = strategies
        .iter()
        .map(|entry| {
            let detail = if entry.tag == entry.canonical {
                String::new()
            } else {
                format!("alias of {}", entry.canonical)
            };
            (entry.tag.to_string(), detail)
        })
        .collect();
    println!("{}", format_name_table(["Strategy", "Notes"], &strategy_rows));

    let mode_rows: Vec<(String, String)> = modes
        .iter()
        .map(|mode| (mode.name.to_string(), mode.code.to_string()))
        .collect();
    println!("{}", format_name_table(["Mode", "Code"], &mode_rows));

    println!("Generated option keys:");
    for key in option_keys {
        println!("  - {}", key);
    }
    Ok(exitcode::OK)
}
