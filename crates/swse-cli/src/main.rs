//! SWSE CLI entry point.
//!
//! Provides command-line tools for working with SWSE rules data:
//! - `swse eval` - Evaluate an expression
//! - `swse reduce` - Reduce one attribute of a sheet
//! - `swse inspect` - Show every attribute of a sheet
//! - `swse weight` - Resolve an item weight
//! - `swse strategies` - List reduce strategies and application modes

mod commands;
mod output;

use std::io::stderr;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{
    run_eval, run_inspect, run_reduce, run_strategies, run_weight, EvalArgs, InspectArgs,
    ReduceArgs, StrategiesArgs, WeightArgs,
};
use tracing_subscriber::EnvFilter;

/// SWSE rules tools.
#[derive(Debug, Parser)]
#[command(name = "swse")]
#[command(about = "SWSE expression and attribute tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Evaluate an expression
    Eval(EvalArgs),
    /// Reduce one attribute of a sheet
    Reduce(ReduceArgs),
    /// Show every attribute of a sheet
    Inspect(InspectArgs),
    /// Resolve an item weight in kilograms
    Weight(WeightArgs),
    /// List reduce strategies, application modes and option keys
    Strategies(StrategiesArgs),
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors automatically checks TTY, NO_COLOR, FORCE_COLOR
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

/// Log to stderr. `--verbose` wins over `RUST_LOG`.
fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(stderr)
        .with_target(false)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    setup_logging(cli.verbose);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Eval(args) => run_eval(args),
        Commands::Reduce(args) => run_reduce(args),
        Commands::Inspect(args) => run_inspect(args),
        Commands::Weight(args) => run_weight(args),
        Commands::Strategies(args) => run_strategies(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{:?}", e);
            exit(exitcode::SOFTWARE);
        }
    }
}
