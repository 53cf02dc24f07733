//! CLI command implementations.

mod eval;
mod inspect;
mod reduce;
mod strategies;
mod weight;

pub use eval::{run_eval, EvalArgs};
pub use inspect::{run_inspect, InspectArgs};
pub use reduce::{run_reduce, ReduceArgs};
pub use strategies::{run_strategies, StrategiesArgs};
pub use weight::{run_weight, WeightArgs};
