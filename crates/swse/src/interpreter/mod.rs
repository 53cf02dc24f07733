//! Expression interpreter.
//!
//! Evaluates parsed expressions against a [`VariableContext`], folding
//! arithmetic where operands are numeric and preserving dice and variable
//! text where they are not.

mod context;
mod error;
mod evaluator;

pub use context::{EvalContext, EvalOptions, NoVariables, VariableContext};
pub use error::{EvalWarning, LoadError};
pub use evaluator::{
    eval_expr, eval_text, eval_value, eval_value_array, evaluate, evaluate_str,
    evaluate_with_warnings, resolve_value_array,
};
