//! Error and warning types for the interpreter.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that occur while loading rules data from outside the core.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading a sheet file.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The sheet text is not valid JSON, or does not have the sheet shape.
    #[error("invalid sheet at line {}, column {}: {source}", source.line(), source.column())]
    Json {
        #[source]
        source: serde_json::Error,
    },
}

/// A diagnostic recorded while evaluating or reducing.
///
/// Evaluation never fails; these describe where input was degraded. They do
/// not change the value returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalWarning {
    /// A `@NAME` reference with no value in the variable context.
    #[error("unresolved variable '{name}'")]
    UnresolvedVariable { name: String },

    /// A variable whose value refers back to itself.
    #[error("cyclic variable reference: {}", chain.join(" -> "))]
    CyclicReference { chain: Vec<String> },

    /// Nested variable or splice re-evaluation went too deep.
    #[error("maximum evaluation depth exceeded at '{expression}'")]
    MaxDepthExceeded { expression: String },

    /// Text that does not parse as an expression.
    #[error("malformed expression '{expression}': {message}")]
    MalformedExpression { expression: String, message: String },

    /// An operand of `*`, `/` or a MULTIPLY contribution that is not a number.
    #[error("non-numeric operand '{operand}' for '{operator}'")]
    NonNumericOperand { operator: String, operand: String },

    /// A reduce strategy tag that names no known strategy.
    #[error("unrecognized reduce strategy '{name}'{}", suggestion_text(suggestions))]
    UnrecognizedStrategy {
        name: String,
        suggestions: Vec<String>,
    },
}

fn suggestion_text(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean: {}", suggestions.join(", "))
    }
}
