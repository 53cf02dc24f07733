//! Parse error types for rules expressions.

use thiserror::Error;

/// An error that occurred while parsing an expression.
///
/// Columns are 1-based character offsets into the expression text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A syntax error with location information.
    #[error("syntax error at column {column}: {message}")]
    Syntax { column: usize, message: String },

    /// A parenthesis without a partner.
    #[error("unbalanced parenthesis at column {column}")]
    UnbalancedParens { column: usize },

    /// Nesting too deep to parse safely.
    #[error("nesting deeper than {limit} at column {column}")]
    TooDeep { column: usize, limit: usize },
}
