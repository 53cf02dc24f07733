//! Rules expression parser.
//!
//! Expressions are parsed once into an [`Expr`] tree which the interpreter
//! then evaluates against a variable context.

pub mod ast;
pub mod error;
mod expression;

pub use ast::*;
pub use error::ParseError;
pub use expression::{MAX_NESTING, parse_expression};
