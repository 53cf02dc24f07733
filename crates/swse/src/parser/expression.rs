//! Expression parser using winnow.
//!
//! Precedence, loosest first: comparison, `+ -`, `* /`, unary sign, then
//! juxtaposed operands (groups, calls and atoms).

use super::ast::{BinaryOp, CompareOp, Expr, Function, UnaryOp};
use super::error::ParseError;
use crate::types::strict_number;
use winnow::combinator::{alt, delimited, opt, preceded, repeat, separated};
use winnow::prelude::*;
use winnow::token::take_while;

/// Characters that end an atom.
const OPERATOR_CHARS: &str = "+-*/(),<>=";

/// Deepest parenthesis nesting, and longest run of signs, that will be parsed.
pub const MAX_NESTING: usize = 64;

/// Parse an expression into an AST.
///
/// # Example
///
/// ```
/// use swse::parser::{BinaryOp, Expr, parse_expression};
///
/// let expr = parse_expression("3+4*9").unwrap();
/// let Expr::Binary { op, .. } = expr else { panic!() };
/// assert_eq!(op, BinaryOp::Add);
/// ```
pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
    scan(input)?;
    let mut remaining = input;
    match expression(&mut remaining) {
        Ok(expr) => {
            if remaining.is_empty() {
                Ok(expr)
            } else {
                Err(ParseError::Syntax {
                    column: calculate_column(input, remaining),
                    message: format!(
                        "unexpected character: '{}'",
                        remaining.chars().next().unwrap_or('?')
                    ),
                })
            }
        }
        Err(e) => Err(ParseError::Syntax {
            column: calculate_column(input, remaining),
            message: format!("parse error: {e}"),
        }),
    }
}

/// Calculate the 1-based column from original input and remaining input.
fn calculate_column(original: &str, remaining: &str) -> usize {
    let consumed = original.len() - remaining.len();
    original[..consumed].chars().count() + 1
}

/// Check what the recursive descent cannot survive before starting it.
///
/// An unclosed `(` is reported at its column. Parenthesis nesting or a run
/// of signs (whitespace between them allowed) deeper than [`MAX_NESTING`] is
/// reported where the limit is crossed. A stray `)` is left to the parser.
fn scan(input: &str) -> Result<(), ParseError> {
    let mut open = Vec::new();
    let mut signs = 0;
    for (index, c) in input.chars().enumerate() {
        let column = index + 1;
        match c {
            '(' => {
                open.push(column);
                signs = 0;
            }
            ')' => {
                open.pop();
                signs = 0;
            }
            '+' | '-' => signs += 1,
            c if c.is_whitespace() => {}
            _ => signs = 0,
        }
        if open.len() > MAX_NESTING || signs > MAX_NESTING {
            return Err(ParseError::TooDeep {
                column,
                limit: MAX_NESTING,
            });
        }
    }
    match open.first() {
        Some(&column) => Err(ParseError::UnbalancedParens { column }),
        None => Ok(()),
    }
}

fn expression(input: &mut &str) -> ModalResult<Expr> {
    let expr = comparison(input)?;
    let _ = ws(input)?;
    Ok(expr)
}

fn comparison(input: &mut &str) -> ModalResult<Expr> {
    let lhs = additive(input)?;
    let rest = opt((preceded(ws, compare_op), additive)).parse_next(input)?;
    Ok(match rest {
        Some((op, rhs)) => Expr::Compare {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        None => lhs,
    })
}

fn compare_op(input: &mut &str) -> ModalResult<CompareOp> {
    alt((
        '>'.value(CompareOp::Gt),
        '<'.value(CompareOp::Lt),
        '='.value(CompareOp::Eq),
    ))
    .parse_next(input)
}

fn additive(input: &mut &str) -> ModalResult<Expr> {
    let first = multiplicative(input)?;
    let rest: Vec<(BinaryOp, Expr)> = repeat(
        0..,
        (
            preceded(ws, alt(('+'.value(BinaryOp::Add), '-'.value(BinaryOp::Sub)))),
            multiplicative,
        ),
    )
    .parse_next(input)?;
    Ok(fold_binary(first, rest))
}

fn multiplicative(input: &mut &str) -> ModalResult<Expr> {
    let first = unary(input)?;
    let rest: Vec<(BinaryOp, Expr)> = repeat(
        0..,
        (
            preceded(ws, alt(('*'.value(BinaryOp::Mul), '/'.value(BinaryOp::Div)))),
            unary,
        ),
    )
    .parse_next(input)?;
    Ok(fold_binary(first, rest))
}

/// Left-fold a chain of same-precedence operators.
fn fold_binary(first: Expr, rest: Vec<(BinaryOp, Expr)>) -> Expr {
    rest.into_iter().fold(first, |lhs, (op, rhs)| Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    })
}

fn unary(input: &mut &str) -> ModalResult<Expr> {
    let _ = ws(input)?;
    let op = opt(alt(('-'.value(UnaryOp::Neg), '+'.value(UnaryOp::Plus)))).parse_next(input)?;
    match op {
        Some(op) => {
            let operand = unary(input)?;
            Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
            })
        }
        None => splice(input),
    }
}

/// One or more juxtaposed operands.
fn splice(input: &mut &str) -> ModalResult<Expr> {
    let parts: Vec<Expr> = repeat(1.., primary).parse_next(input)?;
    let mut parts: Vec<Expr> = parts
        .into_iter()
        .filter(|part| !matches!(part, Expr::Atom(text) if text.trim().is_empty()))
        .collect();
    Ok(match parts.len() {
        0 => Expr::Atom(String::new()),
        1 => match parts.remove(0) {
            Expr::Atom(text) => classify_atom(text.trim()),
            other => other,
        },
        _ => Expr::Splice(parts),
    })
}

fn classify_atom(text: &str) -> Expr {
    match strict_number(text) {
        Some(n) if !text.is_empty() => Expr::Number(n),
        _ => Expr::Atom(text.to_string()),
    }
}

fn primary(input: &mut &str) -> ModalResult<Expr> {
    alt((call, group, atom)).parse_next(input)
}

/// A function call: `NAME(arg, ...)` with no space before the parenthesis.
///
/// Any other name is spliced with its parenthesized first argument, so
/// `x(1+1)` reads as `x2`. Later arguments are dropped.
fn call(input: &mut &str) -> ModalResult<Expr> {
    let (name, mut args) = (
        identifier,
        delimited('(', separated(0.., comparison, ','), preceded(ws, ')')),
    )
        .parse_next(input)?;
    Ok(match Function::from_name(name) {
        Some(function) => Expr::Call { function, args },
        None => {
            let first = if args.is_empty() {
                Expr::Atom(String::new())
            } else {
                args.swap_remove(0)
            };
            Expr::Splice(vec![Expr::Atom(name.to_string()), Expr::Group(Box::new(first))])
        }
    })
}

fn group(input: &mut &str) -> ModalResult<Expr> {
    let inner = delimited('(', opt(comparison), preceded(ws, ')')).parse_next(input)?;
    Ok(Expr::Group(Box::new(
        inner.unwrap_or_else(|| Expr::Atom(String::new())),
    )))
}

/// A maximal run of non-operator characters, whitespace included.
fn atom(input: &mut &str) -> ModalResult<Expr> {
    take_while(1.., |c: char| !OPERATOR_CHARS.contains(c))
        .map(|text: &str| Expr::Atom(text.to_string()))
        .parse_next(input)
}

fn identifier<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    take_while(1.., |c: char| c.is_ascii_alphabetic() || c == '_').parse_next(input)
}

fn ws<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    take_while(0.., |c: char| c.is_whitespace()).parse_next(input)
}
