//! Expression evaluation.
//!
//! Evaluation never fails. Input that cannot be computed degrades to text:
//! dice and variable references survive arithmetic as `"1d6 + 4"`, unknown
//! variables stay as their `@NAME`, and unparsable text is returned as-is.

use tracing::{debug, warn};

use crate::interpreter::context::{EvalContext, EvalOptions, VariableContext};
use crate::interpreter::error::EvalWarning;
use crate::parser::{BinaryOp, CompareOp, Expr, Function, ParseError, UnaryOp, parse_expression};
use crate::types::{Value, as_arithmetic, find_dice, numeric_prefix};

/// Evaluate a value against a variable context.
///
/// # Example
///
/// ```
/// use swse::interpreter::evaluate;
/// use swse::{Value, variables};
///
/// let vars = variables! { "@STRMOD" => 3 };
/// assert_eq!(evaluate(&"MAX(1,@STRMOD)+3".into(), &vars), Value::Number(6.0));
/// assert_eq!(evaluate(&"1d6+4".into(), &vars), Value::from("1d6 + 4"));
/// ```
pub fn evaluate(expression: &Value, variables: &dyn VariableContext) -> Value {
    let mut ctx = EvalContext::new(variables);
    eval_value(expression, &mut ctx)
}

/// Evaluate expression text against a variable context.
pub fn evaluate_str(expression: &str, variables: &dyn VariableContext) -> Value {
    let mut ctx = EvalContext::new(variables);
    eval_text(expression, &mut ctx)
}

/// Evaluate a value and return the warnings recorded along the way.
pub fn evaluate_with_warnings(
    expression: &Value,
    variables: &dyn VariableContext,
    options: &EvalOptions,
) -> (Value, Vec<EvalWarning>) {
    let mut ctx = EvalContext::with_options(variables, options);
    let value = eval_value(expression, &mut ctx);
    (value, ctx.take_warnings())
}

/// Evaluate a value within an existing context.
///
/// - `Empty` evaluates to 0
/// - numbers and booleans are returned unchanged
/// - text is parsed and evaluated
/// - lists evaluate element-wise
/// - structured `{ "value": ... }` maps evaluate their inner value; other maps
///   are returned unchanged
pub fn eval_value(value: &Value, ctx: &mut EvalContext<'_>) -> Value {
    match value {
        Value::Empty => Value::Number(0.0),
        Value::Bool(_) | Value::Number(_) => value.clone(),
        Value::String(text) => eval_text(text, ctx),
        Value::List(items) => Value::List(items.iter().map(|item| eval_value(item, ctx)).collect()),
        Value::Map(map) => match map.get("value") {
            Some(inner) => eval_value(inner, ctx),
            None => value.clone(),
        },
    }
}

/// Parse and evaluate expression text.
pub fn eval_text(text: &str, ctx: &mut EvalContext<'_>) -> Value {
    if text.trim().is_empty() {
        return Value::Number(0.0);
    }
    match parse_expression(text) {
        Ok(expr) => eval_expr(&expr, ctx),
        Err(error) => {
            debug!(expression = text, %error, "expression did not parse");
            ctx.add_warning(EvalWarning::MalformedExpression {
                expression: text.to_string(),
                message: error.to_string(),
            });
            match error {
                ParseError::UnbalancedParens { .. } => Value::Empty,
                ParseError::Syntax { .. } | ParseError::TooDeep { .. } => {
                    Value::String(text.to_string())
                }
            }
        }
    }
}

/// Evaluate a parsed expression.
pub fn eval_expr(expr: &Expr, ctx: &mut EvalContext<'_>) -> Value {
    match expr {
        Expr::Number(n) => Value::Number(*n),
        Expr::Atom(text) => eval_atom(text, ctx),
        Expr::Group(inner) => eval_expr(inner, ctx),
        Expr::Unary { op, operand } => {
            let value = eval_expr(operand, ctx);
            match (op, as_arithmetic(&value)) {
                (UnaryOp::Neg, Some(n)) => Value::Number(-n),
                (UnaryOp::Neg, None) => Value::String(format!("-{value}")),
                (UnaryOp::Plus, Some(n)) => Value::Number(n),
                (UnaryOp::Plus, None) => value,
            }
        }
        Expr::Binary { op, lhs, rhs } => {
            let lhs = eval_expr(lhs, ctx);
            let rhs = eval_expr(rhs, ctx);
            eval_binary(*op, &lhs, &rhs, ctx)
        }
        Expr::Compare { op, lhs, rhs } => {
            let lhs = eval_expr(lhs, ctx);
            let rhs = eval_expr(rhs, ctx);
            Value::Bool(compare(*op, &lhs, &rhs))
        }
        Expr::Call { function, args } => {
            let args: Vec<Value> = args.iter().map(|arg| eval_expr(arg, ctx)).collect();
            call_function(*function, &args)
        }
        Expr::Splice(parts) => eval_splice(parts, ctx),
    }
}

fn eval_atom(text: &str, ctx: &mut EvalContext<'_>) -> Value {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Value::Number(0.0)
    } else if trimmed.starts_with('@') {
        resolve_variable(trimmed, ctx)
    } else if find_dice(trimmed).is_some() {
        Value::String(trimmed.to_string())
    } else {
        match numeric_prefix(trimmed) {
            Some(n) => Value::Number(n),
            None => Value::String(trimmed.to_string()),
        }
    }
}

/// Resolve a `@NAME` reference, evaluating the variable's own value.
fn resolve_variable(name: &str, ctx: &mut EvalContext<'_>) -> Value {
    let Some(value) = ctx.variable(name) else {
        warn!(variable = name, "could not find variable");
        ctx.add_warning(EvalWarning::UnresolvedVariable {
            name: name.to_string(),
        });
        return Value::String(name.to_string());
    };
    if let Err(warning) = ctx.push_call(name) {
        warn!(variable = name, %warning, "variable not evaluated");
        ctx.add_warning(warning);
        return Value::String(name.to_string());
    }
    let result = eval_value(&value, ctx);
    ctx.pop_call();
    result
}

fn eval_binary(op: BinaryOp, lhs: &Value, rhs: &Value, ctx: &mut EvalContext<'_>) -> Value {
    if let (Some(a), Some(b)) = (as_arithmetic(lhs), as_arithmetic(rhs)) {
        return Value::Number(match op {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => a / b,
        });
    }
    if matches!(op, BinaryOp::Mul | BinaryOp::Div) {
        let operand = if as_arithmetic(lhs).is_none() { lhs } else { rhs };
        ctx.add_warning(EvalWarning::NonNumericOperand {
            operator: op.symbol().to_string(),
            operand: operand.to_string(),
        });
    }
    Value::String(format!("{lhs} {} {rhs}", op.symbol()))
}

fn compare(op: CompareOp, lhs: &Value, rhs: &Value) -> bool {
    if op == CompareOp::Eq {
        return lhs == rhs;
    }
    if let (Value::String(a), Value::String(b)) = (lhs, rhs) {
        return match op {
            CompareOp::Gt => a > b,
            CompareOp::Lt => a < b,
            CompareOp::Eq => a == b,
        };
    }
    match (as_arithmetic(lhs), as_arithmetic(rhs)) {
        (Some(a), Some(b)) => match op {
            CompareOp::Gt => a > b,
            CompareOp::Lt => a < b,
            CompareOp::Eq => a == b,
        },
        _ => false,
    }
}

fn call_function(function: Function, args: &[Value]) -> Value {
    let numbers: Option<Vec<f64>> = args.iter().map(as_arithmetic).collect();
    match numbers {
        Some(numbers) => Value::Number(match function {
            Function::Max => numbers.into_iter().fold(f64::NEG_INFINITY, f64::max),
            Function::Min => numbers.into_iter().fold(f64::INFINITY, f64::min),
        }),
        None => {
            let rendered: Vec<String> = args.iter().map(Value::to_string).collect();
            Value::String(format!("{}({})", function.name(), rendered.join(", ")))
        }
    }
}

/// Render juxtaposed parts into one text and read it again.
fn eval_splice(parts: &[Expr], ctx: &mut EvalContext<'_>) -> Value {
    let mut text = String::new();
    for part in parts {
        match part {
            Expr::Atom(raw) => text.push_str(raw),
            other => text.push_str(&eval_expr(other, ctx).to_string()),
        }
    }
    if let Err(warning) = ctx.enter(&text) {
        debug!(expression = %text, "splice not re-evaluated");
        ctx.add_warning(warning);
        return Value::String(text);
    }
    let result = eval_text(&text, ctx);
    ctx.leave();
    result
}

/// Sum a list of expressions, scaling by `*N` and `/N` entries.
///
/// Entries that do not evaluate to numbers are joined with `" + "`; a scale
/// other than 1 is then appended as `" * m"`.
///
/// ```
/// use swse::Value;
/// use swse::interpreter::{NoVariables, resolve_value_array};
///
/// let values = vec![Value::from(4), Value::from("*3")];
/// assert_eq!(resolve_value_array(&values, &NoVariables), Value::Number(12.0));
/// ```
pub fn resolve_value_array(values: &[Value], variables: &dyn VariableContext) -> Value {
    let mut ctx = EvalContext::new(variables);
    eval_value_array(values, &mut ctx)
}

/// [`resolve_value_array`] within an existing context.
pub fn eval_value_array(values: &[Value], ctx: &mut EvalContext<'_>) -> Value {
    let mut total = Value::Number(0.0);
    let mut multiplier = 1.0;
    for value in values {
        if value.is_falsy() {
            continue;
        }
        if let Value::String(text) = value {
            if let Some(factor) = text.strip_prefix('*') {
                multiplier *= scale_factor(factor, ctx);
                continue;
            }
            if let Some(divisor) = text.strip_prefix('/') {
                multiplier /= scale_factor(divisor, ctx);
                continue;
            }
        }
        let result = eval_value(value, ctx);
        total = match (&total, &result) {
            (Value::Number(t), Value::Number(r)) => Value::Number(t + r),
            (Value::Number(t), _) if *t == 0.0 => Value::String(result.to_string()),
            _ => Value::String(format!("{total} + {result}")),
        };
    }
    match total {
        Value::Number(t) => Value::Number(t * multiplier),
        _ if multiplier == 1.0 => total,
        _ => Value::String(format!("{total} * {}", Value::Number(multiplier))),
    }
}

fn scale_factor(text: &str, ctx: &mut EvalContext<'_>) -> f64 {
    as_arithmetic(&eval_text(text, ctx)).unwrap_or(f64::NAN)
}
