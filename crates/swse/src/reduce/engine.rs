//! Attribute reduction: combining many sourced values into one result.

use std::collections::BTreeMap;
use std::slice;

use strsim::levenshtein;
use swse_semantics::accepted_strategy_tags;
use tracing::{debug, warn};

use crate::interpreter::{EvalContext, EvalWarning, VariableContext, eval_value, eval_value_array};
use crate::reduce::combine::{add_values, downgrade, multiplier_of, multiply_values, upgrade};
use crate::reduce::spec::{PriorityOrder, ReduceOptions, ReduceSpec, Strategy};
use crate::types::{ApplicationMode, SourcedValue, Value, to_boolean, to_number, value_size};

/// Reduce sourced values with default options.
///
/// # Example
///
/// ```
/// use swse::interpreter::NoVariables;
/// use swse::reduce::{ReduceSpec, reduce};
/// use swse::types::{ApplicationMode, SourcedValue};
///
/// let values = vec![
///     SourcedValue::new(5),
///     SourcedValue::builder().value("1d8").mode(ApplicationMode::Upgrade).build(),
/// ];
/// let result = reduce(&ReduceSpec::parse("SUM"), &values, &NoVariables);
/// assert_eq!(result.to_string(), "1d8");
/// ```
pub fn reduce(spec: &ReduceSpec, values: &[SourcedValue], variables: &dyn VariableContext) -> Value {
    reduce_with(spec, values, variables, &ReduceOptions::default())
}

/// Reduce sourced values.
pub fn reduce_with(
    spec: &ReduceSpec,
    values: &[SourcedValue],
    variables: &dyn VariableContext,
    options: &ReduceOptions,
) -> Value {
    reduce_with_warnings(spec, values, variables, options).0
}

/// Reduce sourced values and return the warnings recorded along the way.
pub fn reduce_with_warnings(
    spec: &ReduceSpec,
    values: &[SourcedValue],
    variables: &dyn VariableContext,
    options: &ReduceOptions,
) -> (Value, Vec<EvalWarning>) {
    let mut ctx = EvalContext::with_options(variables, &options.eval);
    let result = reduce_in(spec, values, &mut ctx, options.priority_order);
    (result, ctx.take_warnings())
}

/// Reduce within an existing evaluation context.
pub fn reduce_in(
    spec: &ReduceSpec,
    values: &[SourcedValue],
    ctx: &mut EvalContext<'_>,
    order: PriorityOrder,
) -> Value {
    match spec {
        ReduceSpec::Raw => raw_values(values),
        ReduceSpec::Single(strategy) => apply_strategy(strategy, values, ctx, order),
        ReduceSpec::Chain(strategies) => {
            let mut stage: Vec<SourcedValue> = values.to_vec();
            let mut result = raw_values(values);
            for strategy in strategies {
                result = apply_strategy(strategy, &stage, ctx, order);
                stage = rewrap(&result);
            }
            result
        }
        ReduceSpec::Mapped(strategies) => {
            let mut mapped = BTreeMap::new();
            for strategy in strategies {
                let result = apply_strategy(strategy, values, ctx, order);
                mapped.insert(strategy.tag().to_string(), result);
            }
            Value::Map(mapped)
        }
    }
}

/// The input of the next chain stage: one contribution per list item, or a
/// single contribution for any other result.
fn rewrap(result: &Value) -> Vec<SourcedValue> {
    match result {
        Value::List(items) => items.iter().cloned().map(SourcedValue::new).collect(),
        other => vec![SourcedValue::new(other.clone())],
    }
}

fn raw_values(values: &[SourcedValue]) -> Value {
    Value::List(values.iter().map(|value| value.value.clone()).collect())
}

fn apply_strategy(
    strategy: &Strategy,
    values: &[SourcedValue],
    ctx: &mut EvalContext<'_>,
    order: PriorityOrder,
) -> Value {
    match strategy {
        Strategy::Sum => reduce_sum(values, ctx, order),
        Strategy::And => Value::Bool(values.iter().all(|value| to_boolean(&value.value))),
        Strategy::Or => Value::Bool(values.iter().any(|value| to_boolean(&value.value))),
        Strategy::Max => pick_by_size(values, ctx, |kept, next| kept > next),
        Strategy::Min => pick_by_size(values, ctx, |kept, next| kept < next),
        Strategy::First => values.first().map_or(Value::Empty, |value| value.value.clone()),
        Strategy::Values => reduce_values(values, order),
        Strategy::ValuesToLowercase => Value::List(
            values
                .iter()
                .map(|value| Value::String(value.value.to_string().to_lowercase()))
                .collect(),
        ),
        Strategy::Unique => {
            let mut unique: Vec<Value> = Vec::new();
            for value in values {
                if !unique.contains(&value.value) {
                    unique.push(value.value.clone());
                }
            }
            Value::List(unique)
        }
        Strategy::NumericValues => {
            Value::List(values.iter().map(|value| to_number(&value.value)).collect())
        }
        Strategy::Summary => {
            let mut summary = String::new();
            for value in values {
                let source = value.source.as_deref().unwrap_or("undefined");
                summary.push_str(&format!("{source}: {};  ", value.value));
            }
            Value::String(summary)
        }
        Strategy::Mapped => raw_values(values),
        Strategy::Unrecognized(name) => {
            let suggestions = compute_suggestions(name);
            warn!(strategy = %name, ?suggestions, "unrecognized reduce strategy");
            ctx.add_warning(EvalWarning::UnrecognizedStrategy {
                name: name.clone(),
                suggestions,
            });
            let joined: String = values.iter().map(|value| value.value.to_string()).collect();
            Value::String(joined)
        }
    }
}

/// Indices of `values` in application order: priority buckets in `order`,
/// then modes in resolution order, then input order.
pub fn application_order(values: &[SourcedValue], order: PriorityOrder) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..values.len()).collect();
    indices.sort_by(|&a, &b| {
        order
            .compare(values[a].effective_priority(), values[b].effective_priority())
            .then_with(|| values[a].mode.rank().cmp(&values[b].mode.rank()))
    });
    indices
}

/// The layered numeric reduction behind SUM and EXPRESSION.
fn reduce_sum(values: &[SourcedValue], ctx: &mut EvalContext<'_>, order: PriorityOrder) -> Value {
    let resolved: Vec<Value> = values
        .iter()
        .map(|value| eval_value(&value.value, ctx))
        .collect();

    let mut current = Value::Number(0.0);
    for index in application_order(values, order) {
        let value = &resolved[index];
        current = match values[index].mode {
            ApplicationMode::Add => add_values(&current, value),
            ApplicationMode::Downgrade => downgrade(&current, value),
            ApplicationMode::Upgrade => upgrade(&current, value),
            ApplicationMode::Multiply => match multiplier_of(value) {
                Some(multiplier) => multiply_values(&current, multiplier),
                None => {
                    debug!(multiplier = %value, "ignoring non-numeric multiplier");
                    ctx.add_warning(EvalWarning::NonNumericOperand {
                        operator: ApplicationMode::Multiply.name().to_string(),
                        operand: value.to_string(),
                    });
                    current
                }
            },
            ApplicationMode::Override => value.clone(),
            ApplicationMode::PostMultiply => Value::String(format!("{current} X {value}")),
        };
    }
    current
}

/// Raw values in application order. An OVERRIDE contribution at a later
/// priority than the last one recorded discards everything before it.
fn reduce_values(values: &[SourcedValue], order: PriorityOrder) -> Value {
    let mut current = Vec::new();
    let mut last_priority: Option<i64> = None;
    for index in application_order(values, order) {
        let value = &values[index];
        let priority = value.effective_priority();
        if value.mode == ApplicationMode::Override {
            let later = last_priority.is_none_or(|last| order.compare(last, priority).is_lt());
            if later {
                current.clear();
            }
        }
        current.push(value.value.clone());
        last_priority = Some(priority);
    }
    Value::List(current)
}

/// Fold values by size, keeping the running pick while `keep` holds.
///
/// Each contribution is summed as a value array first, so list values and
/// `*N` scaling take part.
fn pick_by_size(
    values: &[SourcedValue],
    ctx: &mut EvalContext<'_>,
    keep: fn(f64, f64) -> bool,
) -> Value {
    let mut picked: Option<(Value, f64)> = None;
    for value in values {
        let resolved = match &value.value {
            Value::List(items) => eval_value_array(items, ctx),
            other => eval_value_array(slice::from_ref(other), ctx),
        };
        let size = value_size(&resolved);
        picked = match picked {
            Some((kept, kept_size)) if keep(kept_size, size) => Some((kept, kept_size)),
            _ => Some((resolved, size)),
        };
    }
    picked.map_or(Value::Empty, |(value, _)| value)
}

/// Compute typo suggestions using Levenshtein distance.
///
/// - distance <= 1 for tags <= 3 chars
/// - distance <= 2 for longer tags
/// - at most 3 suggestions, closest first
fn compute_suggestions(name: &str) -> Vec<String> {
    let upper = name.to_ascii_uppercase();
    let max_distance = if upper.len() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, String)> = accepted_strategy_tags()
        .iter()
        .filter_map(|candidate| {
            let dist = levenshtein(&upper, candidate);
            if dist <= max_distance && dist > 0 {
                Some((dist, (*candidate).to_string()))
            } else {
                None
            }
        })
        .collect();

    suggestions.sort_by_key(|(dist, _)| *dist);
    suggestions.into_iter().take(3).map(|(_, s)| s).collect()
}
