//! Structural arithmetic over dice-and-number values.
//!
//! Values are decomposed into [`DiceTerm`]s, summed per group and per die
//! size, and reassembled into text such as `"2d8 + 1d6 + 3"`.

use std::collections::BTreeMap;

use crate::types::{
    DiceTerm, TermAmount, Value, decompose, format_number, integer_prefix, terms_size,
};

/// Running sums for one named (or the unnamed) group.
#[derive(Debug, Default)]
struct GroupSum {
    name: Option<String>,
    /// Keyed by `(sides, multiplier)`; flat numbers use sides 0.
    numeric: BTreeMap<(u32, u32), f64>,
    /// Variable references and other text, in order of appearance.
    text: Vec<String>,
}

impl GroupSum {
    fn add(&mut self, term: DiceTerm) {
        match term.amount {
            TermAmount::Number(n) => {
                *self.numeric.entry((term.sides, term.multiplier)).or_insert(0.0) += n;
            }
            TermAmount::Text(text) => self.text.push(text),
        }
    }

    fn is_flat(&self) -> bool {
        self.text.is_empty() && self.numeric.keys().all(|(sides, _)| *sides == 0)
    }

    /// This group's value: a number when it holds only flat numbers,
    /// otherwise dice highest-sides first, then flat, then text.
    fn render(&self) -> Value {
        if self.is_flat() {
            return Value::Number(self.numeric.values().sum());
        }
        let mut parts = Vec::new();
        for (&(sides, multiplier), &amount) in self.numeric.iter().rev() {
            if amount == 0.0 {
                continue;
            }
            let mut part = format_number(amount);
            if sides > 0 {
                part.push_str(&format!("d{sides}"));
            }
            if multiplier > 0 {
                part.push_str(&format!("x{multiplier}"));
            }
            parts.push(part);
        }
        parts.extend(self.text.iter().cloned());
        if parts.is_empty() {
            return Value::Number(0.0);
        }
        Value::String(join_signed(&parts))
    }
}

/// Join parts with `" + "`, or `" - "` before a part carrying a leading minus.
fn join_signed(parts: &[String]) -> String {
    let mut out = String::new();
    for (index, part) in parts.iter().enumerate() {
        if index == 0 {
            out.push_str(part);
        } else if let Some(negated) = part.strip_prefix('-') {
            out.push_str(" - ");
            out.push_str(negated);
        } else {
            out.push_str(" + ");
            out.push_str(part);
        }
    }
    out
}

fn sum_terms(terms: impl IntoIterator<Item = DiceTerm>) -> Vec<GroupSum> {
    let mut groups: Vec<GroupSum> = Vec::new();
    for term in terms {
        let index = match groups.iter().position(|group| group.name == term.group) {
            Some(index) => index,
            None => {
                groups.push(GroupSum {
                    name: term.group.clone(),
                    ..GroupSum::default()
                });
                groups.len() - 1
            }
        };
        groups[index].add(term);
    }
    groups
}

/// Reassemble summed groups.
///
/// Without named groups the unnamed group's value is returned directly. With
/// any named group the result is a list with one entry per group (named
/// entries rendered as `"name:value"`), dropping zero entries when more than
/// one remains.
fn assemble(groups: &[GroupSum]) -> Value {
    if groups.iter().all(|group| group.name.is_none()) {
        return groups.first().map_or(Value::Number(0.0), GroupSum::render);
    }
    let mut entries: Vec<Value> = groups
        .iter()
        .map(|group| match &group.name {
            Some(name) => Value::String(format!("{name}:{}", group.render())),
            None => group.render(),
        })
        .collect();
    if entries.len() > 1 {
        entries.retain(|entry| !entry.is_zero());
    }
    Value::List(entries)
}

/// Add two values structurally.
///
/// Same-sided dice merge and different sides stay apart; named groups
/// (`ammo:100`) accumulate independently.
///
/// ```
/// use swse::reduce::add_values;
///
/// let sum = add_values(&"1d6+2d8+1d10".into(), &"2d6 +1".into());
/// assert_eq!(sum.to_string(), "1d10 + 2d8 + 3d6 + 1");
/// ```
pub fn add_values(a: &Value, b: &Value) -> Value {
    let mut terms = decompose(a);
    terms.extend(decompose(b));
    assemble(&sum_terms(terms))
}

/// Scale every numeric term of `value` by `multiplier`.
///
/// Values with no numeric terms are returned unchanged.
pub fn multiply_values(value: &Value, multiplier: i64) -> Value {
    let terms = decompose(value);
    if !terms
        .iter()
        .any(|term| matches!(term.amount, TermAmount::Number(_)))
    {
        return value.clone();
    }
    let factor = multiplier as f64;
    let scaled = terms.into_iter().map(|mut term| {
        if let TermAmount::Number(n) = term.amount {
            term.amount = TermAmount::Number(n * factor);
        }
        term
    });
    assemble(&sum_terms(scaled))
}

/// The integer a MULTIPLY contribution scales by, truncating fractions.
pub fn multiplier_of(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) if n.is_finite() => Some(n.trunc() as i64),
        Value::String(text) => integer_prefix(text),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

/// Keep whichever of `current` and `candidate` is larger by term size.
///
/// Ties keep `current`; an unsizable value yields `candidate`.
pub fn upgrade(current: &Value, candidate: &Value) -> Value {
    let (a, b) = (value_terms_size(current), value_terms_size(candidate));
    if a >= b {
        current.clone()
    } else {
        candidate.clone()
    }
}

/// Keep whichever of `current` and `candidate` is smaller by term size.
///
/// Ties keep `current`; an unsizable value yields `candidate`.
pub fn downgrade(current: &Value, candidate: &Value) -> Value {
    let (a, b) = (value_terms_size(current), value_terms_size(candidate));
    if a <= b {
        current.clone()
    } else {
        candidate.clone()
    }
}

fn value_terms_size(value: &Value) -> f64 {
    terms_size(&decompose(value))
}
