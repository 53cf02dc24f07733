use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::types::Value;
use crate::types::coerce::{numeric_prefix, to_number};
use crate::types::value::format_number;

/// The amount carried by a [`DiceTerm`]: a signed count (of dice or of flat
/// points) or opaque text that cannot be summed.
#[derive(Debug, Clone, PartialEq)]
pub enum TermAmount {
    Number(f64),
    Text(String),
}

impl TermAmount {
    /// Whether this amount is a variable reference such as `@WISMOD`.
    pub fn is_variable(&self) -> bool {
        matches!(self, TermAmount::Text(text) if text.trim_start_matches('-').starts_with('@'))
    }
}

impl Display for TermAmount {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            TermAmount::Number(n) => write!(f, "{}", format_number(*n)),
            TermAmount::Text(text) => write!(f, "{text}"),
        }
    }
}

/// One summand of a value.
///
/// A term with `sides == 0` is a flat number; otherwise `amount` dice of
/// `sides` sides. `multiplier` is the critical multiplier of `NdSxM` notation
/// (0 when absent). `group` tags terms belonging to a named sub-total such as
/// `ammo:100`.
#[derive(Debug, Clone, PartialEq)]
pub struct DiceTerm {
    pub amount: TermAmount,
    pub sides: u32,
    pub multiplier: u32,
    pub group: Option<String>,
}

impl DiceTerm {
    /// A flat numeric term.
    pub fn flat(n: f64) -> Self {
        Self {
            amount: TermAmount::Number(n),
            sides: 0,
            multiplier: 0,
            group: None,
        }
    }

    /// A term of `count` dice with `sides` sides.
    pub fn dice(count: f64, sides: u32) -> Self {
        Self {
            amount: TermAmount::Number(count),
            sides,
            multiplier: 0,
            group: None,
        }
    }

    /// An opaque text term.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            amount: TermAmount::Text(text.into()),
            sides: 0,
            multiplier: 0,
            group: None,
        }
    }
}

/// A dice literal found in text: `NdS` with an optional `xM` multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceMatch {
    pub count: u32,
    pub sides: u32,
    pub multiplier: Option<u32>,
}

/// Find the left-most dice literal (`\d+d\d+x?\d?`) anywhere in `text`.
pub fn find_dice(text: &str) -> Option<DiceMatch> {
    let bytes = text.as_bytes();
    let digit_run = |from: usize| {
        let mut end = from;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
        end
    };

    for start in 0..bytes.len() {
        let count_end = digit_run(start);
        if count_end == start || bytes.get(count_end) != Some(&b'd') {
            continue;
        }
        let sides_start = count_end + 1;
        let sides_end = digit_run(sides_start);
        if sides_end == sides_start {
            continue;
        }
        let multiplier = match (bytes.get(sides_end), bytes.get(sides_end + 1)) {
            (Some(b'x'), Some(digit)) if digit.is_ascii_digit() => Some(u32::from(digit - b'0')),
            _ => None,
        };
        let (Ok(count), Ok(sides)) = (
            text[start..count_end].parse(),
            text[sides_start..sides_end].parse(),
        ) else {
            continue;
        };
        return Some(DiceMatch {
            count,
            sides,
            multiplier,
        });
    }
    None
}

/// Split a value into its summands.
///
/// Text is split on `+` and `-`; a `-` negates the following term (text
/// terms keep it as a leading `-`). `group:payload` tokens tag the payload's terms with the group name.
/// Lists flatten, structured maps unwrap, and `Empty` has no terms.
///
/// ```
/// use swse::types::{DiceTerm, decompose};
///
/// let terms = decompose(&"2d6 + 1d8 - 2".into());
/// assert_eq!(
///     terms,
///     vec![DiceTerm::dice(2.0, 6), DiceTerm::dice(1.0, 8), DiceTerm::flat(-2.0)]
/// );
/// ```
pub fn decompose(value: &Value) -> Vec<DiceTerm> {
    match value {
        Value::Empty => Vec::new(),
        Value::List(items) => items.iter().flat_map(decompose).collect(),
        Value::Map(map) => map.get("value").map(decompose).unwrap_or_default(),
        Value::Bool(b) => vec![DiceTerm::flat(if *b { 1.0 } else { 0.0 })],
        Value::Number(n) => vec![DiceTerm::flat(*n)],
        Value::String(text) => decompose_text(text),
    }
}

fn decompose_text(text: &str) -> Vec<DiceTerm> {
    let mut terms = Vec::new();
    let mut sign = 1.0;
    let mut rest = text;
    loop {
        let end = rest.find(['+', '-']).unwrap_or(rest.len());
        let token = rest[..end].trim();
        if !token.is_empty() {
            push_token(token, sign, &mut terms);
            sign = 1.0;
        }
        match rest[end..].chars().next() {
            Some('-') => sign = -1.0,
            Some(_) => {}
            None => break,
        }
        rest = &rest[end + 1..];
    }
    terms
}

fn push_token(token: &str, sign: f64, terms: &mut Vec<DiceTerm>) {
    if let Some((group, payload)) = split_group(token) {
        for mut term in decompose_text(payload) {
            term.group = Some(group.to_string());
            terms.push(term);
        }
    } else if let Some(dice) = find_dice(token) {
        terms.push(DiceTerm {
            amount: TermAmount::Number(sign * f64::from(dice.count)),
            sides: dice.sides,
            multiplier: dice.multiplier.unwrap_or(0),
            group: None,
        });
    } else if let Some(n) = numeric_prefix(token) {
        terms.push(DiceTerm::flat(sign * n));
    } else if sign < 0.0 {
        terms.push(DiceTerm::text(format!("-{token}")));
    } else {
        terms.push(DiceTerm::text(token));
    }
}

/// Split `group:payload` at the last colon that has text on both sides.
fn split_group(token: &str) -> Option<(&str, &str)> {
    let index = token.rfind(':')?;
    let (group, payload) = (&token[..index], &token[index + 1..]);
    if group.is_empty() || payload.is_empty() {
        return None;
    }
    Some((group, payload))
}

/// The "size" of a set of terms: each amount times its sides (flat terms
/// count once). NaN when any term is text.
pub fn terms_size(terms: &[DiceTerm]) -> f64 {
    terms
        .iter()
        .map(|term| match &term.amount {
            TermAmount::Number(n) => n * f64::from(term.sides.max(1)),
            TermAmount::Text(_) => f64::NAN,
        })
        .sum()
}

/// The comparison size used by MAX and MIN reductions.
///
/// Text containing a `d` is read as `quantity d sides` and sized as their
/// product; everything else is sized by its numeric value. NaN when the value
/// does not read as a number.
pub fn value_size(value: &Value) -> f64 {
    if let Value::String(text) = value {
        if text.contains('d') {
            let mut parts = text.split('d');
            let quantity = parts.next().and_then(numeric_prefix);
            let sides = parts.next().and_then(numeric_prefix);
            return match (quantity, sides) {
                (Some(quantity), Some(sides)) => quantity * sides,
                _ => f64::NAN,
            };
        }
    }
    match to_number(value) {
        Value::Number(n) => n,
        _ => f64::NAN,
    }
}
