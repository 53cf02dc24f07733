//! Small rules helpers: weights, die ladders, bonus strings and title casing.

use unicode_segmentation::UnicodeSegmentation;

use crate::interpreter::{VariableContext, evaluate_str};
use crate::types::{Value, as_arithmetic, to_number};

/// Die sides in increasing order. `"1"` stands for a flat 1.
pub const DIE_TYPES: &[&str] = &["1", "2", "3", "4", "6", "8", "10", "12"];

/// Damage dice in increasing order of size.
pub const DIE_SIZES: &[&str] = &[
    "1", "1d2", "1d3", "1d4", "1d6", "1d8", "2d6", "2d8", "3d6", "3d8", "4d6", "4d8", "6d6", "6d8",
    "8d6", "8d8", "12d6", "12d8", "16d6", "16d8",
];

/// Resolve an item weight in kilograms.
///
/// Weights are free text such as `"5 kg"`, `"2 Tons"` or
/// `"(40 x Cost Factor) kg"`. A trailing `ton` multiplies by 1000; the
/// result is multiplied by `quantity`. `None` when the weight does not
/// evaluate to a number.
///
/// ```
/// use swse::interpreter::NoVariables;
/// use swse::rules::resolve_weight;
///
/// assert_eq!(resolve_weight(&"5 Ton".into(), 1.0, 5.0, &NoVariables), Some(5000.0));
/// assert_eq!(
///     resolve_weight(&"(40 x Cost Factor) kg".into(), 1.0, 5.0, &NoVariables),
///     Some(200.0)
/// );
/// ```
pub fn resolve_weight(
    weight: &Value,
    quantity: f64,
    cost_factor: f64,
    variables: &dyn VariableContext,
) -> Option<f64> {
    let mut text = weight.to_string().to_lowercase();
    let unit_multiplier = if text.ends_with(" ton") || text.ends_with(" tons") {
        1000.0
    } else {
        1.0
    };
    if text.contains("cost factor") {
        text = text
            .replacen("cost factor", &Value::Number(cost_factor).to_string(), 1)
            .replacen(" x ", " * ", 1);
        for unit in [" kgs", " kg", " kilograms", " kilogram", " tons", " ton"] {
            if text.contains(unit) {
                text = text.replacen(unit, "", 1);
                break;
            }
        }
    }
    let resolved = evaluate_str(&text, variables);
    let numeric = as_arithmetic(&resolved).or_else(|| to_number(&resolved).as_number())?;
    Some(numeric * unit_multiplier * quantity)
}

/// Step a die along [`DIE_TYPES`] by `bonus` steps, keeping the quantity.
///
/// `"1d6"` stepped once is `"1d8"`. Dice off the ladder, or stepped past
/// either end, give `"0"`.
pub fn increase_die_type(die: &str, bonus: i64) -> String {
    let die = die.trim();
    let (quantity, size) = if die == "1" {
        ("1", "1")
    } else {
        match die.split_once('d') {
            Some((quantity, size)) => (quantity.trim(), size.trim()),
            None => return "0".to_string(),
        }
    };
    let Some(stepped) = step(DIE_TYPES, size, bonus) else {
        return "0".to_string();
    };
    if stepped == "1" {
        quantity.to_string()
    } else {
        format!("{quantity}d{stepped}")
    }
}

/// Step a damage die along [`DIE_SIZES`] by `bonus` steps.
///
/// ```
/// use swse::rules::increase_die_size;
///
/// assert_eq!(increase_die_size("1d8", 1), "2d6");
/// assert_eq!(increase_die_size("1d7", 1), "0");
/// ```
pub fn increase_die_size(die: &str, bonus: i64) -> String {
    step(DIE_SIZES, die.trim(), bonus).unwrap_or("0").to_string()
}

fn step(ladder: &'static [&'static str], current: &str, bonus: i64) -> Option<&'static str> {
    let index = ladder.iter().position(|rung| *rung == current)?;
    let target = i64::try_from(index).ok()?.checked_add(bonus)?;
    ladder.get(usize::try_from(target).ok()?).copied()
}

/// Render a bonus with an explicit sign: `"+2"`, `"-1"`, or `""` for zero.
pub fn bonus_string(bonus: &Value) -> String {
    let text = bonus.to_string();
    if text.is_empty() || text == "0" {
        String::new()
    } else if text.starts_with('-') || text.starts_with('+') {
        text
    } else {
        format!("+{text}")
    }
}

/// Title-case space separated words: the first character of each word
/// upper-cased, the rest lower-cased. Runs of spaces collapse.
///
/// ```
/// use swse::rules::title_case;
///
/// assert_eq!(title_case("use the FORCE"), "Use The Force");
/// ```
pub fn title_case(text: &str) -> String {
    let lower = text.to_lowercase();
    let words: Vec<String> = lower
        .split(' ')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut graphemes = word.graphemes(true);
            match graphemes.next() {
                Some(first) => format!("{}{}", first.to_uppercase(), graphemes.as_str()),
                None => String::new(),
            }
        })
        .collect();
    words.join(" ")
}
