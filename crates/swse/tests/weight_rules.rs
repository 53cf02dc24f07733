//! Integration tests for weights, die ladders and text helpers.

use swse::interpreter::NoVariables;
use swse::rules::{bonus_string, increase_die_size, increase_die_type, resolve_weight, title_case};
use swse::Value;

fn weight(text: &str) -> Option<f64> {
    resolve_weight(&text.into(), 1.0, 1.0, &NoVariables)
}

// =============================================================================
// Weights
// =============================================================================

#[test]
fn plain_kilograms() {
    assert_eq!(weight("5"), Some(5.0));
    assert_eq!(weight("5 kg"), Some(5.0));
    assert_eq!(weight("5 KG"), Some(5.0));
    assert_eq!(weight("5 KiloGrams"), Some(5.0));
}

#[test]
fn tons_are_converted() {
    assert_eq!(weight("5 Ton"), Some(5000.0));
    assert_eq!(weight("2 tons"), Some(2000.0));
}

#[test]
fn numeric_weight_and_quantity() {
    let five = Value::Number(5.0);
    assert_eq!(resolve_weight(&five, 1.0, 1.0, &NoVariables), Some(5.0));
    assert_eq!(resolve_weight(&five, 3.0, 1.0, &NoVariables), Some(15.0));
    assert_eq!(resolve_weight(&five, 0.0, 1.0, &NoVariables), Some(0.0));
}

#[test]
fn cost_factor_weights() {
    assert_eq!(
        resolve_weight(&"(40 x Cost Factor) kg".into(), 1.0, 5.0, &NoVariables),
        Some(200.0)
    );
}

#[test]
fn weights_may_be_expressions() {
    assert_eq!(weight("2 * 3"), Some(6.0));
    assert_eq!(weight("1/2 kg"), Some(0.5));
}

#[test]
fn unreadable_weight_is_none() {
    assert_eq!(weight("-"), None);
    assert_eq!(weight("heavy"), None);
}

// =============================================================================
// Die ladders
// =============================================================================

#[test]
fn die_type_steps() {
    assert_eq!(increase_die_type("1d6", 1), "1d8");
    assert_eq!(increase_die_type("2d6", 2), "2d10");
    assert_eq!(increase_die_type("1d4", -1), "1d3");
    assert_eq!(increase_die_type("1", 1), "1d2");
}

#[test]
fn die_type_down_to_flat() {
    assert_eq!(increase_die_type("3d2", -1), "3");
}

#[test]
fn die_type_off_the_ladder() {
    assert_eq!(increase_die_type("1d12", 1), "0");
    assert_eq!(increase_die_type("1d7", 1), "0");
    assert_eq!(increase_die_type("Dodge", 1), "0");
}

#[test]
fn die_size_steps() {
    assert_eq!(increase_die_size("1d8", 1), "2d6");
    assert_eq!(increase_die_size("2d6", -2), "1d6");
    assert_eq!(increase_die_size("16d8", 1), "0");
    assert_eq!(increase_die_size("1d7", 1), "0");
}

// =============================================================================
// Text helpers
// =============================================================================

#[test]
fn bonus_strings() {
    assert_eq!(bonus_string(&Value::Number(2.0)), "+2");
    assert_eq!(bonus_string(&Value::Number(-1.0)), "-1");
    assert_eq!(bonus_string(&Value::Number(0.0)), "");
    assert_eq!(bonus_string(&Value::Empty), "");
    assert_eq!(bonus_string(&"+3".into()), "+3");
}

#[test]
fn title_case_words() {
    assert_eq!(title_case("use the FORCE"), "Use The Force");
    assert_eq!(title_case("  heavy   weapons "), "Heavy Weapons");
    assert_eq!(title_case(""), "");
}
