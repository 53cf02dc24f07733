//! Integration tests for expression evaluation.

use std::collections::BTreeMap;

use swse::interpreter::{
    EvalOptions, EvalWarning, NoVariables, evaluate, evaluate_str, evaluate_with_warnings,
    resolve_value_array,
};
use swse::{Value, variables};

fn eval(text: &str) -> Value {
    evaluate_str(text, &NoVariables)
}

// =============================================================================
// Arithmetic
// =============================================================================

#[test]
fn unary_signs() {
    assert_eq!(eval("+2"), Value::Number(2.0));
    assert_eq!(eval("-5"), Value::Number(-5.0));
    assert_eq!(eval("-5-5"), Value::Number(-10.0));
    assert_eq!(eval("-5--5"), Value::Number(0.0));
}

#[test]
fn additive_chain_is_left_associative() {
    assert_eq!(eval("1+2-3+5-4"), Value::Number(1.0));
    assert_eq!(eval("1+2-(3+5)-4"), Value::Number(-9.0));
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(eval("3*9"), Value::Number(27.0));
    assert_eq!(eval("3+4*9"), Value::Number(39.0));
    assert_eq!(eval("(3+4)*9"), Value::Number(63.0));
}

#[test]
fn negative_factors() {
    assert_eq!(eval("-3*8"), Value::Number(-24.0));
    assert_eq!(eval("3*-8"), Value::Number(-24.0));
}

#[test]
fn division_keeps_fractions() {
    assert_eq!(eval("7/2"), Value::Number(3.5));
}

#[test]
fn whitespace_around_operators() {
    assert_eq!(eval(" 1 + 2 * 3 "), Value::Number(7.0));
}

#[test]
fn blank_text_is_zero() {
    assert_eq!(eval(""), Value::Number(0.0));
    assert_eq!(eval("   "), Value::Number(0.0));
}

#[test]
fn empty_group_is_zero() {
    assert_eq!(eval("()"), Value::Number(0.0));
    assert_eq!(eval("()+4"), Value::Number(4.0));
}

// =============================================================================
// Functions
// =============================================================================

#[test]
fn max_and_min() {
    assert_eq!(eval("MAX(1,5)"), Value::Number(5.0));
    assert_eq!(eval("MIN(1,5)"), Value::Number(1.0));
}

#[test]
fn functions_inside_arithmetic() {
    assert_eq!(eval("MAX(1,5)+3"), Value::Number(8.0));
    assert_eq!(eval("MAX(1,MAX(2,5))+3"), Value::Number(8.0));
}

#[test]
fn function_arguments_may_be_expressions() {
    assert_eq!(eval("MIN(2+2, 10/2)"), Value::Number(4.0));
}

#[test]
fn max_with_text_argument_renders_call() {
    assert_eq!(eval("MAX(1,1d6)"), Value::from("MAX(1, 1d6)"));
}

#[test]
fn unknown_function_substitutes_its_argument() {
    assert_eq!(eval("x(1+1)"), Value::from("x2"));
    assert_eq!(eval("FOO(1+2)"), Value::from("FOO3"));
    assert_eq!(eval("max(1,5)"), Value::from("max1"));
}

// =============================================================================
// Dice and text
// =============================================================================

#[test]
fn dice_survive_addition() {
    assert_eq!(eval("3d6+3"), Value::from("3d6 + 3"));
    assert_eq!(eval("1d8 - 1"), Value::from("1d8 - 1"));
}

#[test]
fn leading_number_is_read_from_text() {
    assert_eq!(eval("5 kg"), Value::Number(5.0));
    assert_eq!(eval("2.5 kg"), Value::Number(2.5));
}

#[test]
fn text_with_spaces_stays_one_atom() {
    assert_eq!(eval("Use the Force"), Value::from("Use the Force"));
}

#[test]
fn comparisons() {
    assert_eq!(eval("5>3"), Value::Bool(true));
    assert_eq!(eval("5<3"), Value::Bool(false));
    assert_eq!(eval("2+2=4"), Value::Bool(true));
    assert_eq!(eval("b>a"), Value::Bool(true));
    assert_eq!(eval("1d6>3"), Value::Bool(false));
}

#[test]
fn unclosed_parenthesis_evaluates_to_empty() {
    assert_eq!(eval("(1+2"), Value::Empty);
    assert_eq!(eval("1)+(2"), Value::Empty);
}

#[test]
fn stray_close_parenthesis_is_kept_as_text() {
    assert_eq!(eval("(3))"), Value::from("(3))"));
}

#[test]
fn deep_nesting_is_kept_as_text() {
    let nested = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
    let (value, warnings) =
        evaluate_with_warnings(&nested.as_str().into(), &NoVariables, &EvalOptions::default());
    assert_eq!(value, Value::String(nested.clone()));
    assert!(matches!(
        warnings.as_slice(),
        [EvalWarning::MalformedExpression { .. }]
    ));

    let signs = format!("{}5", "-".repeat(20_000));
    assert_eq!(eval(&signs), Value::String(signs.clone()));

    let shallow = format!("{}1{}", "(".repeat(60), ")".repeat(60));
    assert_eq!(eval(&shallow), Value::Number(1.0));
}

// =============================================================================
// Variables
// =============================================================================

#[test]
fn variables_resolve_recursively() {
    let vars = variables! {
        "@STRMOD" => 3,
        "@HALFLEVEL" => "@LEVEL/2",
        "@LEVEL" => 8,
    };
    assert_eq!(evaluate_str("@STRMOD+@HALFLEVEL", &vars), Value::Number(7.0));
}

#[test]
fn variable_holding_dice_is_kept_as_text() {
    let vars = variables! { "@WEAPON" => "1d8" };
    assert_eq!(evaluate_str("@WEAPON+2", &vars), Value::from("1d8 + 2"));
}

#[test]
fn btree_map_context_accepts_names_without_at() {
    let mut vars = BTreeMap::new();
    vars.insert("WISMOD".to_string(), Value::from(2));
    assert_eq!(evaluate_str("@WISMOD+1", &vars), Value::Number(3.0));
}

#[test]
fn unresolved_variable_stays_literal_and_warns() {
    let (value, warnings) =
        evaluate_with_warnings(&"@WISMOD+1".into(), &NoVariables, &EvalOptions::default());
    assert_eq!(value, Value::from("@WISMOD + 1"));
    assert_eq!(
        warnings,
        vec![EvalWarning::UnresolvedVariable {
            name: "@WISMOD".to_string()
        }]
    );
}

#[test]
fn cyclic_variables_are_reported() {
    let vars = variables! { "@A" => "@B+1", "@B" => "@A+1" };
    let (_, warnings) = evaluate_with_warnings(&"@A".into(), &vars, &EvalOptions::default());
    assert!(warnings.contains(&EvalWarning::CyclicReference {
        chain: vec!["@A".to_string(), "@B".to_string(), "@A".to_string()],
    }));
}

#[test]
fn depth_limit_stops_deep_chains() {
    let vars = variables! { "@A" => "@B", "@B" => "@C", "@C" => 1 };
    let options = EvalOptions::builder().max_depth(2).build();
    let (value, warnings) = evaluate_with_warnings(&"@A".into(), &vars, &options);
    assert_eq!(value, Value::from("@C"));
    assert_eq!(
        warnings,
        vec![EvalWarning::MaxDepthExceeded {
            expression: "@C".to_string()
        }]
    );
}

#[test]
fn non_numeric_multiplication_warns() {
    let (value, warnings) =
        evaluate_with_warnings(&"1d6*2".into(), &NoVariables, &EvalOptions::default());
    assert_eq!(value, Value::from("1d6 * 2"));
    assert_eq!(
        warnings,
        vec![EvalWarning::NonNumericOperand {
            operator: "*".to_string(),
            operand: "1d6".to_string(),
        }]
    );
}

// =============================================================================
// Non-text values
// =============================================================================

#[test]
fn numbers_and_booleans_pass_through() {
    assert_eq!(evaluate(&Value::Number(4.0), &NoVariables), Value::Number(4.0));
    assert_eq!(evaluate(&Value::Bool(true), &NoVariables), Value::Bool(true));
    assert_eq!(evaluate(&Value::Empty, &NoVariables), Value::Number(0.0));
}

#[test]
fn lists_evaluate_element_wise() {
    let list = Value::List(vec!["1+1".into(), "1d4+0".into()]);
    assert_eq!(
        evaluate(&list, &NoVariables),
        Value::List(vec![Value::Number(2.0), Value::from("1d4 + 0")])
    );
}

#[test]
fn structured_value_unwraps() {
    let mut map = BTreeMap::new();
    map.insert("value".to_string(), Value::from("2*3"));
    assert_eq!(evaluate(&Value::Map(map), &NoVariables), Value::Number(6.0));
}

// =============================================================================
// Value arrays
// =============================================================================

#[test]
fn value_array_scales_by_multipliers() {
    let values = vec![Value::from("2"), Value::from(4), Value::from("*2")];
    assert_eq!(resolve_value_array(&values, &NoVariables), Value::Number(12.0));
}

#[test]
fn value_array_with_single_signed_entry() {
    assert_eq!(resolve_value_array(&["+2".into()], &NoVariables), Value::Number(2.0));
}

#[test]
fn value_array_multiplies_and_divides() {
    let values = vec![
        Value::from("2"),
        Value::from(4),
        Value::from("*2"),
        Value::from("*4"),
        Value::from("/2"),
    ];
    assert_eq!(resolve_value_array(&values, &NoVariables), Value::Number(24.0));
}

#[test]
fn value_array_skips_falsy_entries() {
    let values = vec![Value::Empty, Value::from(""), Value::from(3)];
    assert_eq!(resolve_value_array(&values, &NoVariables), Value::Number(3.0));
}

#[test]
fn value_array_joins_text() {
    let values = vec![Value::from("1d6"), Value::from(2), Value::from("*2")];
    assert_eq!(
        resolve_value_array(&values, &NoVariables),
        Value::from("1d6 + 2 * 2")
    );
}
