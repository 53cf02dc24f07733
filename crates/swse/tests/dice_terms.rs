//! Integration tests for dice term decomposition and sizing.

use swse::Value;
use swse::types::{DiceMatch, DiceTerm, TermAmount, decompose, find_dice, terms_size, value_size};

fn grouped(mut term: DiceTerm, group: &str) -> DiceTerm {
    term.group = Some(group.to_string());
    term
}

// =============================================================================
// find_dice
// =============================================================================

#[test]
fn finds_plain_dice() {
    assert_eq!(
        find_dice("3d6"),
        Some(DiceMatch {
            count: 3,
            sides: 6,
            multiplier: None
        })
    );
}

#[test]
fn finds_dice_with_multiplier() {
    assert_eq!(
        find_dice("7d10x2"),
        Some(DiceMatch {
            count: 7,
            sides: 10,
            multiplier: Some(2)
        })
    );
}

#[test]
fn finds_leftmost_dice_inside_text() {
    let found = find_dice("deals 2d8 then 1d4").unwrap();
    assert_eq!((found.count, found.sides), (2, 8));
}

#[test]
fn no_dice_in_plain_text() {
    assert_eq!(find_dice("Dodge"), None);
    assert_eq!(find_dice("d6"), None);
    assert_eq!(find_dice("3d"), None);
}

// =============================================================================
// decompose
// =============================================================================

#[test]
fn numbers_and_booleans_are_flat() {
    assert_eq!(decompose(&Value::Number(4.0)), vec![DiceTerm::flat(4.0)]);
    assert_eq!(decompose(&Value::Bool(true)), vec![DiceTerm::flat(1.0)]);
    assert!(decompose(&Value::Empty).is_empty());
}

#[test]
fn subtraction_negates_the_next_term() {
    assert_eq!(
        decompose(&"1d8 - 1d4 + 3".into()),
        vec![DiceTerm::dice(1.0, 8), DiceTerm::dice(-1.0, 4), DiceTerm::flat(3.0)]
    );
}

#[test]
fn text_terms_keep_their_sign() {
    assert_eq!(
        decompose(&"5 - @WISMOD".into()),
        vec![DiceTerm::flat(5.0), DiceTerm::text("-@WISMOD")]
    );
}

#[test]
fn words_are_not_split_on_spaces() {
    assert_eq!(decompose(&"HELLO WORLD".into()), vec![DiceTerm::text("HELLO WORLD")]);
}

#[test]
fn group_prefix_tags_terms() {
    assert_eq!(
        decompose(&"ammo:100".into()),
        vec![grouped(DiceTerm::flat(100.0), "ammo")]
    );
}

#[test]
fn lists_flatten() {
    let list = Value::List(vec!["1d6".into(), Value::Number(2.0)]);
    assert_eq!(decompose(&list), vec![DiceTerm::dice(1.0, 6), DiceTerm::flat(2.0)]);
}

#[test]
fn variable_terms_are_recognised() {
    let terms = decompose(&"@STRMOD".into());
    assert!(terms[0].amount.is_variable());
    assert!(TermAmount::Text("-@DEXMOD".to_string()).is_variable());
    assert!(!TermAmount::Text("Dodge".to_string()).is_variable());
}

// =============================================================================
// Sizes
// =============================================================================

#[test]
fn terms_size_counts_faces() {
    assert_eq!(terms_size(&decompose(&"2d6 + 3".into())), 15.0);
    assert!(terms_size(&decompose(&"1d6 + @STRMOD".into())).is_nan());
}

#[test]
fn value_size_of_dice_is_quantity_times_sides() {
    assert_eq!(value_size(&"2d8".into()), 16.0);
    assert_eq!(value_size(&Value::Number(9.0)), 9.0);
    assert_eq!(value_size(&"12 kg".into()), 12.0);
    assert!(value_size(&"Dodge".into()).is_nan());
}
