//! Integration tests for loading sheets.

use std::fs;

use swse::choice::{
    Choice, ChoiceContext, ChoiceItem, ChoiceOption, PromptRequest, PromptResponse, activate_choices,
};
use swse::interpreter::{LoadError, evaluate_str};
use swse::reduce::{PriorityOrder, ReduceOptions, ReduceSpec};
use swse::{AttributeSheet, Value};

const SHEET: &str = r#"{
    "variables": { "@STRMOD": 2, "@LEVEL": 4 },
    "attributes": {
        "damage": [
            { "value": "1d8", "source": "Blaster Pistol" },
            { "value": "@STRMOD", "sourceString": "Strength" }
        ],
        "speed": [
            { "value": 6 },
            { "value": 4, "mode": "OVERRIDE", "priority": 2 }
        ],
        "weaponProficiency": [
            { "value": "Pistols" },
            { "value": "Rifles" }
        ]
    },
    "catalog": { "exoticWeapons": ["Bowcaster"] }
}"#;

#[test]
fn load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sheet.json");
    fs::write(&path, SHEET).unwrap();

    let sheet = AttributeSheet::load(&path).unwrap();
    assert_eq!(sheet.variables.len(), 2);
    assert_eq!(sheet.attributes["damage"][1].source.as_deref(), Some("Strength"));
    assert_eq!(sheet.catalog.exotic_weapons, vec!["Bowcaster".to_string()]);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");
    let error = AttributeSheet::load(&path).unwrap_err();
    assert!(matches!(error, LoadError::Io { .. }));
    assert!(error.to_string().starts_with("failed to read"));
}

#[test]
fn invalid_json_reports_its_position() {
    let error = AttributeSheet::from_json_str("{\n  \"variables\": [").unwrap_err();
    let LoadError::Json { source } = &error else {
        panic!("expected a JSON error, got {error:?}");
    };
    assert_eq!(source.line(), 2);
    assert!(error.to_string().starts_with("invalid sheet at line 2"));
}

#[test]
fn sheet_resolves_variables() {
    let sheet = AttributeSheet::from_json_str(SHEET).unwrap();
    assert_eq!(evaluate_str("@LEVEL/2+@STRMOD", &sheet), Value::Number(4.0));
}

#[test]
fn sheet_reduces_attributes() {
    let sheet = AttributeSheet::from_json_str(SHEET).unwrap();
    let options = ReduceOptions::default();
    assert_eq!(
        sheet.attribute("damage", &ReduceSpec::parse("SUM"), &options),
        Value::from("1d8 + 2")
    );
    assert_eq!(
        sheet.attribute("speed", &ReduceSpec::parse("SUM"), &options),
        Value::Number(4.0)
    );
    assert_eq!(
        sheet.attribute("missing", &ReduceSpec::parse("SUM"), &options),
        Value::Number(0.0)
    );
}

#[test]
fn priority_order_option_reaches_the_sheet() {
    let sheet = AttributeSheet::from_json_str(
        r#"{ "attributes": { "bonus": [
            { "value": 2, "mode": "MULTIPLY", "priority": 10 },
            { "value": 5, "priority": 9 }
        ] } }"#,
    )
    .unwrap();
    let numeric = ReduceOptions::builder()
        .priority_order(PriorityOrder::Numeric)
        .build();
    assert_eq!(
        sheet.attribute("bonus", &ReduceSpec::parse("SUM"), &numeric),
        Value::Number(10.0)
    );
}

#[test]
fn sheet_drives_choice_options() {
    let sheet = AttributeSheet::from_json_str(SHEET).unwrap();
    let item = ChoiceItem::builder()
        .name("Weapon Focus")
        .choices(vec![Choice::builder()
            .description("Select a weapon")
            .options(vec![ChoiceOption::named("AVAILABLE_WEAPON_FOCUS")])
            .build()])
        .build();
    let context = ChoiceContext::builder()
        .item_answers(vec!["Rifles".to_string()])
        .build();
    let mut prompt = |_: &PromptRequest| PromptResponse::Cancelled;
    let outcome = activate_choices(&item, &context, &sheet.environment(), &mut prompt);
    assert!(outcome.success);
    assert_eq!(outcome.resolution.payload("payload"), Some("Rifles"));
}
