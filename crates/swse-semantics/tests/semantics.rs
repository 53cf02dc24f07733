use std::collections::HashSet;

use swse_semantics::{
    ModeId, OptionKindId, StrategyId, accepted_strategy_tags, mode_from_code, mode_from_name,
    option_kind_keys, resolve_option_kind, resolve_strategy,
};

#[test]
fn strategy_resolution_is_case_insensitive() {
    assert_eq!(resolve_strategy("sum"), Some(StrategyId::Sum));
    assert_eq!(resolve_strategy("Values"), Some(StrategyId::Values));
    assert_eq!(
        resolve_strategy(" values_to_lowercase "),
        Some(StrategyId::ValuesToLowercase)
    );
    assert_eq!(resolve_strategy("SUMM"), None);
}

#[test]
fn expression_is_an_alias_of_sum() {
    assert_eq!(resolve_strategy("EXPRESSION"), Some(StrategyId::Sum));
    assert_eq!(StrategyId::Sum.tag(), "SUM");
}

#[test]
fn every_accepted_tag_resolves() {
    for tag in accepted_strategy_tags() {
        assert!(resolve_strategy(tag).is_some(), "tag {tag} did not resolve");
    }
}

#[test]
fn canonical_tags_round_trip() {
    let ids = [
        StrategyId::Sum,
        StrategyId::And,
        StrategyId::Or,
        StrategyId::Max,
        StrategyId::Min,
        StrategyId::First,
        StrategyId::Values,
        StrategyId::ValuesToLowercase,
        StrategyId::Unique,
        StrategyId::NumericValues,
        StrategyId::Summary,
        StrategyId::Mapped,
    ];
    for id in ids {
        assert_eq!(resolve_strategy(id.tag()), Some(id));
    }
}

#[test]
fn mode_codes_match_host_constants() {
    assert_eq!(mode_from_code(0), Some(ModeId::Custom));
    assert_eq!(mode_from_code(1), Some(ModeId::Multiply));
    assert_eq!(mode_from_code(2), Some(ModeId::Add));
    assert_eq!(mode_from_code(3), Some(ModeId::Downgrade));
    assert_eq!(mode_from_code(4), Some(ModeId::Upgrade));
    assert_eq!(mode_from_code(5), Some(ModeId::Override));
    assert_eq!(mode_from_code(6), Some(ModeId::PostMultiply));
    assert_eq!(mode_from_code(7), None);
    assert_eq!(mode_from_code(-1), None);
}

#[test]
fn mode_names_resolve_with_alias() {
    assert_eq!(mode_from_name("override"), Some(ModeId::Override));
    assert_eq!(
        mode_from_name("POST_ROLL_MULTIPLY"),
        Some(ModeId::PostMultiply)
    );
    assert_eq!(mode_from_name("sideways"), None);
    assert_eq!(mode_from_name(ModeId::Upgrade.name()), Some(ModeId::Upgrade));
    assert_eq!(ModeId::PostMultiply.code(), 6);
}

#[test]
fn derived_option_rules_carry_joins() {
    let Some(OptionKindId::Derived(rule)) =
        resolve_option_kind("AVAILABLE_GREATER_WEAPON_SPECIALIZATION")
    else {
        panic!("expected a derived rule");
    };
    assert_eq!(rule.exclude, &["greaterWeaponSpecialization"]);
    assert_eq!(rule.include, &["greaterWeaponFocus", "weaponSpecialization"]);

    let Some(OptionKindId::Derived(mastery)) = resolve_option_kind("AVAILABLE_SKILL_MASTERY")
    else {
        panic!("expected a derived rule");
    };
    assert_eq!(mastery.extra_excluded, &["Use The Force"]);
}

#[test]
fn literal_option_names_are_not_kinds() {
    assert_eq!(resolve_option_kind("Pistols"), None);
    assert_eq!(
        resolve_option_kind("AVAILABLE_LIGHTSABER_FORMS"),
        Some(OptionKindId::LightsaberForms)
    );
}

#[test]
fn option_kind_keys_are_unique_and_resolvable() {
    let keys: Vec<_> = option_kind_keys().collect();
    let unique: HashSet<_> = keys.iter().collect();
    assert_eq!(keys.len(), unique.len());
    for key in keys {
        assert!(resolve_option_kind(key).is_some(), "key {key} did not resolve");
    }
}
