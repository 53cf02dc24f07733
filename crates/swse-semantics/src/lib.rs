//! Shared SWSE rules name tables used by both the core engine and the CLI.
//!
//! This crate centralizes reduce-strategy tags, application-mode names and
//! codes, and choice-option keys so that data loading, evaluation and tooling
//! agree on spelling and aliases.

/// Canonical reduce-strategy identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StrategyId {
    Sum,
    And,
    Or,
    Max,
    Min,
    First,
    Values,
    ValuesToLowercase,
    Unique,
    NumericValues,
    Summary,
    Mapped,
}

impl StrategyId {
    /// The canonical upper-case tag for this strategy.
    pub fn tag(self) -> &'static str {
        match self {
            StrategyId::Sum => "SUM",
            StrategyId::And => "AND",
            StrategyId::Or => "OR",
            StrategyId::Max => "MAX",
            StrategyId::Min => "MIN",
            StrategyId::First => "FIRST",
            StrategyId::Values => "VALUES",
            StrategyId::ValuesToLowercase => "VALUES_TO_LOWERCASE",
            StrategyId::Unique => "UNIQUE",
            StrategyId::NumericValues => "NUMERIC_VALUES",
            StrategyId::Summary => "SUMMARY",
            StrategyId::Mapped => "MAPPED",
        }
    }
}

/// Resolve a reduce tag to a canonical strategy.
///
/// Matching is case-insensitive. `EXPRESSION` is an alias of `SUM`.
pub fn resolve_strategy(tag: &str) -> Option<StrategyId> {
    let upper = tag.trim().to_ascii_uppercase();
    match upper.as_str() {
        "SUM" | "EXPRESSION" => Some(StrategyId::Sum),
        "AND" => Some(StrategyId::And),
        "OR" => Some(StrategyId::Or),
        "MAX" => Some(StrategyId::Max),
        "MIN" => Some(StrategyId::Min),
        "FIRST" => Some(StrategyId::First),
        "VALUES" => Some(StrategyId::Values),
        "VALUES_TO_LOWERCASE" => Some(StrategyId::ValuesToLowercase),
        "UNIQUE" => Some(StrategyId::Unique),
        "NUMERIC_VALUES" => Some(StrategyId::NumericValues),
        "SUMMARY" => Some(StrategyId::Summary),
        "MAPPED" => Some(StrategyId::Mapped),
        _ => None,
    }
}

/// Accepted reduce tags, including aliases.
///
/// Used for diagnostics and typo suggestions.
pub fn accepted_strategy_tags() -> &'static [&'static str] {
    STRATEGY_TAGS
}

const STRATEGY_TAGS: &[&str] = &[
    "SUM",
    "EXPRESSION",
    "AND",
    "OR",
    "MAX",
    "MIN",
    "FIRST",
    "VALUES",
    "VALUES_TO_LOWERCASE",
    "UNIQUE",
    "NUMERIC_VALUES",
    "SUMMARY",
    "MAPPED",
];

/// Canonical application-mode identifiers, carrying the host's numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeId {
    Custom,
    Multiply,
    Add,
    Downgrade,
    Upgrade,
    Override,
    PostMultiply,
}

impl ModeId {
    /// The host's numeric code for this mode.
    pub fn code(self) -> u8 {
        match self {
            ModeId::Custom => 0,
            ModeId::Multiply => 1,
            ModeId::Add => 2,
            ModeId::Downgrade => 3,
            ModeId::Upgrade => 4,
            ModeId::Override => 5,
            ModeId::PostMultiply => 6,
        }
    }

    /// The canonical upper-case name for this mode.
    pub fn name(self) -> &'static str {
        match self {
            ModeId::Custom => "CUSTOM",
            ModeId::Multiply => "MULTIPLY",
            ModeId::Add => "ADD",
            ModeId::Downgrade => "DOWNGRADE",
            ModeId::Upgrade => "UPGRADE",
            ModeId::Override => "OVERRIDE",
            ModeId::PostMultiply => "POST_MULTIPLY",
        }
    }
}

/// Resolve a host mode code.
pub fn mode_from_code(code: i64) -> Option<ModeId> {
    match code {
        0 => Some(ModeId::Custom),
        1 => Some(ModeId::Multiply),
        2 => Some(ModeId::Add),
        3 => Some(ModeId::Downgrade),
        4 => Some(ModeId::Upgrade),
        5 => Some(ModeId::Override),
        6 => Some(ModeId::PostMultiply),
        _ => None,
    }
}

/// Resolve a mode name, case-insensitively.
///
/// `POST_ROLL_MULTIPLY` is accepted as an alias of `POST_MULTIPLY`.
pub fn mode_from_name(name: &str) -> Option<ModeId> {
    let upper = name.trim().to_ascii_uppercase();
    match upper.as_str() {
        "CUSTOM" => Some(ModeId::Custom),
        "MULTIPLY" => Some(ModeId::Multiply),
        "ADD" => Some(ModeId::Add),
        "DOWNGRADE" => Some(ModeId::Downgrade),
        "UPGRADE" => Some(ModeId::Upgrade),
        "OVERRIDE" => Some(ModeId::Override),
        "POST_MULTIPLY" | "POST_ROLL_MULTIPLY" => Some(ModeId::PostMultiply),
        _ => None,
    }
}

/// A choice option generated from the character's existing attributes.
///
/// Candidates are the inner join of the `include` attributes' values; any
/// candidate found in the full join of the `exclude` attributes' values, or in
/// `extra_excluded`, is dropped.
#[derive(Debug, PartialEq, Eq)]
pub struct DerivedOptionRule {
    pub key: &'static str,
    pub exclude: &'static [&'static str],
    pub include: &'static [&'static str],
    pub extra_excluded: &'static [&'static str],
}

/// Canonical identifiers for option keys that expand into generated options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKindId {
    GmBonuses,
    ExoticWeaponProficiency,
    WeaponProficiencies,
    UnfocusedSkills,
    SkillFocus,
    UntrainedSkills,
    LightsaberForms,
    Derived(&'static DerivedOptionRule),
}

/// Weapon groups offered by `AVAILABLE_WEAPON_PROFICIENCIES`.
pub const WEAPON_GROUPS: &[&str] = &[
    "Simple Weapons",
    "Pistols",
    "Rifles",
    "Lightsabers",
    "Heavy Weapons",
    "Advanced Melee Weapons",
];

/// Resolve a choice-option key to the kind of options it expands into.
///
/// Returns `None` for ordinary literal options.
pub fn resolve_option_kind(key: &str) -> Option<OptionKindId> {
    match key {
        "AVAILABLE_GM_BONUSES" => Some(OptionKindId::GmBonuses),
        "AVAILABLE_EXOTIC_WEAPON_PROFICIENCY" => Some(OptionKindId::ExoticWeaponProficiency),
        "AVAILABLE_WEAPON_PROFICIENCIES" => Some(OptionKindId::WeaponProficiencies),
        "UNFOCUSED_SKILLS" => Some(OptionKindId::UnfocusedSkills),
        "AVAILABLE_SKILL_FOCUS" => Some(OptionKindId::SkillFocus),
        "AVAILABLE_UNTRAINED_SKILLS" => Some(OptionKindId::UntrainedSkills),
        "AVAILABLE_LIGHTSABER_FORMS" => Some(OptionKindId::LightsaberForms),
        other => DERIVED_OPTION_RULES
            .iter()
            .find(|rule| rule.key == other)
            .map(OptionKindId::Derived),
    }
}

/// All keys that expand into generated options.
pub fn option_kind_keys() -> impl Iterator<Item = &'static str> {
    CATALOG_OPTION_KEYS
        .iter()
        .copied()
        .chain(DERIVED_OPTION_RULES.iter().map(|rule| rule.key))
}

const CATALOG_OPTION_KEYS: &[&str] = &[
    "AVAILABLE_GM_BONUSES",
    "AVAILABLE_EXOTIC_WEAPON_PROFICIENCY",
    "AVAILABLE_WEAPON_PROFICIENCIES",
    "UNFOCUSED_SKILLS",
    "AVAILABLE_SKILL_FOCUS",
    "AVAILABLE_UNTRAINED_SKILLS",
    "AVAILABLE_LIGHTSABER_FORMS",
];

const fn derived(
    key: &'static str,
    exclude: &'static [&'static str],
    include: &'static [&'static str],
) -> DerivedOptionRule {
    DerivedOptionRule {
        key,
        exclude,
        include,
        extra_excluded: &[],
    }
}

const DERIVED_OPTION_RULES: &[DerivedOptionRule] = &[
    derived("AVAILABLE_WEAPON_FOCUS", &["weaponFocus"], &["weaponProficiency"]),
    derived(
        "AVAILABLE_WEAPON_SPECIALIZATION",
        &["weaponSpecialization"],
        &["weaponFocus"],
    ),
    derived(
        "AVAILABLE_GREATER_WEAPON_SPECIALIZATION",
        &["greaterWeaponSpecialization"],
        &["greaterWeaponFocus", "weaponSpecialization"],
    ),
    derived(
        "AVAILABLE_DISARMING_ATTACK",
        &["disarmingAttack"],
        &["weaponSpecialization"],
    ),
    derived(
        "AVAILABLE_GREATER_WEAPON_FOCUS",
        &["greaterWeaponFocus"],
        &["weaponProficiency"],
    ),
    DerivedOptionRule {
        key: "AVAILABLE_SKILL_MASTERY",
        exclude: &["skillMastery"],
        include: &["skillFocus"],
        extra_excluded: &["Use The Force"],
    },
    derived(
        "AVAILABLE_DOUBLE_ATTACK",
        &["doubleAttack"],
        &["weaponProficiency"],
    ),
    derived(
        "AVAILABLE_DEVASTATING_ATTACK",
        &["devastatingAttack"],
        &["weaponProficiency"],
    ),
    derived(
        "AVAILABLE_GREATER_DEVASTATING_ATTACK",
        &["greaterDevastatingAttack"],
        &["devastatingAttack", "greaterWeaponFocus"],
    ),
    derived("AVAILABLE_TRIPLE_ATTACK", &["tripleAttack"], &["doubleAttack"]),
    derived("AVAILABLE_SAVAGE_ATTACK", &["savageAttack"], &["doubleAttack"]),
    derived(
        "AVAILABLE_RELENTLESS_ATTACK",
        &["relentlessAttack"],
        &["doubleAttack"],
    ),
    derived("AVAILABLE_AUTOFIRE_SWEEP", &["autofireSweep"], &["weaponFocus"]),
    derived(
        "AVAILABLE_AUTOFIRE_ASSAULT",
        &["autofireAssault"],
        &["weaponFocus"],
    ),
    derived("AVAILABLE_HALT", &["halt"], &["weaponFocus"]),
    derived(
        "AVAILABLE_PENETRATING_ATTACK",
        &["penetratingAttack"],
        &["weaponFocus"],
    ),
    derived("AVAILABLE_RETURN_FIRE", &["returnFire"], &["weaponFocus"]),
    derived(
        "AVAILABLE_CRITICAL_STRIKE",
        &["criticalStrike"],
        &["weaponFocus"],
    ),
];
