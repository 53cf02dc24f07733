//! Expanding generated-option keys into concrete options.

use bon::Builder;
use serde::{Deserialize, Serialize};
use swse_semantics::{DerivedOptionRule, OptionKindId, WEAPON_GROUPS, resolve_option_kind};
use tracing::debug;

use crate::choice::model::ChoiceOption;
use crate::interpreter::VariableContext;
use crate::reduce::{AttributeSource, ReduceSpec, Strategy, inheritable_attribute};
use crate::rules::title_case;
use crate::types::{AttributeChange, Value};

/// A bonus a game master may hand out.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(on(String, into))]
pub struct GmBonus {
    /// Attribute the bonus changes.
    pub key: String,
    #[builder(into)]
    pub value: Value,
    /// Label shown to the player.
    pub display: String,
}

/// Game data the generated options are drawn from.
///
/// Every list defaults to empty, so a catalog only implements what it has.
pub trait OptionCatalog {
    fn gm_bonuses(&self) -> Vec<GmBonus> {
        Vec::new()
    }

    fn exotic_weapons(&self) -> Vec<String> {
        Vec::new()
    }

    /// Every skill in the game.
    fn skills(&self) -> Vec<String> {
        Vec::new()
    }

    /// Skills the character is trained in.
    fn trained_skills(&self) -> Vec<String> {
        Vec::new()
    }

    /// Skills the character is not trained in.
    fn untrained_skills(&self) -> Vec<String> {
        Vec::new()
    }

    fn lightsaber_forms(&self) -> Vec<String> {
        Vec::new()
    }

    /// Names of the character's talents.
    fn talents(&self) -> Vec<String> {
        Vec::new()
    }
}

/// A catalog with nothing in it.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyCatalog;

impl OptionCatalog for EmptyCatalog {}

/// A catalog held in memory, typically loaded alongside a sheet.
#[derive(Debug, Clone, Default, PartialEq, Builder, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StaticCatalog {
    #[builder(default)]
    pub gm_bonuses: Vec<GmBonus>,
    #[builder(default)]
    pub exotic_weapons: Vec<String>,
    #[builder(default)]
    pub skills: Vec<String>,
    #[builder(default)]
    pub trained_skills: Vec<String>,
    #[builder(default)]
    pub untrained_skills: Vec<String>,
    #[builder(default)]
    pub lightsaber_forms: Vec<String>,
    #[builder(default)]
    pub talents: Vec<String>,
}

impl OptionCatalog for StaticCatalog {
    fn gm_bonuses(&self) -> Vec<GmBonus> {
        self.gm_bonuses.clone()
    }

    fn exotic_weapons(&self) -> Vec<String> {
        self.exotic_weapons.clone()
    }

    fn skills(&self) -> Vec<String> {
        self.skills.clone()
    }

    fn trained_skills(&self) -> Vec<String> {
        self.trained_skills.clone()
    }

    fn untrained_skills(&self) -> Vec<String> {
        self.untrained_skills.clone()
    }

    fn lightsaber_forms(&self) -> Vec<String> {
        self.lightsaber_forms.clone()
    }

    fn talents(&self) -> Vec<String> {
        self.talents.clone()
    }
}

impl<T: OptionCatalog + ?Sized> OptionCatalog for &T {
    fn gm_bonuses(&self) -> Vec<GmBonus> {
        (**self).gm_bonuses()
    }

    fn exotic_weapons(&self) -> Vec<String> {
        (**self).exotic_weapons()
    }

    fn skills(&self) -> Vec<String> {
        (**self).skills()
    }

    fn trained_skills(&self) -> Vec<String> {
        (**self).trained_skills()
    }

    fn untrained_skills(&self) -> Vec<String> {
        (**self).untrained_skills()
    }

    fn lightsaber_forms(&self) -> Vec<String> {
        (**self).lightsaber_forms()
    }

    fn talents(&self) -> Vec<String> {
        (**self).talents()
    }
}

/// Replace generated-option keys with the options they stand for.
///
/// Options whose name is not a generated-option key pass through unchanged.
/// The input is never modified; generated options are fresh records.
pub fn explode_options(
    options: &[ChoiceOption],
    attributes: &dyn AttributeSource,
    variables: &dyn VariableContext,
    catalog: &dyn OptionCatalog,
) -> Vec<ChoiceOption> {
    let mut exploded = Vec::new();
    for option in options {
        let Some(kind) = resolve_option_kind(&option.name) else {
            exploded.push(option.clone());
            continue;
        };
        let generated = generate(kind, attributes, variables, catalog);
        debug!(key = %option.name, count = generated.len(), "generated choice options");
        exploded.extend(generated);
    }
    exploded
}

fn generate(
    kind: OptionKindId,
    attributes: &dyn AttributeSource,
    variables: &dyn VariableContext,
    catalog: &dyn OptionCatalog,
) -> Vec<ChoiceOption> {
    let values_of = |key: &str| attribute_values(attributes, key, Strategy::Values, variables);
    match kind {
        OptionKindId::GmBonuses => catalog
            .gm_bonuses()
            .into_iter()
            .map(|bonus| {
                let change = AttributeChange::builder()
                    .key(bonus.key)
                    .value(bonus.value)
                    .build();
                ChoiceOption::builder()
                    .name(bonus.display)
                    .attributes(vec![change])
                    .build()
            })
            .collect(),
        OptionKindId::ExoticWeaponProficiency => {
            let known = values_of("weaponProficiency");
            catalog
                .exotic_weapons()
                .into_iter()
                .filter(|weapon| !known.contains(weapon))
                .map(|weapon| payload_option(weapon.clone(), weapon))
                .collect()
        }
        OptionKindId::WeaponProficiencies => {
            let known = values_of("weaponProficiency");
            WEAPON_GROUPS
                .iter()
                .filter(|group| !known.iter().any(|weapon| weapon == *group))
                .map(|group| titled_option(group))
                .collect()
        }
        OptionKindId::UnfocusedSkills => {
            let focused = values_of("skillFocus");
            catalog
                .skills()
                .iter()
                .filter(|skill| !focused.contains(skill))
                .map(|skill| titled_option(skill))
                .collect()
        }
        OptionKindId::SkillFocus => {
            let focused =
                attribute_values(attributes, "skillFocus", Strategy::ValuesToLowercase, variables);
            catalog
                .trained_skills()
                .iter()
                .filter(|skill| !focused.contains(&skill.to_lowercase()))
                .map(|skill| titled_option(skill))
                .collect()
        }
        OptionKindId::UntrainedSkills => catalog
            .untrained_skills()
            .iter()
            .map(|skill| titled_option(skill))
            .collect(),
        OptionKindId::LightsaberForms => {
            let talents = catalog.talents();
            catalog
                .lightsaber_forms()
                .into_iter()
                .filter(|form| !talents.contains(form))
                .map(|form| payload_option(form.clone(), form))
                .collect()
        }
        OptionKindId::Derived(rule) => resolve_options(rule, attributes, variables),
    }
}

/// Options from a derived-option rule: the values shared by every include
/// key, less the values of any exclude key and the rule's extra exclusions.
pub fn resolve_options(
    rule: &DerivedOptionRule,
    attributes: &dyn AttributeSource,
    variables: &dyn VariableContext,
) -> Vec<ChoiceOption> {
    let lookup = |key: &&str| attribute_values(attributes, key, Strategy::Values, variables);
    let mut excluded = full_join(&rule.exclude.iter().map(lookup).collect::<Vec<_>>());
    excluded.extend(rule.extra_excluded.iter().map(|name| (*name).to_string()));
    let included = inner_join(&rule.include.iter().map(lookup).collect::<Vec<_>>());

    included
        .iter()
        .filter(|name| !excluded.contains(name))
        .map(|name| {
            let title = title_case(name);
            ChoiceOption::builder()
                .name(title.clone())
                .payloads([("payload".to_string(), title)].into())
                .build()
        })
        .collect()
}

/// Entries of the first list present in every other list, in first-list
/// order. Empty when there are no lists.
///
/// ```
/// use swse::choice::inner_join;
///
/// let lists = vec![vec![1, 2, 3, 4, 5], vec![2, 3, 4], vec![3]];
/// assert_eq!(inner_join(&lists), vec![3]);
/// ```
pub fn inner_join<T: Clone + PartialEq>(lists: &[Vec<T>]) -> Vec<T> {
    let Some((first, rest)) = lists.split_first() else {
        return Vec::new();
    };
    first
        .iter()
        .filter(|item| rest.iter().all(|list| list.contains(item)))
        .cloned()
        .collect()
}

/// All lists concatenated in order.
pub fn full_join<T: Clone>(lists: &[Vec<T>]) -> Vec<T> {
    lists.concat()
}

fn attribute_values(
    attributes: &dyn AttributeSource,
    key: &str,
    strategy: Strategy,
    variables: &dyn VariableContext,
) -> Vec<String> {
    match inheritable_attribute(attributes, key, &ReduceSpec::Single(strategy), variables) {
        Value::Empty => Vec::new(),
        Value::List(items) => items.iter().map(ToString::to_string).collect(),
        other => vec![other.to_string()],
    }
}

fn payload_option(name: String, payload: String) -> ChoiceOption {
    ChoiceOption::builder().name(name).payload(payload).build()
}

fn titled_option(name: &str) -> ChoiceOption {
    let title = title_case(name);
    payload_option(title.clone(), title)
}
