//! Choice definitions as authored in rules data.

use std::collections::BTreeMap;
use std::fmt::{Formatter, Result as FmtResult};
use std::marker::PhantomData;

use bon::Builder;
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{AttributeChange, Value};

/// How a choice is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "UPPERCASE")]
pub enum ChoiceKind {
    /// A free numeric answer, stored under the choice's payload key.
    Integer,
    /// A pick from the choice's options.
    #[default]
    Select,
}

impl From<String> for ChoiceKind {
    fn from(kind: String) -> Self {
        if kind.eq_ignore_ascii_case("INTEGER") {
            ChoiceKind::Integer
        } else {
            ChoiceKind::Select
        }
    }
}

/// A decision the player makes when an item is granted.
#[derive(Debug, Clone, PartialEq, Default, Builder, Serialize, Deserialize)]
#[builder(on(String, into))]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    #[builder(default)]
    #[serde(default, rename = "type")]
    pub kind: ChoiceKind,

    #[builder(default)]
    #[serde(default)]
    pub description: String,

    /// Prompt text used instead of the description when no option is left.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_options: Option<String>,

    /// Prompt text used instead of the description when one option is left.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_option: Option<String>,

    #[builder(default)]
    #[serde(default, deserialize_with = "keyed_options")]
    pub options: Vec<ChoiceOption>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_selections: Option<u32>,

    /// Only offered while the character is at first level.
    #[builder(default)]
    #[serde(default, alias = "isFirstLevel")]
    pub first_level_only: bool,

    #[builder(default)]
    #[serde(default)]
    pub show_selection_in_name: bool,

    /// Where an INTEGER answer is stored.
    #[serde(default, rename = "payload", skip_serializing_if = "Option::is_none")]
    pub payload_key: Option<String>,
}

impl Choice {
    /// How many answers the prompt asks for; at least one.
    pub fn selections(&self) -> u32 {
        self.available_selections.unwrap_or(1).max(1)
    }
}

/// One answer to a [`Choice`].
///
/// An option whose name is a generated-option key (such as
/// `AVAILABLE_WEAPON_FOCUS`) stands for a list of options computed from the
/// character; see [`explode_options`](super::explode_options).
#[derive(Debug, Clone, PartialEq, Default, Builder, Serialize, Deserialize)]
#[builder(on(String, into))]
#[serde(rename_all = "camelCase")]
pub struct ChoiceOption {
    #[builder(default)]
    #[serde(default)]
    pub name: String,

    /// An alternative identifier matched against preprogrammed answers.
    #[builder(into, default)]
    #[serde(default)]
    pub value: Value,

    /// Stored under the `payload` key when this option is picked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,

    /// Stored under their own keys when this option is picked.
    #[builder(default)]
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub payloads: BTreeMap<String, String>,

    #[builder(default)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub provided_items: Vec<ProvidedItem>,

    #[builder(default)]
    #[serde(default, deserialize_with = "keyed_attributes", skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeChange>,

    #[builder(default)]
    #[serde(default)]
    pub is_default: bool,
}

impl ChoiceOption {
    /// A plain named option.
    pub fn named(name: impl Into<String>) -> Self {
        Self::builder().name(name).build()
    }

    /// Every payload this option assigns, `payload` last so that it wins.
    pub fn payload_entries(&self) -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> = self
            .payloads
            .iter()
            .filter(|(key, _)| self.payload.is_none() || key.as_str() != "payload")
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        if let Some(payload) = &self.payload {
            entries.push(("payload".to_string(), payload.clone()));
        }
        entries
    }
}

/// An item granted alongside a picked option.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(on(String, into))]
pub struct ProvidedItem {
    pub name: String,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Answers to forward to the provided item's own choices.
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<String>,
}

/// Options may be authored as a list or as a map keyed by option name.
fn keyed_options<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<ChoiceOption>, D::Error> {
    let entries = deserializer.deserialize_any(KeyedList::<ChoiceOption>(PhantomData))?;
    Ok(entries
        .into_iter()
        .map(|(key, mut option)| {
            if let Some(key) = key.filter(|_| option.name.is_empty()) {
                option.name = key;
            }
            option
        })
        .collect())
}

/// Attribute changes may be authored as a list or as a map of changes.
fn keyed_attributes<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<AttributeChange>, D::Error> {
    let entries = deserializer.deserialize_any(KeyedList::<AttributeChange>(PhantomData))?;
    Ok(entries.into_iter().map(|(_, change)| change).collect())
}

/// Reads a sequence, or a map in authored order, into `(key, value)` pairs.
struct KeyedList<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for KeyedList<T> {
    type Value = Vec<(Option<String>, T)>;

    fn expecting(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("a list or a map")
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_none<E>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::new();
        while let Some(item) = seq.next_element::<T>()? {
            entries.push((None, item));
        }
        Ok(entries)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::new();
        while let Some((key, item)) = map.next_entry::<String, T>()? {
            entries.push((Some(key), item));
        }
        Ok(entries)
    }
}
