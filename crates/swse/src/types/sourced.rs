use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::types::{ApplicationMode, Value};

/// One contributor to an aggregated attribute.
///
/// # Example
///
/// ```
/// use swse::types::{ApplicationMode, SourcedValue};
///
/// let bonus = SourcedValue::builder()
///     .value("1d8")
///     .mode(ApplicationMode::Upgrade)
///     .source("Rapid Strike")
///     .build();
///
/// assert_eq!(bonus.effective_priority(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Builder, Serialize, Deserialize)]
#[builder(on(String, into))]
#[serde(from = "SourcedRepr")]
pub struct SourcedValue {
    /// The unevaluated contribution.
    #[builder(into, default)]
    pub value: Value,

    #[builder(default)]
    pub mode: ApplicationMode,

    /// Application priority; absent and zero both mean 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,

    /// Human-readable origin, such as the feat or item granting the value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl SourcedValue {
    /// A plain ADD contribution at the default priority.
    pub fn new(value: impl Into<Value>) -> Self {
        Self::builder().value(value).build()
    }

    pub fn effective_priority(&self) -> i64 {
        match self.priority {
            None | Some(0) => 1,
            Some(priority) => priority,
        }
    }
}

#[derive(Deserialize)]
struct SourcedRepr {
    #[serde(default)]
    value: Value,
    #[serde(default)]
    mode: Option<ApplicationMode>,
    #[serde(default)]
    priority: Option<i64>,
    #[serde(default, alias = "sourceString")]
    source: Option<String>,
    #[serde(default, rename = "override")]
    legacy_override: bool,
}

impl From<SourcedRepr> for SourcedValue {
    fn from(repr: SourcedRepr) -> Self {
        let mode = match (repr.mode, repr.legacy_override) {
            (Some(mode), _) => mode,
            (None, true) => ApplicationMode::Override,
            (None, false) => ApplicationMode::Add,
        };
        SourcedValue {
            value: repr.value,
            mode,
            priority: repr.priority,
            source: repr.source,
        }
    }
}

/// A keyed attribute change granted by a choice option or an item.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(on(String, into))]
pub struct AttributeChange {
    pub key: String,

    #[builder(into, default)]
    #[serde(default)]
    pub value: Value,

    #[builder(default)]
    #[serde(default)]
    pub mode: ApplicationMode,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

impl AttributeChange {
    /// The change as a contribution to its attribute, labelled with `source`.
    pub fn to_sourced(&self, source: Option<&str>) -> SourcedValue {
        SourcedValue {
            value: self.value.clone(),
            mode: self.mode,
            priority: self.priority,
            source: source.map(str::to_string),
        }
    }
}
