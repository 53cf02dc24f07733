//! Reduce strategies and reduction options.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::slice;
use std::str::FromStr;

use bon::Builder;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use swse_semantics::{StrategyId, resolve_strategy};
use thiserror::Error;

use crate::interpreter::EvalOptions;

/// A single reduce strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Layered numeric/dice combination honoring priority and mode.
    Sum,
    And,
    Or,
    /// The largest value by dice-aware size.
    Max,
    /// The smallest value by dice-aware size.
    Min,
    First,
    /// Raw values in application order, honoring OVERRIDE.
    Values,
    ValuesToLowercase,
    Unique,
    NumericValues,
    /// `"source: value;  "` for every contribution.
    Summary,
    /// The raw values. In a list of strategies, requests a name to result map.
    Mapped,
    /// A tag naming no known strategy. Reduces by concatenating values.
    Unrecognized(String),
}

impl Strategy {
    /// Parse a strategy tag, case-insensitively. Never fails.
    pub fn parse(tag: &str) -> Self {
        match resolve_strategy(tag) {
            Some(id) => Self::from(id),
            None => Strategy::Unrecognized(tag.trim().to_string()),
        }
    }

    /// The canonical tag, or the original text of an unrecognized one.
    pub fn tag(&self) -> &str {
        match self {
            Strategy::Sum => StrategyId::Sum.tag(),
            Strategy::And => StrategyId::And.tag(),
            Strategy::Or => StrategyId::Or.tag(),
            Strategy::Max => StrategyId::Max.tag(),
            Strategy::Min => StrategyId::Min.tag(),
            Strategy::First => StrategyId::First.tag(),
            Strategy::Values => StrategyId::Values.tag(),
            Strategy::ValuesToLowercase => StrategyId::ValuesToLowercase.tag(),
            Strategy::Unique => StrategyId::Unique.tag(),
            Strategy::NumericValues => StrategyId::NumericValues.tag(),
            Strategy::Summary => StrategyId::Summary.tag(),
            Strategy::Mapped => StrategyId::Mapped.tag(),
            Strategy::Unrecognized(name) => name,
        }
    }
}

impl From<StrategyId> for Strategy {
    fn from(id: StrategyId) -> Self {
        match id {
            StrategyId::Sum => Strategy::Sum,
            StrategyId::And => Strategy::And,
            StrategyId::Or => Strategy::Or,
            StrategyId::Max => Strategy::Max,
            StrategyId::Min => Strategy::Min,
            StrategyId::First => Strategy::First,
            StrategyId::Values => Strategy::Values,
            StrategyId::ValuesToLowercase => Strategy::ValuesToLowercase,
            StrategyId::Unique => Strategy::Unique,
            StrategyId::NumericValues => Strategy::NumericValues,
            StrategyId::Summary => Strategy::Summary,
            StrategyId::Mapped => Strategy::Mapped,
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.tag())
    }
}

/// What to do with a list of sourced values.
///
/// # Example
///
/// ```
/// use swse::reduce::{ReduceSpec, Strategy};
///
/// assert_eq!(ReduceSpec::parse("sum"), ReduceSpec::Single(Strategy::Sum));
/// assert_eq!(
///     ReduceSpec::from_tags(["VALUES", "UNIQUE"]),
///     ReduceSpec::Chain(vec![Strategy::Values, Strategy::Unique])
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReduceSpec {
    /// No reduction: the raw values are returned as a list.
    #[default]
    Raw,
    Single(Strategy),
    /// Each stage reduces the previous stage's result.
    Chain(Vec<Strategy>),
    /// Every strategy reduces the same input; the result maps tags to
    /// results.
    Mapped(Vec<Strategy>),
}

impl ReduceSpec {
    /// Parse a single tag, or a comma-separated list of tags.
    pub fn parse(text: &str) -> Self {
        if text.contains(',') {
            Self::from_tags(text.split(','))
        } else if text.trim().is_empty() {
            ReduceSpec::Raw
        } else {
            ReduceSpec::Single(Strategy::parse(text))
        }
    }

    /// Build a spec from a list of tags.
    ///
    /// A list containing `MAPPED` requests every strategy at once; any other
    /// list chains its strategies in order.
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut strategies: Vec<Strategy> = tags
            .into_iter()
            .filter(|tag| !tag.as_ref().trim().is_empty())
            .map(|tag| Strategy::parse(tag.as_ref()))
            .collect();
        if strategies.contains(&Strategy::Mapped) {
            ReduceSpec::Mapped(strategies)
        } else if strategies.len() > 1 {
            ReduceSpec::Chain(strategies)
        } else {
            strategies.pop().map_or(ReduceSpec::Raw, ReduceSpec::Single)
        }
    }

    /// Every strategy named by this spec.
    pub fn strategies(&self) -> &[Strategy] {
        match self {
            ReduceSpec::Raw => &[],
            ReduceSpec::Single(strategy) => slice::from_ref(strategy),
            ReduceSpec::Chain(strategies) | ReduceSpec::Mapped(strategies) => strategies,
        }
    }
}

impl Display for ReduceSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let tags: Vec<&str> = self.strategies().iter().map(Strategy::tag).collect();
        write!(f, "{}", tags.join(","))
    }
}

impl FromStr for ReduceSpec {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SpecRepr {
    Tag(String),
    Tags(Vec<String>),
}

impl<'de> Deserialize<'de> for ReduceSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<SpecRepr>::deserialize(deserializer)? {
            None => ReduceSpec::Raw,
            Some(SpecRepr::Tag(tag)) => ReduceSpec::parse(&tag),
            Some(SpecRepr::Tags(tags)) => ReduceSpec::from_tags(tags),
        })
    }
}

impl Serialize for ReduceSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ReduceSpec::Raw => serializer.serialize_none(),
            ReduceSpec::Single(strategy) => serializer.serialize_str(strategy.tag()),
            ReduceSpec::Chain(strategies) | ReduceSpec::Mapped(strategies) => {
                serializer.collect_seq(strategies.iter().map(Strategy::tag))
            }
        }
    }
}

/// How priority buckets are ordered.
///
/// Rules data has always been applied with priorities compared as text, so
/// `"10"` comes before `"2"`. [`PriorityOrder::Numeric`] compares them as
/// numbers instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityOrder {
    #[default]
    Lexicographic,
    Numeric,
}

impl PriorityOrder {
    pub fn compare(self, a: i64, b: i64) -> Ordering {
        match self {
            PriorityOrder::Lexicographic => a.to_string().cmp(&b.to_string()),
            PriorityOrder::Numeric => a.cmp(&b),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PriorityOrder::Lexicographic => "lexicographic",
            PriorityOrder::Numeric => "numeric",
        }
    }
}

impl Display for PriorityOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.name())
    }
}

/// A priority order name that is neither `lexicographic` nor `numeric`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown priority order '{0}', expected 'lexicographic' or 'numeric'")]
pub struct UnknownPriorityOrder(pub String);

impl FromStr for PriorityOrder {
    type Err = UnknownPriorityOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lexicographic" | "lexical" | "text" => Ok(PriorityOrder::Lexicographic),
            "numeric" | "number" => Ok(PriorityOrder::Numeric),
            _ => Err(UnknownPriorityOrder(s.to_string())),
        }
    }
}

/// Options for a reduction.
#[derive(Debug, Clone, Default, Builder)]
pub struct ReduceOptions {
    #[builder(default)]
    pub priority_order: PriorityOrder,

    #[builder(default)]
    pub eval: EvalOptions,
}
