use std::collections::{BTreeMap, HashMap};

use crate::interpreter::VariableContext;
use crate::reduce::engine::reduce_with;
use crate::reduce::spec::{ReduceOptions, ReduceSpec};
use crate::types::{SourcedValue, Value};

/// Supplies the contributions to an entity's attributes: feats, species,
/// equipped items and active effects, already filtered to those that apply.
pub trait AttributeSource {
    /// The ordered contributions to `key`. Empty when nothing contributes.
    fn sourced_values(&self, key: &str) -> Vec<SourcedValue>;
}

/// A source with no contributions to any attribute.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAttributes;

impl AttributeSource for NoAttributes {
    fn sourced_values(&self, _key: &str) -> Vec<SourcedValue> {
        Vec::new()
    }
}

impl AttributeSource for BTreeMap<String, Vec<SourcedValue>> {
    fn sourced_values(&self, key: &str) -> Vec<SourcedValue> {
        self.get(key).cloned().unwrap_or_default()
    }
}

impl AttributeSource for HashMap<String, Vec<SourcedValue>> {
    fn sourced_values(&self, key: &str) -> Vec<SourcedValue> {
        self.get(key).cloned().unwrap_or_default()
    }
}

impl<T: AttributeSource + ?Sized> AttributeSource for &T {
    fn sourced_values(&self, key: &str) -> Vec<SourcedValue> {
        (**self).sourced_values(key)
    }
}

/// Reduce every contribution to `key` from `source`.
pub fn inheritable_attribute(
    source: &dyn AttributeSource,
    key: &str,
    spec: &ReduceSpec,
    variables: &dyn VariableContext,
) -> Value {
    inheritable_attribute_with(source, key, spec, variables, &ReduceOptions::default())
}

pub fn inheritable_attribute_with(
    source: &dyn AttributeSource,
    key: &str,
    spec: &ReduceSpec,
    variables: &dyn VariableContext,
    options: &ReduceOptions,
) -> Value {
    let values = source.sourced_values(key);
    reduce_with(spec, &values, variables, options)
}
