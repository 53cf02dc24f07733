//! Attribute reduction engine.
//!
//! Many sourced values (from feats, species, equipment and effects) are
//! combined into one effective value according to a [`ReduceSpec`]. The SUM
//! strategy applies contributions by priority bucket, then by
//! [`ApplicationMode`](crate::types::ApplicationMode) in a fixed order.

mod combine;
mod engine;
mod source;
mod spec;

pub use combine::{add_values, downgrade, multiplier_of, multiply_values, upgrade};
pub use engine::{application_order, reduce, reduce_in, reduce_with, reduce_with_warnings};
pub use source::{AttributeSource, NoAttributes, inheritable_attribute, inheritable_attribute_with};
pub use spec::{PriorityOrder, ReduceOptions, ReduceSpec, Strategy, UnknownPriorityOrder};
