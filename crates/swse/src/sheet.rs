//! Character sheets loaded from JSON.
//!
//! A sheet holds the resolved variables (`@STRMOD` and friends), the
//! contributions to each attribute, and the game data used to generate
//! choice options:
//!
//! ```json
//! {
//!   "variables": { "@STRMOD": 2 },
//!   "attributes": {
//!     "damage": [
//!       { "value": "1d8", "source": "Blaster Pistol" },
//!       { "value": "@STRMOD", "source": "Strength" }
//!     ]
//!   },
//!   "catalog": { "skills": ["Acrobatics", "Use the Force"] }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::choice::{ChoiceEnvironment, StaticCatalog};
use crate::interpreter::{LoadError, VariableContext};
use crate::reduce::{AttributeSource, ReduceOptions, ReduceSpec, inheritable_attribute_with};
use crate::types::{SourcedValue, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeSheet {
    pub variables: BTreeMap<String, Value>,
    pub attributes: BTreeMap<String, Vec<SourcedValue>>,
    pub catalog: StaticCatalog,
}

impl AttributeSheet {
    /// Load a sheet from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let sheet = Self::from_json_str(&content)?;
        debug!(
            path = %path.display(),
            variables = sheet.variables.len(),
            attributes = sheet.attributes.len(),
            "loaded sheet"
        );
        Ok(sheet)
    }

    /// Parse a sheet from JSON text.
    ///
    /// ```
    /// use swse::sheet::AttributeSheet;
    ///
    /// let sheet = AttributeSheet::from_json_str(r#"{ "variables": { "@LEVEL": 3 } }"#).unwrap();
    /// assert_eq!(sheet.variables.len(), 1);
    /// assert!(sheet.attributes.is_empty());
    /// ```
    pub fn from_json_str(content: &str) -> Result<Self, LoadError> {
        serde_json::from_str(content).map_err(|source| LoadError::Json { source })
    }

    /// Reduce the contributions to `key`.
    pub fn attribute(&self, key: &str, spec: &ReduceSpec, options: &ReduceOptions) -> Value {
        inheritable_attribute_with(self, key, spec, self, options)
    }

    /// The sheet as the collaborators of a choice activation.
    pub fn environment(&self) -> ChoiceEnvironment<'_> {
        ChoiceEnvironment::new(self, self, &self.catalog)
    }
}

impl VariableContext for AttributeSheet {
    fn get(&self, name: &str) -> Option<Value> {
        VariableContext::get(&self.variables, name)
    }
}

impl AttributeSource for AttributeSheet {
    fn sourced_values(&self, key: &str) -> Vec<SourcedValue> {
        self.attributes.sourced_values(key)
    }
}
