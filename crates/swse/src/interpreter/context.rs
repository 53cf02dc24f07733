//! Variable lookup and evaluation state.

use std::collections::{BTreeMap, HashMap};
use std::mem;

use bon::Builder;

use crate::interpreter::error::EvalWarning;
use crate::types::Value;

/// Read-only lookup of `@NAME` variables for a character or other entity.
///
/// Names are passed with their leading `@`.
pub trait VariableContext {
    fn get(&self, name: &str) -> Option<Value>;
}

/// A context with no variables. Every reference stays unresolved.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVariables;

impl VariableContext for NoVariables {
    fn get(&self, _name: &str) -> Option<Value> {
        None
    }
}

impl VariableContext for HashMap<String, Value> {
    fn get(&self, name: &str) -> Option<Value> {
        HashMap::get(self, name)
            .or_else(|| name.strip_prefix('@').and_then(|bare| HashMap::get(self, bare)))
            .cloned()
    }
}

impl VariableContext for BTreeMap<String, Value> {
    fn get(&self, name: &str) -> Option<Value> {
        BTreeMap::get(self, name)
            .or_else(|| name.strip_prefix('@').and_then(|bare| BTreeMap::get(self, bare)))
            .cloned()
    }
}

impl<T: VariableContext + ?Sized> VariableContext for &T {
    fn get(&self, name: &str) -> Option<Value> {
        (**self).get(name)
    }
}

/// Evaluation limits.
#[derive(Debug, Clone, Builder)]
pub struct EvalOptions {
    /// Maximum nesting of variable and splice re-evaluation.
    #[builder(default = 64)]
    pub max_depth: usize,
}

impl Default for EvalOptions {
    fn default() -> Self {
        EvalOptions::builder().build()
    }
}

/// Evaluation context carrying state through recursive evaluation.
///
/// The context tracks:
/// - The variable lookup
/// - Variables currently being resolved, for cycle detection
/// - Recursion depth for limiting deep recursion
/// - Warnings collected during evaluation
pub struct EvalContext<'a> {
    variables: &'a dyn VariableContext,
    call_stack: Vec<String>,
    depth: usize,
    max_depth: usize,
    warnings: Vec<EvalWarning>,
}

impl<'a> EvalContext<'a> {
    pub fn new(variables: &'a dyn VariableContext) -> Self {
        Self::with_options(variables, &EvalOptions::default())
    }

    pub fn with_options(variables: &'a dyn VariableContext, options: &EvalOptions) -> Self {
        Self {
            variables,
            call_stack: Vec::new(),
            depth: 0,
            max_depth: options.max_depth,
            warnings: Vec::new(),
        }
    }

    /// Look up a variable.
    pub fn variable(&self, name: &str) -> Option<Value> {
        self.variables.get(name)
    }

    /// The variable lookup backing this context.
    pub fn variables(&self) -> &'a dyn VariableContext {
        self.variables
    }

    /// Check if a variable is currently being resolved.
    pub fn is_in_call_stack(&self, name: &str) -> bool {
        self.call_stack.iter().any(|n| n == name)
    }

    /// Start resolving a variable.
    ///
    /// Fails when the maximum depth is reached or the variable is already
    /// being resolved.
    pub fn push_call(&mut self, name: &str) -> Result<(), EvalWarning> {
        if self.depth >= self.max_depth {
            return Err(EvalWarning::MaxDepthExceeded {
                expression: name.to_string(),
            });
        }
        if self.is_in_call_stack(name) {
            let mut chain = self.call_stack.clone();
            chain.push(name.to_string());
            return Err(EvalWarning::CyclicReference { chain });
        }
        self.call_stack.push(name.to_string());
        self.depth += 1;
        Ok(())
    }

    /// Finish resolving the innermost variable.
    pub fn pop_call(&mut self) {
        self.call_stack.pop();
        self.leave();
    }

    /// Enter a nested re-evaluation that is not a variable lookup.
    pub fn enter(&mut self, expression: &str) -> Result<(), EvalWarning> {
        if self.depth >= self.max_depth {
            return Err(EvalWarning::MaxDepthExceeded {
                expression: expression.to_string(),
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub fn leave(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Add a warning, ignoring duplicates.
    pub fn add_warning(&mut self, warning: EvalWarning) {
        if !self.warnings.contains(&warning) {
            self.warnings.push(warning);
        }
    }

    /// Drain all collected warnings from this context.
    pub fn take_warnings(&mut self) -> Vec<EvalWarning> {
        mem::take(&mut self.warnings)
    }

    pub fn warnings(&self) -> &[EvalWarning] {
        &self.warnings
    }
}
