//! Variable storage for the interpreter
//!
//! This module provides the run-scoped variable table:
//! - [`Environment`]: flat name → value mapping owned by one interpreter
//! - [`value`]: Runtime value representation (scalar or array)
//!
//! There is no block scoping: every variable lives from its first assignment to
//! the end of the run. Variables keep their first-assignment order; reassigning
//! a name replaces its value in place and drops the previous one.
//!
//! Looking up a name that was never assigned is not an error. It yields
//! "nothing", which prints as empty text, counts as zero in arithmetic and makes
//! `foreach` skip its body.

pub mod value;

use rustc_hash::FxHashMap;
use value::{ArrayValue, Value};

/// A named variable slot. `value` is `None` when the variable was assigned
/// nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub value: Option<Value>,
}

/// Run-scoped variable table
#[derive(Debug, Clone, Default)]
pub struct Environment {
    variables: Vec<Variable>,
    index: FxHashMap<String, usize>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scalar text of `name`, if it exists and holds a scalar.
    pub fn get_scalar(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_scalar)
    }

    /// Array of `name`, if it exists and holds an array.
    pub fn get_array(&self, name: &str) -> Option<&ArrayValue> {
        self.get(name).and_then(Value::as_array)
    }

    /// Current value of `name`, whichever kind it is.
    pub fn get(&self, name: &str) -> Option<&Value> {
        let slot = *self.index.get(name)?;
        self.variables[slot].value.as_ref()
    }

    /// Assign `value` to `name`.
    ///
    /// An existing variable is replaced in place; a new one is appended.
    pub fn set(&mut self, name: &str, value: Option<Value>) {
        if let Some(&slot) = self.index.get(name) {
            self.variables[slot].value = value;
            return;
        }

        self.index.insert(name.to_string(), self.variables.len());
        self.variables.push(Variable {
            name: name.to_string(),
            value,
        });
    }

    pub fn set_scalar(&mut self, name: &str, text: impl Into<String>) {
        self.set(name, Some(Value::Scalar(text.into())));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Variables in first-assignment order.
    #[cfg(test)]
    pub fn iter(&self) -> std::slice::Iter<'_, Variable> {
        self.variables.iter()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
