//! Project-wide user variables.
//!
//! The [`UserVariables`] resource holds numeric variables that formulas can
//! read by name (see [`FormulaElement::UserVariable`]).
//!
//! [`FormulaElement::UserVariable`]: crate::formula::FormulaElement::UserVariable

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Numeric user variables addressed by name.
#[derive(Debug, Clone, Default, PartialEq, Resource, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserVariables {
    pub values: FxHashMap<String, f64>,
}

impl UserVariables {
    /// Set a variable value.
    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }
    /// Get a variable by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }
    /// Remove a variable. Returns the old value if it existed.
    pub fn remove(&mut self, name: &str) -> Option<f64> {
        self.values.remove(name)
    }
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut vars = UserVariables::default();
        assert!(vars.is_empty());
        vars.set("a", 1.5);
        vars.set("a", 2.5);
        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get("a"), Some(2.5));
        assert_eq!(vars.remove("a"), Some(2.5));
        assert_eq!(vars.get("a"), None);
    }
}
