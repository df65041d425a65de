//! Formulas bound to brick fields.
//!
//! A [`Formula`] is a small expression tree ([`FormulaElement`]) evaluated
//! at run time against the state of the sprite executing it, see
//! [`FormulaContext`].

pub mod element;
pub mod error;

pub use element::{BinaryOp, FormulaElement, Function, Sensor, UnaryOp};
pub use error::FormulaError;

use serde::{Deserialize, Serialize};

use crate::resources::uservariables::UserVariables;

/// Runtime state a formula is evaluated against.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormulaContext<'a> {
    /// Size of the sprite executing the formula, in percent.
    pub size_percent: f64,
    /// User variables visible to the formula, if any.
    pub variables: Option<&'a UserVariables>,
}

impl<'a> FormulaContext<'a> {
    pub fn new(size_percent: f64, variables: &'a UserVariables) -> Self {
        Self {
            size_percent,
            variables: Some(variables),
        }
    }

    pub fn with_size(mut self, size_percent: f64) -> Self {
        self.size_percent = size_percent;
        self
    }

    pub fn variable(&self, name: &str) -> Option<f64> {
        self.variables.and_then(|v| v.get(name))
    }
}

/// An expression bound to a brick field.
///
/// The default formula is the constant `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Formula {
    root: FormulaElement,
}

impl Default for Formula {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl From<f64> for Formula {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<FormulaElement> for Formula {
    fn from(root: FormulaElement) -> Self {
        Self { root }
    }
}

impl Formula {
    /// Create a constant formula.
    pub fn new(value: f64) -> Self {
        Self {
            root: FormulaElement::number(value),
        }
    }

    pub fn root(&self) -> &FormulaElement {
        &self.root
    }

    /// Evaluate the formula, rejecting NaN and infinite results.
    pub fn evaluate(&self, ctx: &FormulaContext<'_>) -> Result<f64, FormulaError> {
        let value = self.root.interpret(ctx)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(FormulaError::NotFinite)
        }
    }

    /// Evaluate without any sprite state or variables.
    pub fn evaluate_detached(&self) -> Result<f64, FormulaError> {
        self.evaluate(&FormulaContext::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_formula_is_zero() {
        assert_eq!(Formula::default().evaluate_detached(), Ok(0.0));
    }

    #[test]
    fn test_constant_formula() {
        let f = Formula::new(50.0);
        assert_eq!(f.evaluate_detached(), Ok(50.0));
        assert_eq!(f, Formula::from(50.0));
    }

    #[test]
    fn test_not_finite_rejected() {
        let f = Formula::from(FormulaElement::binary(
            BinaryOp::Mult,
            FormulaElement::number(f64::MAX),
            FormulaElement::number(10.0),
        ));
        assert_eq!(f.evaluate_detached(), Err(FormulaError::NotFinite));
    }

    #[test]
    fn test_size_relative_formula() {
        // size * 2
        let f = Formula::from(FormulaElement::binary(
            BinaryOp::Mult,
            FormulaElement::sensor(Sensor::ObjectSize),
            FormulaElement::number(2.0),
        ));
        let ctx = FormulaContext::default().with_size(30.0);
        assert_eq!(f.evaluate(&ctx), Ok(60.0));
    }

    #[test]
    fn test_json_shape() {
        let f = Formula::from(FormulaElement::variable("scale"));
        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "kind": "user_variable", "name": "scale" })
        );
        let back: Formula = serde_json::from_value(json).unwrap();
        assert_eq!(back, f);
    }
}
