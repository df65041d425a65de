//! Name-keyed formula storage shared by all formula-bearing bricks.
//!
//! A brick declares the fields it owns when it is constructed
//! ([`FormulaFields::add_allowed_brick_field`]) and reads or replaces their
//! formulas by [`BrickField`] afterwards.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::error::BrickError;
use super::view::FieldViewId;
use crate::formula::Formula;

/// Names of formula fields a brick can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BrickField {
    Size,
    SizeChange,
}

impl BrickField {
    pub fn as_str(self) -> &'static str {
        match self {
            BrickField::Size => "SIZE",
            BrickField::SizeChange => "SIZE_CHANGE",
        }
    }
}

/// One registered field: its formula and the edit element showing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSlot {
    pub formula: Arc<Formula>,
    pub view: FieldViewId,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormulaFields {
    fields: FxHashMap<BrickField, FieldSlot>,
}

impl FormulaFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`add_allowed_brick_field`](Self::add_allowed_brick_field)
    /// followed by [`set_formula_with_brick_field`](Self::set_formula_with_brick_field).
    pub fn with_field(mut self, field: BrickField, view: FieldViewId, formula: Arc<Formula>) -> Self {
        self.fields.insert(field, FieldSlot { formula, view });
        self
    }

    /// Register `field` as owned by the brick.
    ///
    /// A newly registered field starts with the default formula. Registering
    /// an existing field only rebinds its view and keeps the formula.
    pub fn add_allowed_brick_field(&mut self, field: BrickField, view: FieldViewId) {
        self.fields
            .entry(field)
            .and_modify(|slot| slot.view = view)
            .or_insert_with(|| FieldSlot {
                formula: Arc::new(Formula::default()),
                view,
            });
    }

    /// Replace the formula of a registered field, returning the previous one.
    pub fn set_formula_with_brick_field(
        &mut self,
        field: BrickField,
        formula: Arc<Formula>,
    ) -> Result<Arc<Formula>, BrickError> {
        let slot = self
            .fields
            .get_mut(&field)
            .ok_or(BrickError::FieldNotAllowed(field))?;
        Ok(std::mem::replace(&mut slot.formula, formula))
    }

    pub fn formula_with_brick_field(&self, field: BrickField) -> Result<&Arc<Formula>, BrickError> {
        self.fields
            .get(&field)
            .map(|slot| &slot.formula)
            .ok_or(BrickError::MissingField(field))
    }

    pub fn view_id(&self, field: BrickField) -> Option<FieldViewId> {
        self.fields.get(&field).map(|slot| slot.view)
    }

    pub fn contains(&self, field: BrickField) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BrickField, &FieldSlot)> {
        self.fields.iter().map(|(field, slot)| (*field, slot))
    }

    /// Check that every field in `required` is present.
    pub fn require(&self, required: &[BrickField]) -> Result<(), BrickError> {
        match required.iter().find(|f| !self.contains(**f)) {
            Some(missing) => Err(BrickError::MissingField(*missing)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_allowed_field_uses_default_formula() {
        let mut fields = FormulaFields::new();
        fields.add_allowed_brick_field(BrickField::Size, FieldViewId::BrickSetSizeToEditText);

        let f = fields.formula_with_brick_field(BrickField::Size).unwrap();
        assert_eq!(**f, Formula::default());
        assert_eq!(
            fields.view_id(BrickField::Size),
            Some(FieldViewId::BrickSetSizeToEditText)
        );
    }

    #[test]
    fn test_reregistering_keeps_formula() {
        let mut fields = FormulaFields::new();
        fields.add_allowed_brick_field(BrickField::Size, FieldViewId::BrickSetSizeToEditText);
        fields
            .set_formula_with_brick_field(BrickField::Size, Arc::new(Formula::new(3.0)))
            .unwrap();
        fields.add_allowed_brick_field(BrickField::Size, FieldViewId::BrickChangeSizeByEditText);

        assert_eq!(
            fields
                .formula_with_brick_field(BrickField::Size)
                .unwrap()
                .evaluate_detached(),
            Ok(3.0)
        );
        assert_eq!(
            fields.view_id(BrickField::Size),
            Some(FieldViewId::BrickChangeSizeByEditText)
        );
    }

    #[test]
    fn test_set_returns_previous() {
        let first = Arc::new(Formula::new(1.0));
        let second = Arc::new(Formula::new(2.0));
        let mut fields = FormulaFields::new().with_field(
            BrickField::Size,
            FieldViewId::BrickSetSizeToEditText,
            first.clone(),
        );

        let previous = fields
            .set_formula_with_brick_field(BrickField::Size, second.clone())
            .unwrap();
        assert!(Arc::ptr_eq(&previous, &first));
        assert!(Arc::ptr_eq(
            fields.formula_with_brick_field(BrickField::Size).unwrap(),
            &second
        ));
    }

    #[test]
    fn test_unregistered_field_rejected() {
        let mut fields = FormulaFields::new();
        assert_eq!(
            fields.set_formula_with_brick_field(BrickField::SizeChange, Arc::new(Formula::new(1.0))),
            Err(BrickError::FieldNotAllowed(BrickField::SizeChange))
        );
        assert_eq!(
            fields.formula_with_brick_field(BrickField::SizeChange),
            Err(BrickError::MissingField(BrickField::SizeChange))
        );
        assert_eq!(
            fields.require(&[BrickField::SizeChange]),
            Err(BrickError::MissingField(BrickField::SizeChange))
        );
    }

    #[test]
    fn test_json_keys_are_field_names() {
        let fields = FormulaFields::new().with_field(
            BrickField::Size,
            FieldViewId::BrickSetSizeToEditText,
            Arc::new(Formula::new(50.0)),
        );
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "SIZE": {
                    "formula": { "kind": "number", "value": 50.0 },
                    "view": "brick_set_size_to_edit_text"
                }
            })
        );
    }
}
