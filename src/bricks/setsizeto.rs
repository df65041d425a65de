//! "Set size to X%" brick.

use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use super::error::BrickError;
use super::fields::{BrickField, FormulaFields};
use super::view::{FieldViewId, LayoutResource};
use super::{Brick, BrickData, SERIAL_VERSION};
use crate::components::scriptsequence::ScriptSequenceAction;
use crate::formula::Formula;
use crate::sprite::Sprite;

/// Sets the sprite's size to the value of its `SIZE` formula, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BrickData")]
pub struct SetSizeToBrick {
    version: u32,
    fields: FormulaFields,
}

impl Default for SetSizeToBrick {
    fn default() -> Self {
        Self::new()
    }
}

impl SetSizeToBrick {
    const REQUIRED: &'static [BrickField] = &[BrickField::Size];

    /// Brick with `SIZE` bound to the default formula.
    pub fn new() -> Self {
        let mut fields = FormulaFields::new();
        fields.add_allowed_brick_field(BrickField::Size, FieldViewId::BrickSetSizeToEditText);
        Self {
            version: SERIAL_VERSION,
            fields,
        }
    }

    /// Brick whose size is the constant `size`.
    pub fn from_value(size: f64) -> Self {
        Self::with_formula(Formula::new(size))
    }

    /// Brick whose `SIZE` field holds exactly `formula`.
    pub fn with_formula(formula: impl Into<Arc<Formula>>) -> Self {
        Self {
            version: SERIAL_VERSION,
            fields: FormulaFields::new().with_field(
                BrickField::Size,
                FieldViewId::BrickSetSizeToEditText,
                formula.into(),
            ),
        }
    }

    pub fn size_formula(&self) -> Result<&Arc<Formula>, BrickError> {
        self.fields.formula_with_brick_field(BrickField::Size)
    }

    /// Replace the size formula, returning the old one.
    pub fn set_size_formula(
        &mut self,
        formula: impl Into<Arc<Formula>>,
    ) -> Result<Arc<Formula>, BrickError> {
        self.fields
            .set_formula_with_brick_field(BrickField::Size, formula.into())
    }

    pub fn version(&self) -> u32 {
        self.version
    }
}

impl Brick for SetSizeToBrick {
    fn view_resource(&self) -> LayoutResource {
        LayoutResource::BrickSetSizeTo
    }

    fn formula_fields(&self) -> &FormulaFields {
        &self.fields
    }

    fn add_action_to_sequence(
        &self,
        sprite: &Sprite,
        sequence: &mut ScriptSequenceAction,
    ) -> Result<Option<Vec<ScriptSequenceAction>>, BrickError> {
        let formula = self.size_formula()?.clone();
        let action = sprite
            .action_factory()
            .create_set_size_to_action(sprite, formula);
        sequence.add_action(action);
        debug!("{}: queued set size to", sprite.name);
        Ok(None)
    }
}

impl TryFrom<BrickData> for SetSizeToBrick {
    type Error = BrickError;

    fn try_from(data: BrickData) -> Result<Self, Self::Error> {
        let (version, fields) = data.validate(Self::REQUIRED)?;
        Ok(Self { version, fields })
    }
}
