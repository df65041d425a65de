//! "Change size by X" brick.

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

/// Adds the value of its `SIZE_CHANGE` formula to the sprite's size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BrickData")]
pub struct ChangeSizeByNBrick {
    version: u32,
    fields: FormulaFields,
}

impl Default for ChangeSizeByNBrick {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeSizeByNBrick {
    const REQUIRED: &'static [BrickField] = &[BrickField::SizeChange];

    pub fn new() -> Self {
        let mut fields = FormulaFields::new();
        fields.add_allowed_brick_field(
            BrickField::SizeChange,
            FieldViewId::BrickChangeSizeByEditText,
        );
        Self {
            version: SERIAL_VERSION,
            fields,
        }
    }

    pub fn from_value(change: f64) -> Self {
        Self::with_formula(Formula::new(change))
    }

    pub fn with_formula(formula: impl Into<Arc<Formula>>) -> Self {
        Self {
            version: SERIAL_VERSION,
            fields: FormulaFields::new().with_field(
                BrickField::SizeChange,
                FieldViewId::BrickChangeSizeByEditText,
                formula.into(),
            ),
        }
    }

    pub fn change_formula(&self) -> Result<&Arc<Formula>, BrickError> {
        self.fields.formula_with_brick_field(BrickField::SizeChange)
    }

    pub fn set_change_formula(
        &mut self,
        formula: impl Into<Arc<Formula>>,
    ) -> Result<Arc<Formula>, BrickError> {
        self.fields
            .set_formula_with_brick_field(BrickField::SizeChange, formula.into())
    }
}

impl Brick for ChangeSizeByNBrick {
    fn view_resource(&self) -> LayoutResource {
        LayoutResource::BrickChangeSizeBy
    }

    fn formula_fields(&self) -> &FormulaFields {
        &self.fields
    }

    fn add_action_to_sequence(
        &self,
        sprite: &Sprite,
        sequence: &mut ScriptSequenceAction,
    ) -> Result<Option<Vec<ScriptSequenceAction>>, BrickError> {
        let formula = self.change_formula()?.clone();
        let action = sprite
            .action_factory()
            .create_change_size_by_action(sprite, formula);
        sequence.add_action(action);
        debug!("{}: queued change size by", sprite.name);
        Ok(None)
    }
}

impl TryFrom<BrickData> for ChangeSizeByNBrick {
    type Error = BrickError;

    fn try_from(data: BrickData) -> Result<Self, Self::Error> {
        let (version, fields) = data.validate(Self::REQUIRED)?;
        Ok(Self { version, fields })
    }
}
