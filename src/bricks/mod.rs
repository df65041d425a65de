//! Script bricks.
//!
//! A brick is one visual instruction of a script. Each brick kind implements
//! [`Brick`] and keeps its formulas in a [`FormulaFields`] registry; the
//! closed set of kinds is [`BrickKind`], which is also the serialized form.
//!
//! Submodules overview:
//! - [`changesizeby`] – "change size by X"
//! - [`error`] – brick validation errors
//! - [`fields`] – name-keyed formula storage
//! - [`setsizeto`] – "set size to X%"
//! - [`view`] – layout and edit element identifiers

pub mod changesizeby;
pub mod error;
pub mod fields;
pub mod setsizeto;
pub mod view;

pub use changesizeby::ChangeSizeByNBrick;
pub use error::BrickError;
pub use fields::{BrickField, FormulaFields};
pub use setsizeto::SetSizeToBrick;
pub use view::{FieldViewId, LayoutResource};

use serde::{Deserialize, Serialize};

use crate::components::scriptsequence::ScriptSequenceAction;
use crate::sprite::Sprite;

/// Current serialization version of brick records.
pub const SERIAL_VERSION: u32 = 1;

fn default_version() -> u32 {
    SERIAL_VERSION
}

/// Behavior shared by every brick kind.
pub trait Brick {
    /// Layout the rendering layer should use for this brick.
    fn view_resource(&self) -> LayoutResource;

    fn formula_fields(&self) -> &FormulaFields;

    /// Append this brick's action(s) to `sequence`.
    ///
    /// Returns the nested sequences the brick opens, or `None` for bricks
    /// that do not open a nested scope.
    fn add_action_to_sequence(
        &self,
        sprite: &Sprite,
        sequence: &mut ScriptSequenceAction,
    ) -> Result<Option<Vec<ScriptSequenceAction>>, BrickError>;
}

/// Every brick kind the runtime knows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BrickKind {
    SetSizeTo(SetSizeToBrick),
    ChangeSizeBy(ChangeSizeByNBrick),
}

impl BrickKind {
    fn inner(&self) -> &dyn Brick {
        match self {
            BrickKind::SetSizeTo(b) => b,
            BrickKind::ChangeSizeBy(b) => b,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BrickKind::SetSizeTo(_) => "SetSizeTo",
            BrickKind::ChangeSizeBy(_) => "ChangeSizeBy",
        }
    }
}

impl Brick for BrickKind {
    fn view_resource(&self) -> LayoutResource {
        self.inner().view_resource()
    }

    fn formula_fields(&self) -> &FormulaFields {
        self.inner().formula_fields()
    }

    fn add_action_to_sequence(
        &self,
        sprite: &Sprite,
        sequence: &mut ScriptSequenceAction,
    ) -> Result<Option<Vec<ScriptSequenceAction>>, BrickError> {
        self.inner().add_action_to_sequence(sprite, sequence)
    }
}

impl From<SetSizeToBrick> for BrickKind {
    fn from(b: SetSizeToBrick) -> Self {
        BrickKind::SetSizeTo(b)
    }
}

impl From<ChangeSizeByNBrick> for BrickKind {
    fn from(b: ChangeSizeByNBrick) -> Self {
        BrickKind::ChangeSizeBy(b)
    }
}

/// Wire form of a formula brick, checked before it becomes a brick.
#[derive(Debug, Deserialize)]
pub struct BrickData {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    fields: FormulaFields,
}

impl BrickData {
    pub(crate) fn validate(
        self,
        required: &[BrickField],
    ) -> Result<(u32, FormulaFields), BrickError> {
        if self.version > SERIAL_VERSION {
            return Err(BrickError::UnsupportedVersion {
                found: self.version,
                supported: SERIAL_VERSION,
            });
        }
        self.fields.require(required)?;
        Ok((self.version, self.fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::world::World;

    #[test]
    fn test_kind_dispatches_to_variant() {
        let set: BrickKind = SetSizeToBrick::from_value(10.0).into();
        let change: BrickKind = ChangeSizeByNBrick::from_value(10.0).into();
        assert_eq!(set.view_resource(), LayoutResource::BrickSetSizeTo);
        assert_eq!(change.view_resource(), LayoutResource::BrickChangeSizeBy);
        assert_eq!(set.name(), "SetSizeTo");
    }

    #[test]
    fn test_no_kind_opens_nested_sequence() {
        let mut world = World::new();
        let sprite = Sprite::new("Cat", world.spawn_empty().id());
        let mut seq = ScriptSequenceAction::new();
        let bricks: Vec<BrickKind> = vec![
            SetSizeToBrick::new().into(),
            ChangeSizeByNBrick::new().into(),
        ];
        for brick in &bricks {
            assert!(brick
                .add_action_to_sequence(&sprite, &mut seq)
                .unwrap()
                .is_none());
        }
        assert_eq!(seq.len(), 2);
    }

    #[test]
    fn test_tagged_json() {
        let brick: BrickKind = SetSizeToBrick::from_value(50.0).into();
        let json = serde_json::to_value(&brick).unwrap();
        assert_eq!(json["type"], "SetSizeTo");
        assert_eq!(json["version"], 1);
        assert_eq!(json["fields"]["SIZE"]["formula"]["value"], 50.0);

        let back: BrickKind = serde_json::from_value(json).unwrap();
        assert_eq!(back, brick);
    }

    #[test]
    fn test_missing_version_defaults_to_current() {
        let json = r#"{ "type": "ChangeSizeBy", "fields": {
            "SIZE_CHANGE": { "formula": { "kind": "number", "value": 5.0 },
                             "view": "brick_change_size_by_edit_text" } } }"#;
        let brick: BrickKind = serde_json::from_str(json).unwrap();
        match brick {
            BrickKind::ChangeSizeBy(b) => {
                assert_eq!(b.change_formula().unwrap().evaluate_detached(), Ok(5.0))
            }
            other => panic!("unexpected brick {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_rejected() {
        let json = r#"{ "type": "PlaySound", "fields": {} }"#;
        assert!(serde_json::from_str::<BrickKind>(json).is_err());
    }
}
