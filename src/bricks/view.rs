//! Identifiers of the UI resources bricks are rendered with.
//!
//! The rendering layer resolves these names; bricks only hand them out.

use serde::{Deserialize, Serialize};

/// Layout used to draw a whole brick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutResource {
    BrickSetSizeTo,
    BrickChangeSizeBy,
}

impl LayoutResource {
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutResource::BrickSetSizeTo => "brick_set_size_to",
            LayoutResource::BrickChangeSizeBy => "brick_change_size_by",
        }
    }
}

/// Edit element a single brick field is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldViewId {
    BrickSetSizeToEditText,
    BrickChangeSizeByEditText,
}

impl FieldViewId {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldViewId::BrickSetSizeToEditText => "brick_set_size_to_edit_text",
            FieldViewId::BrickChangeSizeByEditText => "brick_change_size_by_edit_text",
        }
    }
}
