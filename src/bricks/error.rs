use std::fmt;

use super::fields::BrickField;

#[derive(Debug, Clone, PartialEq)]
pub enum BrickError {
    /// The field is not registered on this brick.
    FieldNotAllowed(BrickField),
    /// A field the brick requires is absent (usually after deserialization).
    MissingField(BrickField),
    /// The brick was written by a newer format than this build understands.
    UnsupportedVersion { found: u32, supported: u32 },
}

impl fmt::Display for BrickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrickError::FieldNotAllowed(field) => {
                write!(f, "field {} is not allowed on this brick", field.as_str())
            }
            BrickError::MissingField(field) => {
                write!(f, "required field {} is missing", field.as_str())
            }
            BrickError::UnsupportedVersion { found, supported } => write!(
                f,
                "brick version {} is newer than supported version {}",
                found, supported
            ),
        }
    }
}

impl std::error::Error for BrickError {}
