use bevy_ecs::prelude::Component;

/// Name of the sprite an entity represents.
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct SpriteName(pub String);
