//! Script-side handle to a sprite.
//!
//! The sprite's state (size, name, sequence) lives in ECS components on
//! [`Sprite::entity`]; this handle is what bricks receive when they are
//! activated.

use std::fmt;
use std::sync::Arc;

use bevy_ecs::prelude::Entity;

use crate::actions::{ActionFactory, DefaultActionFactory};

#[derive(Clone)]
pub struct Sprite {
    pub name: String,
    pub entity: Entity,
    action_factory: Arc<dyn ActionFactory>,
}

impl Sprite {
    /// Create a sprite handle using the [`DefaultActionFactory`].
    pub fn new(name: impl Into<String>, entity: Entity) -> Self {
        Self::with_action_factory(name, entity, Arc::new(DefaultActionFactory))
    }

    pub fn with_action_factory(
        name: impl Into<String>,
        entity: Entity,
        action_factory: Arc<dyn ActionFactory>,
    ) -> Self {
        Self {
            name: name.into(),
            entity,
            action_factory,
        }
    }

    pub fn action_factory(&self) -> &dyn ActionFactory {
        self.action_factory.as_ref()
    }
}

impl fmt::Debug for Sprite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sprite")
            .field("name", &self.name)
            .field("entity", &self.entity)
            .finish_non_exhaustive()
    }
}
