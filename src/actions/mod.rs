//! Executable actions produced by bricks.
//!
//! Bricks never build [`Action`]s themselves: they ask the sprite's
//! [`ActionFactory`] so a sprite can swap in its own action construction
//! (tests use a recording factory).

use std::sync::Arc;

use bevy_ecs::prelude::Entity;

use crate::formula::Formula;
use crate::sprite::Sprite;

/// One executable step of a script sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Set the target sprite's size to the formula result, in percent.
    SetSizeTo {
        sprite: Entity,
        formula: Arc<Formula>,
    },
    /// Add the formula result to the target sprite's size.
    ChangeSizeBy {
        sprite: Entity,
        formula: Arc<Formula>,
    },
}

impl Action {
    /// Entity this action operates on.
    pub fn target(&self) -> Entity {
        match self {
            Action::SetSizeTo { sprite, .. } | Action::ChangeSizeBy { sprite, .. } => *sprite,
        }
    }

    pub fn formula(&self) -> &Arc<Formula> {
        match self {
            Action::SetSizeTo { formula, .. } | Action::ChangeSizeBy { formula, .. } => formula,
        }
    }

    /// Compute the new size given the current one and the formula result.
    ///
    /// Sizes never go below zero. Returns `None` when the new size would not
    /// be a finite number.
    pub fn resolve_size(&self, current: f64, value: f64) -> Option<f64> {
        let size = match self {
            Action::SetSizeTo { .. } => value,
            Action::ChangeSizeBy { .. } => current + value,
        };
        size.is_finite().then(|| size.max(0.0))
    }
}

/// Builds actions on behalf of a sprite.
pub trait ActionFactory: Send + Sync {
    fn create_set_size_to_action(&self, sprite: &Sprite, formula: Arc<Formula>) -> Action;
    fn create_change_size_by_action(&self, sprite: &Sprite, formula: Arc<Formula>) -> Action;
}

/// The factory every sprite gets unless told otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultActionFactory;

impl ActionFactory for DefaultActionFactory {
    fn create_set_size_to_action(&self, sprite: &Sprite, formula: Arc<Formula>) -> Action {
        Action::SetSizeTo {
            sprite: sprite.entity,
            formula,
        }
    }

    fn create_change_size_by_action(&self, sprite: &Sprite, formula: Arc<Formula>) -> Action {
        Action::ChangeSizeBy {
            sprite: sprite.entity,
            formula,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::world::World;

    #[test]
    fn test_default_factory_targets_sprite_entity() {
        let mut world = World::new();
        let entity = world.spawn_empty().id();
        let sprite = Sprite::new("Cat", entity);
        let formula = Arc::new(Formula::new(10.0));

        let action = DefaultActionFactory.create_set_size_to_action(&sprite, formula.clone());
        assert_eq!(action.target(), entity);
        assert!(Arc::ptr_eq(action.formula(), &formula));
        assert!(matches!(action, Action::SetSizeTo { .. }));
    }

    #[test]
    fn test_resolve_size() {
        let entity = World::new().spawn_empty().id();
        let f = Arc::new(Formula::new(0.0));
        let set = Action::SetSizeTo {
            sprite: entity,
            formula: f.clone(),
        };
        let change = Action::ChangeSizeBy {
            sprite: entity,
            formula: f,
        };
        assert_eq!(set.resolve_size(100.0, 40.0), Some(40.0));
        assert_eq!(set.resolve_size(100.0, -5.0), Some(0.0));
        assert_eq!(change.resolve_size(100.0, -30.0), Some(70.0));
        assert_eq!(change.resolve_size(10.0, -30.0), Some(0.0));
    }

    #[test]
    fn test_resolve_size_rejects_overflow() {
        let entity = World::new().spawn_empty().id();
        let change = Action::ChangeSizeBy {
            sprite: entity,
            formula: Arc::new(Formula::new(0.0)),
        };
        assert_eq!(change.resolve_size(1e308, 1e308), None);
        assert_eq!(change.resolve_size(1e308, -1.0), Some(1e308 - 1.0));
    }
}
