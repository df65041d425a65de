//! Ordered action list executed for a sprite's script.
//!
//! Bricks append to a [`ScriptSequenceAction`] when they are activated; the
//! [`script_sequence_system`](crate::systems::scriptsequence::script_sequence_system)
//! then runs the actions in order, advancing [`cursor`](ScriptSequenceAction::cursor).

use bevy_ecs::prelude::Component;

use crate::actions::Action;

#[derive(Component, Clone, Debug, Default, PartialEq)]
pub struct ScriptSequenceAction {
    /// Actions in execution order.
    pub actions: Vec<Action>,
    /// Index of the next action to run.
    pub cursor: usize,
}

impl ScriptSequenceAction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_action(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn last(&self) -> Option<&Action> {
        self.actions.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.actions.iter()
    }

    /// Next action to run, without advancing.
    pub fn peek(&self) -> Option<&Action> {
        self.actions.get(self.cursor)
    }

    /// Return the next action and advance past it.
    pub fn next_action(&mut self) -> Option<Action> {
        let action = self.actions.get(self.cursor).cloned()?;
        self.cursor += 1;
        Some(action)
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.actions.len()
    }

    /// Rewind so the sequence runs again from the first action.
    pub fn restart(&mut self) {
        self.cursor = 0;
    }
}
