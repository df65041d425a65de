//! Script sequence execution system.
//!
//! # System Flow
//!
//! Each tick:
//!
//! 1. Iterate all entities with a [`ScriptSequenceAction`]
//! 2. Pop up to [`RuntimeConfig::actions_per_tick`] pending actions
//! 3. Evaluate each action's formula against the target's current
//!    [`LookSize`] and the [`UserVariables`]
//! 4. Write the resolved size back to the target
//!
//! A formula that fails to evaluate, or a size that would overflow to
//! infinity, skips its action; the target keeps its size and the sequence
//! moves on.

use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::components::looksize::LookSize;
use crate::components::scriptsequence::ScriptSequenceAction;
use crate::components::spritename::SpriteName;
use crate::formula::FormulaContext;
use crate::resources::runtimeconfig::RuntimeConfig;
use crate::resources::uservariables::UserVariables;

pub fn script_sequence_system(
    config: Res<RuntimeConfig>,
    variables: Res<UserVariables>,
    mut sequences: Query<(Entity, Option<&SpriteName>, &mut ScriptSequenceAction)>,
    mut looks: Query<&mut LookSize>,
) {
    let budget = config.actions_per_tick.max(1);
    for (entity, name, mut sequence) in sequences.iter_mut() {
        let label = name.map(|n| n.0.as_str()).unwrap_or("<unnamed>");
        for _ in 0..budget {
            let Some(action) = sequence.next_action() else {
                break;
            };
            let Ok(mut look) = looks.get_mut(action.target()) else {
                warn!(
                    "{} ({:?}): action target {:?} has no LookSize, skipping",
                    label,
                    entity,
                    action.target()
                );
                continue;
            };
            let ctx = FormulaContext::new(look.percent, &variables);
            match action.formula().evaluate(&ctx) {
                Ok(value) => match action.resolve_size(look.percent, value) {
                    Some(size) => {
                        look.percent = size;
                        debug!("{}: size is now {}%", label, look.percent);
                    }
                    None => warn!(
                        "{}: skipping action, size {} + {} is not finite",
                        label, look.percent, value
                    ),
                },
                Err(e) => warn!("{}: skipping action, formula failed: {}", label, e),
            }
        }
    }
}
