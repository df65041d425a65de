//! Headless driver for script execution.
//!
//! [`ScriptRuntime`] owns the ECS [`World`] and the tick [`Schedule`]. A
//! project is spawned into the world once, then [`ScriptRuntime::tick`] runs
//! the schedule until every sequence is finished or the tick limit is hit.

use bevy_ecs::prelude::*;
use log::info;

use crate::components::looksize::LookSize;
use crate::components::scriptsequence::ScriptSequenceAction;
use crate::components::spritename::SpriteName;
use crate::project::{Project, ProjectError};
use crate::resources::runtimeconfig::RuntimeConfig;
use crate::resources::uservariables::UserVariables;
use crate::sprite::Sprite;
use crate::systems::scriptsequence::script_sequence_system;

pub struct ScriptRuntime {
    pub world: World,
    schedule: Schedule,
    ticks: u32,
}

impl ScriptRuntime {
    pub fn new(config: RuntimeConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(config);
        world.insert_resource(UserVariables::default());

        let mut schedule = Schedule::default();
        schedule.add_systems(script_sequence_system);

        Self {
            world,
            schedule,
            ticks: 0,
        }
    }

    /// Spawn `project` into the world and return the sprite handles.
    pub fn load(&mut self, project: &Project) -> Result<Vec<Sprite>, ProjectError> {
        project.spawn(&mut self.world)
    }

    pub fn config(&self) -> &RuntimeConfig {
        self.world.resource::<RuntimeConfig>()
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn tick(&mut self) {
        self.schedule.run(&mut self.world);
        self.ticks += 1;
    }

    /// True when no sequence has pending actions.
    pub fn all_finished(&mut self) -> bool {
        let mut query = self.world.query::<&ScriptSequenceAction>();
        query.iter(&self.world).all(|seq| seq.is_finished())
    }

    /// Tick until every sequence is finished or `max_ticks` more ticks ran.
    ///
    /// Returns the number of ticks executed by this call.
    pub fn run_until_finished(&mut self, max_ticks: u32) -> u32 {
        let start = self.ticks;
        while !self.all_finished() && self.ticks - start < max_ticks {
            self.tick();
        }
        let ran = self.ticks - start;
        info!(
            "Ran {} tick(s), finished={}",
            ran,
            self.all_finished()
        );
        ran
    }

    /// Current size of a sprite, if it has one.
    pub fn size_of(&self, sprite: &Sprite) -> Option<f64> {
        self.world
            .get::<LookSize>(sprite.entity)
            .map(|look| look.percent)
    }

    /// Snapshot of every sprite's name and size.
    pub fn sizes(&mut self) -> Vec<(String, f64)> {
        let mut query = self.world.query::<(&SpriteName, &LookSize)>();
        let mut sizes: Vec<(String, f64)> = query
            .iter(&self.world)
            .map(|(name, look)| (name.0.clone(), look.percent))
            .collect();
        sizes.sort_by(|a, b| a.0.cmp(&b.0));
        sizes
    }
}

impl Default for ScriptRuntime {
    fn default() -> Self {
        Self::new(RuntimeConfig::default())
    }
}
