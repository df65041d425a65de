//! Project files.
//!
//! A project is a JSON document listing sprites, their starting size, and the
//! bricks of their script, plus the initial user variables.
//!
//! ```json
//! {
//!   "version": 1,
//!   "variables": { "scale": 2.0 },
//!   "sprites": [
//!     { "name": "Cat", "size": 100.0, "bricks": [
//!       { "type": "SetSizeTo", "version": 1, "fields": {
//!         "SIZE": { "formula": { "kind": "number", "value": 50.0 },
//!                   "view": "brick_set_size_to_edit_text" } } }
//!     ] }
//!   ]
//! }
//! ```

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use bevy_ecs::prelude::*;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::actions::{ActionFactory, DefaultActionFactory};
use crate::bricks::{Brick, BrickError, BrickKind};
use crate::components::looksize::LookSize;
use crate::components::scriptsequence::ScriptSequenceAction;
use crate::components::spritename::SpriteName;
use crate::resources::runtimeconfig::RuntimeConfig;
use crate::resources::uservariables::UserVariables;
use crate::sprite::Sprite;

/// Current project file version.
pub const PROJECT_VERSION: u32 = 1;

fn default_project_version() -> u32 {
    PROJECT_VERSION
}

#[derive(Debug)]
pub enum ProjectError {
    Io(std::io::Error),
    Json(serde_json::Error),
    UnsupportedVersion { found: u32, supported: u32 },
    Brick {
        sprite: String,
        index: usize,
        source: BrickError,
    },
}

impl fmt::Display for ProjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectError::Io(e) => write!(f, "project I/O error: {}", e),
            ProjectError::Json(e) => write!(f, "invalid project JSON: {}", e),
            ProjectError::UnsupportedVersion { found, supported } => write!(
                f,
                "project version {} is newer than supported version {}",
                found, supported
            ),
            ProjectError::Brick {
                sprite,
                index,
                source,
            } => write!(f, "sprite '{}' brick #{}: {}", sprite, index, source),
        }
    }
}

impl std::error::Error for ProjectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProjectError::Io(e) => Some(e),
            ProjectError::Json(e) => Some(e),
            ProjectError::Brick { source, .. } => Some(source),
            ProjectError::UnsupportedVersion { .. } => None,
        }
    }
}

impl From<std::io::Error> for ProjectError {
    fn from(e: std::io::Error) -> Self {
        ProjectError::Io(e)
    }
}

impl From<serde_json::Error> for ProjectError {
    fn from(e: serde_json::Error) -> Self {
        ProjectError::Json(e)
    }
}

/// One sprite as stored in the project file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteData {
    pub name: String,
    /// Starting size in percent. Falls back to [`RuntimeConfig::default_size`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default)]
    pub bricks: Vec<BrickKind>,
}

impl SpriteData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: None,
            bricks: Vec::new(),
        }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_brick(mut self, brick: impl Into<BrickKind>) -> Self {
        self.bricks.push(brick.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default = "default_project_version")]
    pub version: u32,
    #[serde(default)]
    pub variables: UserVariables,
    #[serde(default)]
    pub sprites: Vec<SpriteData>,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            version: PROJECT_VERSION,
            variables: UserVariables::default(),
            sprites: Vec::new(),
        }
    }
}

impl Project {
    pub fn from_json_str(json: &str) -> Result<Self, ProjectError> {
        let project: Project = serde_json::from_str(json)?;
        project.validate()?;
        Ok(project)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProjectError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let project = Self::from_json_str(&content)?;
        info!(
            "Loaded project {:?}: {} sprite(s)",
            path,
            project.sprites.len()
        );
        Ok(project)
    }

    pub fn to_json_string(&self) -> Result<String, ProjectError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ProjectError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json_string()?)?;
        info!("Saved project to {:?}", path);
        Ok(())
    }

    /// Check the file version.
    ///
    /// Brick-level checks already ran while deserializing.
    pub fn validate(&self) -> Result<(), ProjectError> {
        if self.version > PROJECT_VERSION {
            return Err(ProjectError::UnsupportedVersion {
                found: self.version,
                supported: PROJECT_VERSION,
            });
        }
        Ok(())
    }

    /// Spawn every sprite with the [`DefaultActionFactory`].
    pub fn spawn(&self, world: &mut World) -> Result<Vec<Sprite>, ProjectError> {
        self.spawn_with_factory(world, Arc::new(DefaultActionFactory))
    }

    /// Spawn every sprite entity and build its script sequence.
    ///
    /// Bricks are activated in order. Replaces the world's [`UserVariables`]
    /// with the project's.
    pub fn spawn_with_factory(
        &self,
        world: &mut World,
        factory: Arc<dyn ActionFactory>,
    ) -> Result<Vec<Sprite>, ProjectError> {
        self.validate()?;
        let default_size = world
            .get_resource::<RuntimeConfig>()
            .map(|c| c.default_size)
            .unwrap_or_else(|| RuntimeConfig::default().default_size);

        let mut sprites = Vec::with_capacity(self.sprites.len());
        for data in &self.sprites {
            let entity = world
                .spawn((
                    SpriteName(data.name.clone()),
                    LookSize::new(data.size.unwrap_or(default_size)),
                ))
                .id();
            let sprite = Sprite::with_action_factory(data.name.clone(), entity, factory.clone());

            let mut sequence = ScriptSequenceAction::new();
            for (index, brick) in data.bricks.iter().enumerate() {
                // no brick kind opens a nested scope yet
                brick
                    .add_action_to_sequence(&sprite, &mut sequence)
                    .map_err(|source| ProjectError::Brick {
                        sprite: data.name.clone(),
                        index,
                        source,
                    })?;
            }
            debug!(
                "Spawned sprite '{}' with {} action(s)",
                data.name,
                sequence.len()
            );
            world.entity_mut(entity).insert(sequence);
            sprites.push(sprite);
        }

        world.insert_resource(self.variables.clone());
        Ok(sprites)
    }
}
